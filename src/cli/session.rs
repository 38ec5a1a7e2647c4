//! taba login/logout/whoami commands.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput};

use super::context::CliContext;

pub struct LoginOptions {
    pub email: String,
    pub password: String,
}

pub fn run_login(ctx: &CliContext, options: LoginOptions) -> Result<()> {
    let mut session = ctx.session();
    let user = session.login(&options.email, &options.password)?;

    let mut human = HumanOutput::new(format!("Logged in as {}", user.name));
    human.push_summary("email", &user.email);
    emit_success(ctx.output, "login", &user, Some(&human))
}

pub fn run_logout(ctx: &CliContext) -> Result<()> {
    let mut session = ctx.session();
    let was_logged_in = session.is_authenticated();
    session.logout()?;

    let human = if was_logged_in {
        HumanOutput::new("Logged out")
    } else {
        HumanOutput::new("Not logged in; nothing to do")
    };
    #[derive(Serialize)]
    struct Logout {
        was_logged_in: bool,
    }
    emit_success(ctx.output, "logout", &Logout { was_logged_in }, Some(&human))
}

pub fn run_whoami(ctx: &CliContext) -> Result<()> {
    let session = ctx.session();
    let user = session.current_user().ok_or(Error::NotLoggedIn)?;

    let mut human = HumanOutput::new(format!("{} <{}>", user.name, user.email));
    human.push_summary("id", &user.id);
    emit_success(ctx.output, "whoami", user, Some(&human))
}
