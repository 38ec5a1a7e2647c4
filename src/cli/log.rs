//! taba log commands.

use serde::Serialize;

use crate::activity::Activity;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput};

use super::context::CliContext;

pub struct ShowOptions {
    pub limit: usize,
}

pub fn run_show(ctx: &CliContext, options: ShowOptions) -> Result<()> {
    let store = ctx.board()?;
    let entries: Vec<&Activity> = store.activity().entries().iter().take(options.limit).collect();

    let mut human = HumanOutput::new(format!(
        "{} of {} activity entries (newest first)",
        entries.len(),
        store.activity().len()
    ));
    for entry in &entries {
        human.push_detail(format!(
            "{}  [{}] {}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.action,
            entry.details
        ));
    }
    emit_success(ctx.output, "log show", &entries, Some(&human))
}

pub fn run_clear(ctx: &CliContext) -> Result<()> {
    let mut store = ctx.board()?;
    let cleared = store.activity().len();
    store.clear_log()?;

    let human = HumanOutput::new(format!("Cleared {cleared} activity entries"));
    #[derive(Serialize)]
    struct Cleared {
        cleared: usize,
    }
    emit_success(ctx.output, "log clear", &Cleared { cleared }, Some(&human))
}
