//! taba board and reset commands.

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput};

use super::context::CliContext;

/// Launch the interactive board UI.
pub fn run_board(ctx: &CliContext) -> Result<()> {
    let store = ctx.board()?;
    let prefs = ctx.prefs();
    crate::ui::board::run(store, prefs)
}

/// Delete every task in the current project.
pub fn run_reset(ctx: &CliContext) -> Result<()> {
    let mut store = ctx.board()?;
    let before = store.current_tasks().len();
    let reset = store.reset_board()?;

    let human = if reset {
        let mut human = HumanOutput::new("Reset tasks in the current project");
        human.push_summary("removed", before.to_string());
        human
    } else {
        HumanOutput::new("No current project; nothing to reset")
    };
    #[derive(Serialize)]
    struct ResetReport {
        reset: bool,
        removed: usize,
    }
    emit_success(
        ctx.output,
        "reset",
        &ResetReport {
            reset,
            removed: if reset { before } else { 0 },
        },
        Some(&human),
    )
}
