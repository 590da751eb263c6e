//! Console interaction for manual process tasks.

use std::io::{self, BufRead as _, IsTerminal as _, Write as _};

use tracing::info;

use crate::context::Context;

/// Presents a manual task to the operator and waits for confirmation.
///
/// Prints the task id and, when non-empty, its instructions. When stdin is
/// a terminal the task blocks until the operator presses enter; otherwise
/// it completes immediately so unattended runs never stall.
///
/// # Errors
///
/// Returns any error from writing to or reading from the console.
pub fn handle_manual_task(ctx: &Context, element_id: &str, instructions: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "Manual Task {element_id}")?;
    if !instructions.is_empty() {
        writeln!(out, "  * {instructions}")?;
    }

    if io::stdin().is_terminal() {
        writeln!(out, "Press enter to continue.")?;
        out.flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
    } else if ctx.verbose() {
        info!("not in interactive mode, automatically completing manual task");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test runs have no terminal on stdin, so the handler takes the
    // auto-complete path and returns immediately.
    #[test]
    fn test_completes_without_terminal() {
        let ctx = Context::new(true);
        assert!(handle_manual_task(&ctx, "review_order", "Check the totals").is_ok());
    }

    #[test]
    fn test_empty_instructions_are_skipped() {
        let ctx = Context::new(false);
        assert!(handle_manual_task(&ctx, "review_order", "").is_ok());
    }
}
