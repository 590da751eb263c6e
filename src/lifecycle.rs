//! Hooks invoked around process element execution.
//!
//! The engine calls these before and after each element of a process run.
//! They only emit diagnostics; task-data reads and writes happen inside the
//! elements themselves.

use tracing::info;

use crate::context::Context;

/// Called before a process element runs.
pub fn will_run_element(ctx: &Context, process_id: &str, element_id: &str) {
    if ctx.verbose() {
        info!("will run {process_id}_{element_id}");
    }
}

/// Called after a process element has run.
pub fn did_run_element(ctx: &Context, process_id: &str, element_id: &str) {
    if ctx.verbose() {
        info!("did run {process_id}_{element_id}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hooks_run_with_and_without_verbose() {
        for verbose in [false, true] {
            let ctx = Context::new(verbose);
            will_run_element(&ctx, "order_process", "charge_card");
            did_run_element(&ctx, "order_process", "charge_card");
        }
    }
}
