use clap::Parser;
use musubi::{did_run_element, dict, handle_manual_task, will_run_element, Context};
use tracing_subscriber::EnvFilter;

/// Runs a small scripted order process against a fresh context.
#[derive(Parser, Debug)]
struct Args {
    /// Emit a diagnostic line for every task-data operation
    #[arg(short, long, action)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose { "trace" } else { "error" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("MUSUBI_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let mut ctx = Context::new(args.verbose);
    run_order_process(&mut ctx)?;

    println!("Order process completed");
    Ok(())
}

fn run_order_process(ctx: &mut Context) -> Result<(), Box<dyn std::error::Error>> {
    will_run_element(ctx, "order_process", "receive_order");
    ctx.try_set_str("customer", "alice")?;
    ctx.try_set_i64("total", 4200)?;
    ctx.try_set_dict(
        "line_item",
        dict! {
            "sku" => "knot-01",
            "quantity" => 2i64,
        }?,
    )?;
    did_run_element(ctx, "order_process", "receive_order");

    will_run_element(ctx, "order_process", "review_order");
    handle_manual_task(ctx, "review_order", "Check the order totals before approving.")?;
    ctx.try_set_bool("approved", true)?;
    did_run_element(ctx, "order_process", "review_order");

    will_run_element(ctx, "order_process", "ship_order");
    if ctx.try_get_bool("approved")? {
        println!(
            "Shipping order for {} (total {})",
            ctx.get_str("customer"),
            ctx.get_i64("total")
        );
    }
    ctx.try_delete("line_item")?;
    did_run_element(ctx, "order_process", "ship_order");

    Ok(())
}
