use musubi::{Context, TaskDataError};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let mut ctx = Context::new(true);

    ctx.set_i64("x", 11);
    println!("x = {}", ctx.get_i64("x"));

    match ctx.try_get_bool("x") {
        Err(error) => println!("as expected: {error} (code {})", error.code()),
        Ok(value) => println!("unexpected bool {value}"),
    }

    ctx.delete("x");
    match ctx.try_get_i64("x") {
        Err(TaskDataError::UnknownKey { key }) => println!("'{key}' is unset again"),
        other => println!("unexpected: {other:?}"),
    }
}
