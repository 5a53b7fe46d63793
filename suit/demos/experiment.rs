//! Runs four sample payloads through one schema and prints the outcome.
//!
//! `RUST_LOG=suit=debug cargo run --example experiment` shows each field
//! and discrepancy as it is evaluated.

use serde_json::json;
use suit::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let set = ConstraintSet::load(["basic-types", "basic-ui"])?;
    let schema = Schema::parse_descriptor(
        r#"{
            "username": ["string", "required"],
            "age": "any",
            "email": "email",
            "profile": {"country": "string", "city": "string"}
        }"#,
        &set,
    )?;

    let inputs = [
        // Okay, but lacking some optional fields.
        json!({
            "username": "molly",
            "extra": "lolololtrol",
            "email": "asdf@sdf.com",
            "profile": {"country": "zimbab"}
        }),
        // Bad email.
        json!({"username": "m", "email": "asdfsdf.com"}),
        // No username.
        json!({"email": "asdf@df.com"}),
        // Type conversion.
        json!({"username": 45, "age": 56, "email": "asdf@df.com"}),
    ];

    for input in &inputs {
        match schema.fit(input) {
            Ok(output) => println!("{}", serde_json::to_string_pretty(&output)?),
            Err(err) => println!("Error: {err}"),
        }
    }

    Ok(())
}
