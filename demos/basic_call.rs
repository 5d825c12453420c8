//! Basic example demonstrating the CRUD convenience methods.
//!
//! This example shows how to:
//! - Create a client with basic configuration
//! - List a resource collection and fetch a single instance
//! - Create a resource with a JSON body
//! - Access response data and call metadata
//!
//! Run with: `cargo run --example basic_call`
//!
//! Set `LOOKOUT_API_TOKEN` (and optionally `LOOKOUT_BASE_URL`) to point the
//! example at a real deployment.

use lookout::{resource, Client, Error};
use serde_json::json;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("lookout=debug,basic_call=info")
        .init();

    let token = std::env::var("LOOKOUT_API_TOKEN").unwrap_or_else(|_| "demo-token".to_string());

    let mut builder = Client::builder("basic-call-example", token).timeout(Duration::from_secs(10));
    if let Ok(base_url) = std::env::var("LOOKOUT_BASE_URL") {
        builder = builder.base_url(base_url)?;
    }
    let client = builder.build()?;

    println!("=== List Example ===");
    // Fetch every check visible to this token
    let response = client.list(resource::CHECK).await?;

    println!("Checks: {}", response.data);
    println!("Request latency: {:?}", response.latency);
    println!("Attempts: {}", response.attempts);
    println!();

    println!("=== Get Example ===");
    // Fetch a single check by id
    let response = client.get(resource::CHECK, "1234").await?;
    println!("Check 1234: {}", response.data);
    println!();

    println!("=== Add Example ===");
    // Create a new check
    let new_check = json!({
        "target": "10.0.0.1",
        "type": "ping",
        "period": 60,
    });

    let response = client.add(resource::CHECK, &new_check, []).await?;

    println!("Created: {}", response.data);
    println!("Request latency: {:?}", response.latency);
    println!("Was retried: {}", response.was_retried());

    Ok(())
}
