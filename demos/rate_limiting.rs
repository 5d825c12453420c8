//! Example demonstrating rate-limit retries and the per-call deadline.
//!
//! This example shows how to:
//! - Configure the retry limit and the fixed inter-attempt delay
//! - Bound a whole call, retries included, with one deadline
//! - Disable the deadline for calls that must run to completion
//! - Tell a transient retry apart from exhausted retries
//!
//! Run with: `cargo run --example rate_limiting`

use lookout::{resource, Client, Error};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("lookout=debug")
        .init();

    let token = std::env::var("LOOKOUT_API_TOKEN").unwrap_or_else(|_| "demo-token".to_string());

    println!("=== Example 1: Default Retry Behavior ===");
    println!("Rate-limited attempts (HTTP 429) are retried automatically:");
    println!("  - up to {} retries by default", lookout::DEFAULT_RETRY_LIMIT);
    println!("  - waiting {:?} between attempts", lookout::DEFAULT_RETRY_INTERVAL);
    println!("  - under one {:?} per-call deadline", lookout::DEFAULT_TIMEOUT);
    println!("All other failures are terminal on first occurrence.\n");

    let client = Client::builder("rate-limiting-example", token.clone()).build()?;

    match client.list(resource::CHECK).await {
        Ok(response) => {
            println!("Success after {} attempt(s) in {:?}", response.attempts, response.latency);
            if response.was_retried() {
                println!("The service rate limited us along the way.");
            }
        }
        Err(Error::RateLimitExceeded { attempts }) => {
            println!("Gave up: all {} attempts were rate limited.", attempts);
        }
        Err(e) => println!("Error: {}", e),
    }
    println!();

    println!("=== Example 2: Tighter Budget ===");
    println!("A latency-sensitive caller can shrink both knobs.\n");

    let _client = Client::builder("rate-limiting-example", token.clone())
        .retry_limit(2)
        .retry_interval(Duration::from_millis(250))
        .timeout(Duration::from_secs(3))
        .build()?;

    println!("Client configured with:");
    println!("  - At most 3 attempts (1 initial + 2 retries)");
    println!("  - 250ms between rate-limited attempts");
    println!("  - The whole call, waits included, bounded at 3 seconds");
    println!();

    println!("=== Example 3: No Deadline ===");
    println!("A zero timeout disables the deadline entirely; the call only");
    println!("terminates on success, a terminal error, or exhausted retries.\n");

    let _client = Client::builder("rate-limiting-example", token)
        .timeout(Duration::ZERO)
        .retry_limit(10)
        .build()?;

    println!("Client configured with no per-call deadline.");
    println!();

    println!("=== Example 4: What the Caller Sees ===");
    println!("The transient 429 signal never escapes a call:");
    println!("  - a retry that eventually succeeds looks like a normal success");
    println!("    (with `attempts` > 1 on the response)");
    println!("  - exhausted retries surface as one RateLimitExceeded error");
    let exhausted = Error::RateLimitExceeded { attempts: 3 };
    println!("  - e.g.: {}", exhausted);

    Ok(())
}
