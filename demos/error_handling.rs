//! Example demonstrating the error taxonomy.
//!
//! This example shows how to:
//! - Match on the concrete error variant of a failed call
//! - Inspect the structured payload of service errors
//! - Tell transport failures apart from protocol-level ones
//! - Check why a call gave up on rate-limited retries
//!
//! Run with: `cargo run --example error_handling`

use lookout::{resource, Client, Error, ServiceError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("lookout=info")
        .init();

    let token = std::env::var("LOOKOUT_API_TOKEN").unwrap_or_else(|_| "demo-token".to_string());
    let client = Client::builder("error-handling-example", token).build()?;

    println!("=== Example 1: Matching on the Error Variant ===");
    // With a demo token this is expected to fail; the point is the match.
    match client.get(resource::GRAPH, "999999").await {
        Ok(response) => println!("Success: {}", response.data),
        Err(Error::TokenNotValidated) => {
            println!("The service rejected the token (HTTP 401).");
        }
        Err(Error::AccessDenied) => {
            println!("The token is valid but not authorized (HTTP 403).");
        }
        Err(Error::ResourceNotFound { endpoint }) => {
            println!("No such endpoint: {}", endpoint);
        }
        Err(Error::Api(service_error)) => {
            println!("Structured service error!");
            println!("  Code: {}", service_error.code);
            println!("  Explanation: {}", service_error.explanation);
            println!("  Reference: {}", service_error.reference);
            println!("  Server: {}", service_error.server);
        }
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 2: Handling Transport Errors ===");
    // Point a client at a host that does not exist
    let bad_client = Client::builder("error-handling-example", "demo-token")
        .base_url("https://this-domain-does-not-exist-12345.com")?
        .build()?;

    match bad_client.list(resource::ACCOUNT).await {
        Ok(_) => println!("Unexpected success"),
        Err(Error::Transport(e)) => {
            println!("Transport error!");
            println!("  Error: {}", e);
            println!("  Is connect error: {}", e.is_connect());
        }
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 3: Inspecting Errors Without a Network ===");
    // Every variant keeps its context; display messages stay human-readable
    let errors = vec![
        Error::Api(ServiceError {
            code: "1234".to_string(),
            explanation: "The requested check is paused".to_string(),
            message: "check paused".to_string(),
            reference: "code-1234".to_string(),
            tag: "id-abcd".to_string(),
            server: "api03".to_string(),
        }),
        Error::ResourceNotFound {
            endpoint: "/check/42".to_string(),
        },
        Error::RateLimitExceeded { attempts: 6 },
        Error::EmptyResponse,
        Error::Timeout,
    ];

    for error in errors {
        println!("Error: {}", error);
        println!("  Transient rate limit: {}", error.is_rate_limited());
        println!();
    }

    println!("=== Example 4: Exhausted Retries ===");
    match client.list(resource::CHECK).await {
        Ok(response) => println!("Succeeded after {} attempts", response.attempts),
        Err(Error::RateLimitExceeded { attempts }) => {
            println!("Every one of {} attempts was rate limited.", attempts);
            println!("Raise the retry limit or slow the caller down.");
        }
        Err(e) => println!("Other error: {}", e),
    }

    Ok(())
}
