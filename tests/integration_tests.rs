//! Integration tests using wiremock to mock the Lookout service.

use http::Method;
use lookout::{Client, ClientBuilder, Error, Request, ServiceError};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MALFORMED_JSON: &str = "{ count:4 )";

fn success_body() -> serde_json::Value {
    json!({ "data": [1, 2, 3, 4] })
}

fn service_error() -> ServiceError {
    ServiceError {
        code: "1234".to_string(),
        explanation: "Intentional error".to_string(),
        message: "Test-triggered error".to_string(),
        reference: "code-1234".to_string(),
        tag: "id-abcd".to_string(),
        server: "test".to_string(),
    }
}

/// Builder preconfigured for tests: no base path, fast retries.
fn builder(server: &MockServer) -> ClientBuilder {
    Client::builder("sampleapp", "abc123")
        .base_url(server.uri())
        .unwrap()
        .base_path("")
        .retry_interval(Duration::from_millis(10))
}

#[tokio::test]
async fn success_sends_identifying_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/success"))
        .and(header("X-Lookout-App-Name", "sampleapp"))
        .and(header("X-Lookout-Auth-Token", "abc123"))
        .and(header("Accept", "application/json"))
        .and(query_param("vegetable", "carrot"))
        .and(query_param("rock", "onyx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = builder(&server).build().unwrap();
    let request = Request::new(Method::GET, "/success")
        .with_param("vegetable", "carrot")
        .with_param("rock", "onyx");

    let response = client.send::<()>(request, None).await.unwrap();

    assert_eq!(response.data, success_body());
    assert_eq!(response.as_ref(), &success_body());
    assert_eq!(response.attempts, 1);
    assert!(!response.was_retried());
}

#[tokio::test]
async fn structured_service_error_is_preserved() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/failure"))
        .respond_with(ResponseTemplate::new(500).set_body_json(&service_error()))
        .mount(&server)
        .await;

    let client = builder(&server).build().unwrap();
    let request = Request::new(Method::GET, "/failure");

    match client.send::<()>(request, None).await {
        Err(Error::Api(e)) => {
            assert_eq!(e, service_error());
            assert_eq!(e.to_string(), "Intentional error");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_maps_to_token_not_validated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/invalid-token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(&service_error()))
        .mount(&server)
        .await;

    let client = builder(&server).build().unwrap();
    let result = client.send::<()>(Request::new(Method::GET, "/invalid-token"), None).await;

    assert!(matches!(result, Err(Error::TokenNotValidated)));
}

#[tokio::test]
async fn forbidden_maps_to_access_denied() {
    let server = MockServer::start().await;

    // Body is deliberately not JSON: 403 must be recognized from the status
    // line alone.
    Mock::given(method("GET"))
        .and(path("/no-access"))
        .respond_with(ResponseTemplate::new(403).set_body_string(MALFORMED_JSON))
        .mount(&server)
        .await;

    let client = builder(&server).build().unwrap();
    let result = client.send::<()>(Request::new(Method::GET, "/no-access"), None).await;

    assert!(matches!(result, Err(Error::AccessDenied)));
}

#[tokio::test]
async fn not_found_reports_the_endpoint() {
    let server = MockServer::start().await;

    let client = builder(&server).build().unwrap();
    let result = client.send::<()>(Request::new(Method::GET, "/nonexistent"), None).await;

    match result {
        Err(Error::ResourceNotFound { endpoint }) => assert_eq!(endpoint, "/nonexistent"),
        other => panic!("expected ResourceNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_success_body_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let client = builder(&server).build().unwrap();
    let result = client.send::<()>(Request::new(Method::GET, "/empty"), None).await;

    assert!(matches!(result, Err(Error::EmptyResponse)));
}

#[tokio::test]
async fn malformed_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/malformed-success"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MALFORMED_JSON))
        .mount(&server)
        .await;

    let client = builder(&server).build().unwrap();
    let result = client
        .send::<()>(Request::new(Method::GET, "/malformed-success"), None)
        .await;

    assert!(matches!(result, Err(Error::MalformedResponse { .. })));
}

#[tokio::test]
async fn malformed_failure_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/malformed-failure"))
        .respond_with(ResponseTemplate::new(500).set_body_string(MALFORMED_JSON))
        .mount(&server)
        .await;

    let client = builder(&server).build().unwrap();
    let result = client
        .send::<()>(Request::new(Method::GET, "/malformed-failure"), None)
        .await;

    assert!(matches!(result, Err(Error::MalformedResponse { .. })));
}

#[tokio::test]
async fn unencodable_body_never_reaches_the_wire() {
    struct Unencodable;

    impl serde::Serialize for Unencodable {
        fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            Err(serde::ser::Error::custom("cannot encode"))
        }
    }

    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/success"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(0)
        .mount(&server)
        .await;

    let client = builder(&server).build().unwrap();
    let result = client
        .send(Request::new(Method::POST, "/success"), Some(&Unencodable))
        .await;

    match result {
        Err(Error::RequestData { reason }) => assert!(reason.contains("cannot encode")),
        other => panic!("expected RequestData, got {other:?}"),
    }
    // Dropping the server verifies the zero-request expectation.
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let client = Client::builder("sampleapp", "abc123")
        .base_url("http://127.0.0.1:1")
        .unwrap()
        .base_path("")
        .build()
        .unwrap();

    let result = client.send::<()>(Request::new(Method::GET, "/success"), None).await;

    assert!(matches!(result, Err(Error::Transport(_))));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/timeout"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = builder(&server)
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let start = Instant::now();
    let result = client.send::<()>(Request::new(Method::GET, "/timeout"), None).await;
    let elapsed = start.elapsed();

    assert!(matches!(result, Err(Error::Timeout)));
    assert!(
        elapsed >= Duration::from_millis(200),
        "timed out early: {elapsed:?}"
    );
    assert!(
        elapsed < Duration::from_millis(450),
        "deadline not enforced: {elapsed:?}"
    );
}

#[tokio::test]
async fn zero_timeout_disables_the_deadline() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/timeout"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body())
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let client = builder(&server).timeout(Duration::ZERO).build().unwrap();

    let response = client
        .send::<()>(Request::new(Method::GET, "/timeout"), None)
        .await
        .unwrap();

    assert_eq!(response.data, success_body());
}

#[tokio::test]
async fn deadline_covers_retry_waits() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rate-limit-full"))
        .respond_with(ResponseTemplate::new(429).set_body_json(&service_error()))
        .mount(&server)
        .await;

    // The deadline elapses during the inter-attempt delay, not mid-request.
    let client = builder(&server)
        .retry_limit(10)
        .retry_interval(Duration::from_millis(200))
        .timeout(Duration::from_millis(150))
        .build()
        .unwrap();

    let result = client
        .send::<()>(Request::new(Method::GET, "/rate-limit-full"), None)
        .await;

    assert!(matches!(result, Err(Error::Timeout)));
}

#[tokio::test]
async fn exhausted_retries_surface_rate_limit_exceeded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rate-limit-full"))
        .respond_with(ResponseTemplate::new(429).set_body_json(&service_error()))
        .expect(3)
        .mount(&server)
        .await;

    let client = builder(&server).retry_limit(2).build().unwrap();
    let result = client
        .send::<()>(Request::new(Method::GET, "/rate-limit-full"), None)
        .await;

    match result {
        // retry_limit 2 allows 3 attempts in total.
        Err(Error::RateLimitExceeded { attempts }) => assert_eq!(attempts, 3),
        other => panic!("expected RateLimitExceeded, got {other:?}"),
    }
}

#[tokio::test]
async fn recovers_after_transient_rate_limiting() {
    let server = MockServer::start().await;
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_clone = hits.clone();

    // 429 twice, then success.
    Mock::given(method("GET"))
        .and(path("/rate-limit-partial"))
        .respond_with(move |_req: &wiremock::Request| {
            let count = hits_clone.fetch_add(1, Ordering::SeqCst);
            if count < 2 {
                ResponseTemplate::new(429).set_body_json(&service_error())
            } else {
                ResponseTemplate::new(200).set_body_json(success_body())
            }
        })
        .mount(&server)
        .await;

    let client = builder(&server).retry_limit(2).build().unwrap();
    let response = client
        .send::<()>(Request::new(Method::GET, "/rate-limit-partial"), None)
        .await
        .unwrap();

    assert_eq!(response.data, success_body());
    assert_eq!(response.attempts, 3);
    assert!(response.was_retried());
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn retry_budget_below_failure_count_gives_up() {
    let server = MockServer::start().await;
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_clone = hits.clone();

    // Would succeed on the fourth attempt, but the budget allows only two.
    Mock::given(method("GET"))
        .and(path("/rate-limit-partial"))
        .respond_with(move |_req: &wiremock::Request| {
            let count = hits_clone.fetch_add(1, Ordering::SeqCst);
            if count < 3 {
                ResponseTemplate::new(429).set_body_json(&service_error())
            } else {
                ResponseTemplate::new(200).set_body_json(success_body())
            }
        })
        .mount(&server)
        .await;

    let client = builder(&server).retry_limit(1).build().unwrap();
    let result = client
        .send::<()>(Request::new(Method::GET, "/rate-limit-partial"), None)
        .await;

    match result {
        Err(Error::RateLimitExceeded { attempts }) => assert_eq!(attempts, 2),
        other => panic!("expected RateLimitExceeded, got {other:?}"),
    }
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn non_rate_limit_errors_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/failure"))
        .respond_with(ResponseTemplate::new(500).set_body_json(&service_error()))
        .expect(1)
        .mount(&server)
        .await;

    let client = builder(&server).retry_limit(5).build().unwrap();
    let result = client.send::<()>(Request::new(Method::GET, "/failure"), None).await;

    assert!(matches!(result, Err(Error::Api(_))));
}

#[tokio::test]
async fn concurrent_calls_do_not_serialize() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body())
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let client = builder(&server).build().unwrap();

    let start = Instant::now();
    let (a, b) = tokio::join!(
        client.send::<()>(Request::new(Method::GET, "/slow"), None),
        client.send::<()>(Request::new(Method::GET, "/slow"), None),
    );
    let elapsed = start.elapsed();

    assert!(a.is_ok());
    assert!(b.is_ok());
    // Two serialized calls would take at least 600ms.
    assert!(elapsed < Duration::from_millis(550), "calls serialized: {elapsed:?}");
}

#[tokio::test]
async fn crud_helpers_build_versioned_paths() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/check/1234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v2/graph"))
        .and(query_param("validate", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v2/graph/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v2/rule_set/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "deleted": true })))
        .mount(&server)
        .await;

    // Default base path, unlike the other tests.
    let client = Client::builder("sampleapp", "abc123")
        .base_url(server.uri())
        .unwrap()
        .build()
        .unwrap();

    let accounts = client.list(lookout::resource::ACCOUNT).await.unwrap();
    assert_eq!(accounts.data, success_body());

    client.get(lookout::resource::CHECK, "1234").await.unwrap();

    client
        .add(
            lookout::resource::GRAPH,
            &json!({ "title": "cpu" }),
            [("validate".to_string(), "true".to_string())],
        )
        .await
        .unwrap();

    client
        .edit(lookout::resource::GRAPH, "42", &json!({ "title": "mem" }))
        .await
        .unwrap();

    let deleted = client.delete(lookout::resource::RULE_SET, "7").await.unwrap();
    assert_eq!(deleted.data["deleted"], json!(true));
}
