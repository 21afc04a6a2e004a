//! Behavior of the two client facades over their public surface.
//!
//! Nothing here talks to a live server. Clients point at an unroutable
//! address, which makes the error kind observable: a request that was
//! rejected locally comes back as `Error::Validation`, while anything that
//! actually dialed out would have surfaced as `Error::Network`.

use xioca_rs::{Error, blocking};
use xioca_rs::types::{ChatMessage, ImageModel, TextModel};

const UNROUTABLE: &str = "http://127.0.0.1:9";

fn async_client() -> xioca_rs::Client {
    xioca_rs::Client::builder()
        .key("test-key")
        .base_url(UNROUTABLE)
        .build()
        .unwrap()
}

fn blocking_client() -> blocking::Client {
    blocking::Client::builder()
        .key("test-key")
        .base_url(UNROUTABLE)
        .build_blocking()
        .unwrap()
}

#[tokio::test]
async fn async_validation_short_circuits_before_the_network() {
    let client = async_client();

    let mut request = client
        .chat()
        .create(TextModel::DeepseekV3, vec![ChatMessage::user("hi")]);
    request.temperature(2.1);

    match request.await {
        Err(Error::Validation(_)) => {}
        other => panic!("expected a local validation failure, got {other:?}"),
    }
}

#[test]
fn blocking_validation_short_circuits_before_the_network() {
    let client = blocking_client();

    let mut request = client
        .chat()
        .create(TextModel::DeepseekV3, vec![ChatMessage::user("hi")]);
    request.temperature(-0.1);

    match request.send() {
        Err(Error::Validation(_)) => {}
        other => panic!("expected a local validation failure, got {other:?}"),
    }
}

#[test]
fn empty_prompts_never_leave_the_process() {
    let client = blocking_client();

    match client.images().generate(ImageModel::Flux, "").send() {
        Err(Error::Validation(_)) => {}
        other => panic!("expected a local validation failure, got {other:?}"),
    }
}

#[tokio::test]
async fn async_network_failures_surface_as_network_errors() {
    let client = async_client();

    let result = client
        .chat()
        .create(TextModel::Qwen3, vec![ChatMessage::user("hi")])
        .await;

    match result {
        Err(Error::Network(source)) => {
            assert!(source.is_connect() || source.is_timeout() || source.is_request());
        }
        other => panic!("expected Error::Network, got {other:?}"),
    }
}

#[test]
fn blocking_network_failures_surface_as_network_errors() {
    let client = blocking_client();

    let result = client
        .images()
        .generate(ImageModel::Flux, "a red panda")
        .send();

    match result {
        Err(Error::Network(_)) => {}
        other => panic!("expected Error::Network, got {other:?}"),
    }
}

#[test]
fn both_facades_build_identical_payloads() {
    let messages = || {
        vec![
            ChatMessage::system("be brief"),
            ChatMessage::user("hi"),
        ]
    };

    let mut from_async = async_client()
        .chat()
        .create(TextModel::DeepseekR1, messages());
    from_async.online(true);
    from_async.temperature(0.3);

    let mut from_blocking = blocking_client()
        .chat()
        .create(TextModel::DeepseekR1, messages());
    from_blocking.online(true);
    from_blocking.temperature(0.3);

    assert_eq!(
        serde_json::to_value(&from_async.body).unwrap(),
        serde_json::to_value(&from_blocking.body).unwrap()
    );
}

#[test]
fn missing_credentials_fail_before_any_network_attempt() {
    // The only test in this binary that touches the environment.
    unsafe { std::env::remove_var("XIOCA_API_KEY") };

    let err = blocking::Client::from_env()
        .err()
        .expect("construction must fail without a key");
    assert!(matches!(err, Error::Configuration(_)));
}
