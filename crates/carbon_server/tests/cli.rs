mod common;

use std::net::{IpAddr, Ipv4Addr};

use common::cli;
use pretty_assertions::assert_eq;

#[test]
fn blank_api_key_disables_completions() {
    assert!(cli(&[]).completion_settings().is_none());
    assert!(cli(&["--openai-api-key", "   "]).completion_settings().is_none());
}

#[test]
fn api_key_enables_completions_with_overrides() {
    let parsed = cli(&[
        "--openai-api-key",
        "secret",
        "--openai-base-url",
        "http://localhost:9999",
        "--openai-model",
        "tiny-instruct",
    ]);
    let completion = parsed.completion_settings().unwrap();
    assert_eq!(completion.api_key, "secret");
    assert_eq!(completion.base_url, "http://localhost:9999");
    assert_eq!(completion.model, "tiny-instruct");
    assert_eq!(completion.max_tokens, 150);
}

#[test]
fn listen_address_and_lighthouse_path_are_configurable() {
    let parsed = cli(&[
        "--port",
        "3002",
        "--host",
        "127.0.0.1",
        "--lighthouse-bin",
        "/opt/lh/bin/lighthouse",
    ]);
    assert_eq!(parsed.port, 3002);
    assert_eq!(parsed.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
    assert_eq!(
        parsed.lighthouse_bin.as_deref(),
        Some(std::path::Path::new("/opt/lh/bin/lighthouse"))
    );
}
