#![allow(dead_code)]

use std::sync::{Arc, Once};

use carbon_engine::{
    summarize_lighthouse, AuditEngine, AuditReport, CollaboratorError, UnavailableRecommendations,
};
use carbon_server::{serve, AppState, Cli, Settings};
use clap::Parser;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(carbon_logging::initialize_for_tests);
}

/// A running server on an ephemeral port, stopped on drop.
pub struct TestServer {
    pub base: String,
    shutdown: CancellationToken,
}

impl TestServer {
    pub fn endpoint(&self, route: &str, params: &[(&str, &str)]) -> url::Url {
        url::Url::parse_with_params(&format!("{}{}", self.base, route), params).unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

pub async fn spawn(state: AppState) -> TestServer {
    init_logging();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = CancellationToken::new();
    tokio::spawn(serve(listener, state, shutdown.clone()));
    TestServer {
        base: format!("http://{addr}"),
        shutdown,
    }
}

/// CLI that ignores any API key present in the environment.
pub fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["carbon-server"];
    if !args.contains(&"--openai-api-key") {
        argv.extend_from_slice(&["--openai-api-key", ""]);
    }
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

pub fn state_with(settings: &Settings, args: &[&str]) -> AppState {
    AppState::from_config(&cli(args), settings).unwrap()
}

pub fn default_state() -> AppState {
    let mut state = state_with(&Settings::default(), &[]);
    state.narrative_recommendations = Arc::new(UnavailableRecommendations::new(
        "no API credential configured",
    ));
    state
}

pub struct FixtureAuditor;

#[async_trait::async_trait]
impl AuditEngine for FixtureAuditor {
    async fn audit(&self, url: &str) -> Result<AuditReport, CollaboratorError> {
        let lhr = serde_json::json!({
            "finalUrl": url,
            "fetchTime": "2026-01-01T00:00:00.000Z",
            "categories": {
                "performance": { "score": 0.5 },
                "accessibility": { "score": 1 },
                "seo": { "score": 0.8 },
                "best-practices": { "score": 0.9 }
            },
            "audits": {
                "viewport": { "title": "Has a viewport tag", "score": 1 },
                "is-on-https": { "title": "Uses HTTPS", "score": 1 }
            }
        });
        summarize_lighthouse(&lhr)
    }
}

pub struct BrokenAuditor;

#[async_trait::async_trait]
impl AuditEngine for BrokenAuditor {
    async fn audit(&self, _url: &str) -> Result<AuditReport, CollaboratorError> {
        Err(CollaboratorError::audit("chrome did not start"))
    }
}
