//! Browser-based page audit, delegated to the Lighthouse CLI.
//!
//! The CLI drives a headless Chrome. Each audit owns its child process
//! and the browser it starts through a [`BrowserSession`], which stops both
//! on every exit path.
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use carbon_logging::{carbon_info, carbon_warn};
use serde::Serialize;
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};

#[cfg(unix)]
use nix::{
    errno::Errno,
    sys::signal::{killpg, Signal},
    unistd::Pid,
};

use crate::CollaboratorError;

const NO_ISSUES: &str = "No major issues found";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub url: String,
    pub fetch_time: String,
    pub performance: PerformanceSummary,
    pub accessibility: AccessibilitySummary,
    pub seo: SeoSummary,
    pub best_practices: BestPracticesSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub score: String,
    pub first_contentful_paint: String,
    pub largest_contentful_paint: String,
    pub total_blocking_time: String,
    pub cumulative_layout_shift: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilitySummary {
    pub score: String,
    pub issues: AuditIssues,
}

/// Titles of failing audits, or a fixed sentence when there are none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AuditIssues {
    Found(Vec<String>),
    NoneFound(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoSummary {
    pub score: String,
    pub mobile_friendly: &'static str,
    pub meta_tags: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestPracticesSummary {
    pub score: String,
    pub security_issues: &'static str,
}

#[async_trait::async_trait]
pub trait AuditEngine: Send + Sync {
    async fn audit(&self, url: &str) -> Result<AuditReport, CollaboratorError>;
}

/// Condenses a raw Lighthouse result (`lhr`) into an [`AuditReport`].
pub fn summarize_lighthouse(lhr: &Value) -> Result<AuditReport, CollaboratorError> {
    let audits = lhr
        .get("audits")
        .and_then(Value::as_object)
        .ok_or_else(|| CollaboratorError::audit("lighthouse result has no audits"))?;
    let categories = lhr
        .get("categories")
        .and_then(Value::as_object)
        .ok_or_else(|| CollaboratorError::audit("lighthouse result has no categories"))?;

    let url = lhr
        .get("finalUrl")
        .or_else(|| lhr.get("finalDisplayedUrl"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let fetch_time = lhr
        .get("fetchTime")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let category_score = |name: &str| match categories
        .get(name)
        .and_then(|category| category.get("score"))
        .and_then(Value::as_f64)
    {
        Some(score) => format!("{:.0}%", score * 100.0),
        None => "N/A".to_string(),
    };
    let audit_passes = |name: &str| audit_score(audits.get(name)) == Some(1.0);

    let mut failing: Vec<String> = audits
        .values()
        .filter(|audit| audit_score(Some(*audit)) == Some(0.0))
        .filter_map(|audit| audit.get("title").and_then(Value::as_str))
        .map(str::to_string)
        .collect();
    failing.sort();
    let issues = if failing.is_empty() {
        AuditIssues::NoneFound(NO_ISSUES)
    } else {
        AuditIssues::Found(failing)
    };

    Ok(AuditReport {
        url,
        fetch_time,
        performance: PerformanceSummary {
            score: category_score("performance"),
            first_contentful_paint: format_seconds(audits.get("first-contentful-paint")),
            largest_contentful_paint: format_seconds(audits.get("largest-contentful-paint")),
            total_blocking_time: format_seconds(audits.get("total-blocking-time")),
            cumulative_layout_shift: format_unitless(audits.get("cumulative-layout-shift")),
        },
        accessibility: AccessibilitySummary {
            score: category_score("accessibility"),
            issues,
        },
        seo: SeoSummary {
            score: category_score("seo"),
            mobile_friendly: if audit_passes("viewport") { "Yes" } else { "No" },
            meta_tags: if audit_passes("meta-description") {
                "Present"
            } else {
                "Missing"
            },
        },
        best_practices: BestPracticesSummary {
            score: category_score("best-practices"),
            security_issues: if audit_passes("is-on-https") {
                "None"
            } else {
                "Not Secure"
            },
        },
    })
}

fn audit_score(audit: Option<&Value>) -> Option<f64> {
    audit?.get("score")?.as_f64()
}

fn numeric_value(audit: Option<&Value>) -> Option<f64> {
    audit?.get("numericValue")?.as_f64()
}

// Lighthouse reports timings in milliseconds.
fn format_seconds(audit: Option<&Value>) -> String {
    match numeric_value(audit) {
        Some(ms) => format!("{:.2} sec", ms / 1000.0),
        None => "N/A".to_string(),
    }
}

fn format_unitless(audit: Option<&Value>) -> String {
    match numeric_value(audit) {
        Some(value) => format!("{value:.3}"),
        None => "N/A".to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct LighthouseSettings {
    pub binary: PathBuf,
    pub timeout: Duration,
    pub chrome_flags: String,
    /// Time the CLI gets to close its browser after an interrupt.
    pub shutdown_grace: Duration,
}

impl Default for LighthouseSettings {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("lighthouse"),
            timeout: Duration::from_secs(120),
            chrome_flags: "--headless".to_string(),
            shutdown_grace: Duration::from_secs(2),
        }
    }
}

/// A running audit process and the browser it starts.
///
/// The CLI runs in its own process group. Releasing the session interrupts
/// the group so the CLI can close Chrome, then kills whatever is left.
/// Dropping an unreleased session kills the group outright.
struct BrowserSession {
    child: Option<Child>,
    #[cfg(unix)]
    group: Option<Pid>,
    grace: Duration,
}

impl BrowserSession {
    fn launch(settings: &LighthouseSettings, url: &str) -> Result<Self, CollaboratorError> {
        let mut command = Command::new(&settings.binary);
        command
            .arg(url)
            .arg("--output=json")
            .arg("--output-path=stdout")
            .arg("--quiet")
            .arg(format!("--chrome-flags={}", settings.chrome_flags))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        #[cfg(unix)]
        command.process_group(0);

        let child = command.spawn().map_err(|err| {
            CollaboratorError::audit(format!(
                "failed to launch {}: {err}",
                settings.binary.display()
            ))
        })?;
        Ok(Self {
            #[cfg(unix)]
            group: child
                .id()
                .and_then(|pid| i32::try_from(pid).ok())
                .map(Pid::from_raw),
            child: Some(child),
            grace: settings.shutdown_grace,
        })
    }

    async fn collect_output(&mut self) -> Result<Vec<u8>, CollaboratorError> {
        let child = self
            .child
            .as_mut()
            .ok_or_else(|| CollaboratorError::audit("audit session already released"))?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| CollaboratorError::audit("audit output not captured"))?;

        let mut output = Vec::new();
        stdout
            .read_to_end(&mut output)
            .await
            .map_err(|err| CollaboratorError::audit(err.to_string()))?;
        let status = child
            .wait()
            .await
            .map_err(|err| CollaboratorError::audit(err.to_string()))?;
        if !status.success() {
            return Err(CollaboratorError::audit(format!("lighthouse exited with {status}")));
        }
        Ok(output)
    }

    async fn release(mut self) {
        if let Some(mut child) = self.child.take() {
            if let Ok(None) = child.try_wait() {
                self.interrupt();
                if tokio::time::timeout(self.grace, child.wait()).await.is_err() {
                    carbon_warn!("Audit process ignored interrupt, killing it");
                    if let Err(err) = child.kill().await {
                        carbon_warn!("Failed to stop audit process: {}", err);
                    }
                }
            }
        }
        // Chrome outlives a CLI that died without cleaning up.
        self.kill_group();
    }

    #[cfg(unix)]
    fn interrupt(&self) {
        if let Some(group) = self.group {
            signal_group(group, Signal::SIGINT);
        }
    }

    #[cfg(not(unix))]
    fn interrupt(&self) {}

    #[cfg(unix)]
    fn kill_group(&mut self) {
        if let Some(group) = self.group.take() {
            signal_group(group, Signal::SIGKILL);
        }
    }

    #[cfg(not(unix))]
    fn kill_group(&mut self) {}
}

#[cfg(unix)]
fn signal_group(group: Pid, signal: Signal) {
    match killpg(group, signal) {
        // ESRCH: the group is already empty.
        Ok(()) | Err(Errno::ESRCH) => {}
        Err(err) => carbon_warn!("Failed to send {} to audit process group: {}", signal, err),
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.kill_group();
        if let Some(child) = self.child.as_mut() {
            let _ = child.start_kill();
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LighthouseAuditor {
    settings: LighthouseSettings,
}

impl LighthouseAuditor {
    pub fn new(settings: LighthouseSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl AuditEngine for LighthouseAuditor {
    async fn audit(&self, url: &str) -> Result<AuditReport, CollaboratorError> {
        carbon_info!("Running Lighthouse audit for: {}", url);
        let mut session = BrowserSession::launch(&self.settings, url)?;
        let outcome = tokio::time::timeout(self.settings.timeout, session.collect_output()).await;
        session.release().await;

        let output = match outcome {
            Ok(result) => result?,
            Err(_) => {
                return Err(CollaboratorError::audit(format!(
                    "audit timed out after {:?}",
                    self.settings.timeout
                )))
            }
        };

        let lhr: Value = serde_json::from_slice(&output)
            .map_err(|err| CollaboratorError::audit(format!("unreadable audit output: {err}")))?;
        summarize_lighthouse(&lhr)
    }
}
