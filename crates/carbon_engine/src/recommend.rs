use std::time::Duration;

use carbon_core::ReportFigures;
use carbon_logging::carbon_debug;
use serde::{Deserialize, Serialize};

use crate::CollaboratorError;

const STATIC_RECOMMENDATIONS: &[&str] = &[
    "Optimize images using modern formats like WebP and AVIF.",
    "Minimize JavaScript and CSS files by reducing unused code.",
    "Enable browser caching to reduce redundant network requests.",
    "Use a content delivery network (CDN) for faster loading.",
    "Host your website on a green energy-powered server.",
    "Avoid autoplaying videos and large media files when unnecessary.",
    "Implement lazy loading for images and videos.",
    "Reduce third-party scripts and use asynchronous loading where possible.",
    "Use static site generation (SSG) or server-side rendering (SSR) for efficiency.",
    "Minimize HTTP requests by combining files and reducing dependencies.",
    "Implement dark mode where appropriate (OLED screens use less energy).",
    "Use efficient fonts and limit the number of font files loaded.",
    "Remove unnecessary tracking scripts and analytics where possible.",
    "Enable Gzip or Brotli compression to reduce file sizes.",
    "Use efficient database queries and optimize backend processing.",
    "Regularly audit your website performance using Lighthouse or WebPageTest.",
    "Educate users and developers on sustainable web design principles.",
];

/// What a recommendation source gets to see about the analyzed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationContext {
    pub url: String,
    /// Already formatted, e.g. `"500.00 KB"`.
    pub resource_size: String,
    /// Already formatted, e.g. `"0.1833 g"`.
    pub co2_emissions: String,
}

impl RecommendationContext {
    pub fn new(url: impl Into<String>, figures: &ReportFigures) -> Self {
        Self {
            url: url.into(),
            resource_size: figures.resource_size.clone(),
            co2_emissions: figures.co2_emissions.clone(),
        }
    }
}

#[async_trait::async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn recommend(
        &self,
        context: &RecommendationContext,
    ) -> Result<Vec<String>, CollaboratorError>;
}

/// The fixed list of general-purpose advice.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticRecommendations;

#[async_trait::async_trait]
impl RecommendationSource for StaticRecommendations {
    async fn recommend(
        &self,
        _context: &RecommendationContext,
    ) -> Result<Vec<String>, CollaboratorError> {
        Ok(STATIC_RECOMMENDATIONS
            .iter()
            .map(|item| item.to_string())
            .collect())
    }
}

/// Used when no completion credential is configured.
#[derive(Debug, Clone)]
pub struct UnavailableRecommendations {
    reason: String,
}

impl UnavailableRecommendations {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait::async_trait]
impl RecommendationSource for UnavailableRecommendations {
    async fn recommend(
        &self,
        _context: &RecommendationContext,
    ) -> Result<Vec<String>, CollaboratorError> {
        Err(CollaboratorError::recommendations(self.reason.clone()))
    }
}

#[derive(Debug, Clone)]
pub struct CompletionSettings {
    /// Scheme and host of the completion API, without the `/v1/...` path.
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl CompletionSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: api_key.into(),
            model: "gpt-3.5-turbo-instruct".to_string(),
            max_tokens: 150,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: String,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    text: String,
}

/// Narrative advice from a text-completion service.
#[derive(Debug, Clone)]
pub struct CompletionRecommendations {
    settings: CompletionSettings,
    client: reqwest::Client,
}

impl CompletionRecommendations {
    pub fn new(settings: CompletionSettings) -> Result<Self, CollaboratorError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|err| CollaboratorError::recommendations(err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/completions", self.settings.base_url.trim_end_matches('/'))
    }
}

pub fn build_prompt(context: &RecommendationContext) -> String {
    format!(
        "Analyze the following website's CO2 emissions and provide sustainability recommendations.\n\
         Website: {url}\n\
         Data:\n\
         - Resource Size: {size}\n\
         - CO2 Emissions: {co2}\n\n\
         Provide 5 personalized recommendations to reduce emissions while maintaining user experience.",
        url = context.url,
        size = context.resource_size,
        co2 = context.co2_emissions,
    )
}

/// Splits narrative text into one recommendation per non-empty line.
pub fn split_narrative(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait::async_trait]
impl RecommendationSource for CompletionRecommendations {
    async fn recommend(
        &self,
        context: &RecommendationContext,
    ) -> Result<Vec<String>, CollaboratorError> {
        let request = CompletionRequest {
            model: &self.settings.model,
            prompt: build_prompt(context),
            max_tokens: self.settings.max_tokens,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| CollaboratorError::recommendations(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollaboratorError::recommendations(format!(
                "completion service returned {status}"
            )));
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|err| CollaboratorError::recommendations(err.to_string()))?;

        let text = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| CollaboratorError::recommendations("completion had no choices"))?;

        let items = split_narrative(&text);
        if items.is_empty() {
            return Err(CollaboratorError::recommendations("completion text was empty"));
        }
        carbon_debug!("Completion produced {} recommendation lines", items.len());
        Ok(items)
    }
}
