use url::Url;

use crate::error::ValidationError;

/// Checks the raw `url` request parameter: present, non-blank, absolute http(s).
pub fn validate_target_url(raw: Option<&str>) -> Result<Url, ValidationError> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingUrl);
    }

    let url = Url::parse(trimmed).map_err(|err| ValidationError::InvalidUrl {
        reason: err.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::InvalidUrl {
                reason: format!("unsupported scheme {other}"),
            })
        }
    }
    if url.host_str().is_none() {
        return Err(ValidationError::InvalidUrl {
            reason: "url has no host".to_string(),
        });
    }
    Ok(url)
}
