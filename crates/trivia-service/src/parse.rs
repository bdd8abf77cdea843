//! Parsing of request fields given as text.

use trivia_types::{KeywordSet, SessionId};

use crate::error::ServiceError;

/// Parse a keyword set sent as a JSON array of strings, e.g. `["fox","cat"]`.
///
/// Duplicates collapse. Anything other than an array of strings is
/// rejected, as are blank keywords.
pub fn parse_keyword_set(raw: &str) -> Result<KeywordSet, ServiceError> {
    let keywords: Vec<String> = serde_json::from_str(raw).map_err(|e| {
        ServiceError::BadInput(format!("keywords must be a JSON array of strings: {}", e))
    })?;

    if keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(ServiceError::BadInput("keywords must not be blank".to_string()));
    }
    Ok(keywords.into_iter().collect())
}

/// Parse a session id given as text.
pub fn parse_session_id(raw: &str) -> Result<SessionId, ServiceError> {
    raw.trim()
        .parse()
        .map_err(|_| ServiceError::BadInput(format!("invalid game id '{}'", raw)))
}

/// Require a non-blank field.
pub(crate) fn required<'a>(name: &str, value: &'a str) -> Result<&'a str, ServiceError> {
    if value.trim().is_empty() {
        Err(ServiceError::BadInput(format!("{} is required", name)))
    } else {
        Ok(value)
    }
}
