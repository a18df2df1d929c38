use reqwest::StatusCode;
use std::fmt;

/// A remote API answered with a non-success status.
///
/// The binary maps it to `exitcode::UNAVAILABLE`, like a failed connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiStatusError {
    status: StatusCode,
    body: String,
}

impl ApiStatusError {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl fmt::Display for ApiStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API request failed with status {}: {}", self.status, self.body)
    }
}

impl std::error::Error for ApiStatusError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_status_and_body() {
        let err = ApiStatusError::new(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(
            err.to_string(),
            "API request failed with status 502 Bad Gateway: upstream down"
        );
    }

    #[test]
    fn test_downcast_through_context() {
        use anyhow::Context;

        let err = Err::<(), _>(ApiStatusError::new(StatusCode::UNAUTHORIZED, ""))
            .context("Failed to translate")
            .unwrap_err();

        let found = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<ApiStatusError>());
        assert_eq!(found.map(ApiStatusError::status), Some(StatusCode::UNAUTHORIZED));
    }
}
