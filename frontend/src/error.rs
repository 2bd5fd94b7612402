/// Failures talking to the REST API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("could not read response: {0}")]
    Decode(String),
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Text to show the user: the server's own message when it sent one.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ApiError::Network(detail) => format!("{}: {}", fallback, detail),
            _ => fallback.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401, .. })
    }
}

/// Client-side form checks that block a request from being sent.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{0} must be a number")]
    NotANumber(&'static str),
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("{0} is out of range")]
    OutOfRange(&'static str),
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Outcome of a dashboard mutation that did not go through.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartError {
    #[error("no chart container with id `{0}`")]
    MissingContainer(String),
    #[error("invalid chart config: {0}")]
    Config(String),
    #[error("chart construction failed: {0}")]
    Construct(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_fallback() {
        let err = ApiError::Status {
            status: 400,
            message: Some("Username already exists".to_string()),
        };
        assert_eq!(err.user_message("Signup failed"), "Username already exists");
    }

    #[test]
    fn blank_server_message_uses_fallback() {
        let err = ApiError::Status {
            status: 500,
            message: Some("  ".to_string()),
        };
        assert_eq!(err.user_message("Login failed"), "Login failed");
        assert_eq!(
            ApiError::Network("offline".to_string()).user_message("Login error"),
            "Login error: offline"
        );
    }
}
