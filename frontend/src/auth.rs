use crate::api::AuthApi;
use crate::error::ApiError;
use crate::forms::{LoginForm, SignupForm};
use crate::models::AuthResponse;

pub const AUTH_ROUTE: &str = "/";
pub const DASHBOARD_ROUTE: &str = "/dashboard";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    fn fallback(&self) -> &'static str {
        match self {
            AuthMode::Login => "Login failed",
            AuthMode::Signup => "Signup failed",
        }
    }

    fn network_prefix(&self) -> &'static str {
        match self {
            AuthMode::Login => "Login error",
            AuthMode::Signup => "Signup error",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        }
    }
}

fn outcome(mode: AuthMode, result: Result<AuthResponse, ApiError>) -> Result<(), String> {
    match result {
        Ok(resp) if resp.success => Ok(()),
        Ok(resp) => Err(resp
            .error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| mode.fallback().to_string())),
        Err(err @ ApiError::Network(_)) => {
            log::error!("{}: {}", mode.network_prefix(), err);
            Err(err.user_message(mode.network_prefix()))
        }
        Err(err) => {
            log::warn!("{}: {}", mode.fallback(), err);
            Err(err.user_message(mode.fallback()))
        }
    }
}

/// `Ok` means the session is open and the page should navigate to the dashboard.
/// `Err` carries the text for the error banner.
pub async fn login<A: AuthApi + ?Sized>(api: &A, form: &LoginForm) -> Result<(), String> {
    let request = form.validate().map_err(|e| e.to_string())?;
    outcome(AuthMode::Login, api.login(&request).await)
}

/// Password confirmation is checked before anything is sent.
pub async fn signup<A: AuthApi + ?Sized>(api: &A, form: &SignupForm) -> Result<(), String> {
    let request = form.validate().map_err(|e| e.to_string())?;
    outcome(AuthMode::Signup, api.signup(&request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_flag_decides_outcome() {
        let ok = AuthResponse {
            success: true,
            error: None,
        };
        assert_eq!(outcome(AuthMode::Login, Ok(ok)), Ok(()));
        let refused = AuthResponse {
            success: false,
            error: None,
        };
        assert_eq!(
            outcome(AuthMode::Signup, Ok(refused)),
            Err("Signup failed".to_string())
        );
    }

    #[test]
    fn network_failure_is_prefixed() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(
            outcome(AuthMode::Login, Err(err)),
            Err("Login error: connection refused".to_string())
        );
    }

    #[test]
    fn status_error_uses_server_text() {
        let err = ApiError::Status {
            status: 401,
            message: Some("Invalid credentials".to_string()),
        };
        assert_eq!(
            outcome(AuthMode::Login, Err(err)),
            Err("Invalid credentials".to_string())
        );
    }
}
