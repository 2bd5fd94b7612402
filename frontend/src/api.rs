//! REST adapter for the finance API.
//!
//! One method per resource/verb pair. Nothing here retries, caches or times
//! out; callers decide what a failure means for the page.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::RequestCredentials;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{
    AuthResponse, Budget, DashboardSummary, Goal, GoalContribution, LoginRequest, MonthlyPoint,
    NewBudget, NewGoal, NewTransaction, SignupRequest, Transaction, User,
};

#[async_trait(?Send)]
pub trait AuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;
    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError>;
    async fn me(&self) -> Result<User, ApiError>;
    async fn logout(&self) -> Result<(), ApiError>;
}

#[async_trait(?Send)]
pub trait DataFetcher {
    async fn dashboard(&self) -> Result<DashboardSummary, ApiError>;

    async fn transactions(&self) -> Result<Vec<Transaction>, ApiError>;
    async fn create_transaction(&self, transaction: &NewTransaction) -> Result<(), ApiError>;
    async fn delete_transaction(&self, id: i64) -> Result<(), ApiError>;

    async fn budgets(&self) -> Result<Vec<Budget>, ApiError>;
    async fn create_budget(&self, budget: &NewBudget) -> Result<(), ApiError>;
    async fn delete_budget(&self, id: i64) -> Result<(), ApiError>;

    async fn goals(&self) -> Result<Vec<Goal>, ApiError>;
    async fn create_goal(&self, goal: &NewGoal) -> Result<(), ApiError>;
    async fn contribute_to_goal(
        &self,
        id: i64,
        contribution: &GoalContribution,
    ) -> Result<(), ApiError>;
    async fn delete_goal(&self, id: i64) -> Result<(), ApiError>;

    async fn monthly_analytics(&self) -> Result<Vec<MonthlyPoint>, ApiError>;
}

/// Browser `fetch` client. Session cookies ride along on every request.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpClient {
    config: AppConfig,
}

impl HttpClient {
    pub fn new(config: AppConfig) -> Self {
        HttpClient { config }
    }

    fn builder(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.credentials(RequestCredentials::Include)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.config.url(path);
        let resp = self
            .builder(Request::get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(ensure_ok(resp).await?).await
    }

    async fn send_json<B: Serialize>(
        &self,
        builder: RequestBuilder,
        body: &B,
    ) -> Result<Response, ApiError> {
        let request = self
            .builder(builder)
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, ApiError> {
        let url = self.config.url(path);
        let resp = self.send_json(Request::post(&url), body).await?;
        ensure_ok(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.config.url(path);
        let resp = self
            .builder(Request::delete(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        ensure_ok(resp).await.map(|_| ())
    }

    /// Auth endpoints answer with `{success, error}` on both paths, so the
    /// body of a failed response is read for its message.
    async fn auth_post<B: Serialize>(&self, path: &str, body: &B) -> Result<AuthResponse, ApiError> {
        let url = self.config.url(path);
        let resp = self.send_json(Request::post(&url), body).await?;
        read_json(ensure_ok(resp).await?).await
    }
}

async fn ensure_ok(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let message = match resp.text().await {
        Ok(body) => error_message_from_body(&body),
        Err(_) => None,
    };
    log::warn!("request to {} failed with status {}", resp.url(), status);
    Err(ApiError::Status { status, message })
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pulls the `error` field out of a JSON error body, or keeps a short plain-text body.
pub fn error_message_from_body(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<AuthResponse>(body) {
        Ok(parsed) => parsed.error.filter(|e| !e.trim().is_empty()),
        Err(_) if !body.starts_with('<') && body.len() <= 200 => Some(body.to_string()),
        Err(_) => None,
    }
}

#[async_trait(?Send)]
impl AuthApi for HttpClient {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.auth_post("/api/auth/login", request).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        self.auth_post("/api/auth/signup", request).await
    }

    async fn me(&self) -> Result<User, ApiError> {
        self.get_json("/api/auth/me").await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let url = self.config.url("/api/auth/logout");
        let resp = self
            .builder(Request::post(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        ensure_ok(resp).await.map(|_| ())
    }
}

#[async_trait(?Send)]
impl DataFetcher for HttpClient {
    async fn dashboard(&self) -> Result<DashboardSummary, ApiError> {
        self.get_json("/api/dashboard").await
    }

    async fn transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.get_json("/api/transactions").await
    }

    async fn create_transaction(&self, transaction: &NewTransaction) -> Result<(), ApiError> {
        self.post_json("/api/transactions", transaction).await.map(|_| ())
    }

    async fn delete_transaction(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/transactions/{}", id)).await
    }

    async fn budgets(&self) -> Result<Vec<Budget>, ApiError> {
        self.get_json("/api/budgets").await
    }

    async fn create_budget(&self, budget: &NewBudget) -> Result<(), ApiError> {
        self.post_json("/api/budgets", budget).await.map(|_| ())
    }

    async fn delete_budget(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/budgets/{}", id)).await
    }

    async fn goals(&self) -> Result<Vec<Goal>, ApiError> {
        self.get_json("/api/goals").await
    }

    async fn create_goal(&self, goal: &NewGoal) -> Result<(), ApiError> {
        self.post_json("/api/goals", goal).await.map(|_| ())
    }

    async fn contribute_to_goal(
        &self,
        id: i64,
        contribution: &GoalContribution,
    ) -> Result<(), ApiError> {
        let url = self.config.url(&format!("/api/goals/{}", id));
        let resp = self.send_json(Request::put(&url), contribution).await?;
        ensure_ok(resp).await.map(|_| ())
    }

    async fn delete_goal(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/goals/{}", id)).await
    }

    async fn monthly_analytics(&self) -> Result<Vec<MonthlyPoint>, ApiError> {
        self.get_json("/api/analytics/monthly").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_is_extracted() {
        assert_eq!(
            error_message_from_body(r#"{"success": false, "error": "Invalid credentials"}"#),
            Some("Invalid credentials".to_string())
        );
        assert_eq!(error_message_from_body(r#"{"success": false}"#), None);
    }

    #[test]
    fn plain_text_bodies_are_kept_html_dropped() {
        assert_eq!(error_message_from_body("Not Found"), Some("Not Found".to_string()));
        assert_eq!(error_message_from_body("<!doctype html><p>500</p>"), None);
        assert_eq!(error_message_from_body("   "), None);
    }
}
