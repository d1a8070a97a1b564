//! Authentication endpoints.

use serde::Deserialize;
use serde_json::json;

use infradesk_entity::{Credentials, LoginResponse, MeResponse};

use crate::client::ApiClient;
use crate::outcome::ApiOutcome;

/// Generic acknowledgement body (`{ "message": "..." }`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiClient {
    /// `POST /login/`: exchange credentials for an access token.
    pub async fn login(&self, credentials: &Credentials) -> ApiOutcome<LoginResponse> {
        self.post("/login/", None, credentials).await
    }

    /// `GET /me/`: profile of the token's owner.
    pub async fn me(&self, token: &str) -> ApiOutcome<MeResponse> {
        self.get("/me/", Some(token)).await
    }

    /// `POST /auth/forgot-password`: request a reset link by email.
    pub async fn forgot_password(&self, email: &str) -> ApiOutcome<Acknowledgement> {
        self.post("/auth/forgot-password", None, &json!({ "email": email }))
            .await
    }

    /// `POST /auth/reset-password`: set a new password with a reset token.
    pub async fn reset_password(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> ApiOutcome<Acknowledgement> {
        let body = json!({ "token": reset_token, "newPassword": new_password });
        self.post("/auth/reset-password", None, &body).await
    }
}
