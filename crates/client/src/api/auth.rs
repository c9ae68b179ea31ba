//! Auth service: login and registration.

use chirp_shared::{ApiError, AuthPayload, LoginRequest, RegisterRequest};

use super::ApiClient;

#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.client.post_json("/login", &body).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, ApiError> {
        self.client.post_json("/register", request).await
    }
}
