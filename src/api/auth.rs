use serde_json::json;

use super::{
    client::ApiClient,
    operations,
    types::{ApiError, AuthPayload, LoginInput, RegisterInput, User},
};

impl ApiClient {
    /// Creates an account and establishes a session. The returned token is
    /// stored before the payload is handed back.
    pub async fn register(&self, input: RegisterInput) -> Result<AuthPayload, ApiError> {
        let payload: AuthPayload = self
            .execute(operations::REGISTER, "register", json!({ "input": input }))
            .await?;
        self.session().set_credential(&payload.token);
        Ok(payload)
    }

    pub async fn login(&self, input: LoginInput) -> Result<AuthPayload, ApiError> {
        let payload: AuthPayload = self
            .execute(operations::LOGIN, "login", json!({ "input": input }))
            .await?;
        self.session().set_credential(&payload.token);
        Ok(payload)
    }

    /// Refreshes the current user from the identity operation.
    pub async fn me(&self) -> Result<User, ApiError> {
        self.execute(operations::ME, "me", json!({})).await
    }
}
