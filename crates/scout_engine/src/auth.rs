use async_trait::async_trait;

/// Seam to the external auth collaborator: `validateToken(token) -> bool`.
/// Token acquisition and refresh happen elsewhere; the transport only asks
/// whether the token it was handed is still good.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn validate(&self, token: &str) -> bool;
}

/// Validator for anonymous deployments where no token gate exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAllValidator;

#[async_trait]
impl TokenValidator for AllowAllValidator {
    async fn validate(&self, _token: &str) -> bool {
        true
    }
}
