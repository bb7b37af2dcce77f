use tracing::debug;

/// Breached-password lookup. Its answer is informational and is not folded
/// into form validity.
#[async_trait::async_trait]
pub trait PasswordPwnedCheck: Send + Sync + 'static {
    /// `true` when the password passed the check.
    async fn check_password_pwned(&self, password: &str) -> bool;
}

/// Stand-in until a real breach service is connected. Always passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnwiredPwnedCheck;

#[async_trait::async_trait]
impl PasswordPwnedCheck for UnwiredPwnedCheck {
    async fn check_password_pwned(&self, _password: &str) -> bool {
        debug!("pwned-password check is not wired; passing");
        true
    }
}
