use signup_core::AuthenticationState;

#[derive(Debug, Clone)]
pub enum FormCommand {
    // Field edits
    SetUsername(String),
    SetPassword(String),
    SetConfirmPassword(String),

    // Submission flow passthrough
    SetAuthenticationState(AuthenticationState),
}
