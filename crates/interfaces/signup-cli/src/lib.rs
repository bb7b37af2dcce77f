pub mod commands;
pub mod input;

use clap::ValueEnum;
use signup_core::AuthenticationState;

#[derive(ValueEnum, Clone, Debug, Copy)]
pub enum CliAuthState {
    Unauthenticated,
    Authenticating,
    Authenticated,
}

impl From<CliAuthState> for AuthenticationState {
    fn from(s: CliAuthState) -> Self {
        match s {
            CliAuthState::Unauthenticated => AuthenticationState::Unauthenticated,
            CliAuthState::Authenticating => AuthenticationState::Authenticating,
            CliAuthState::Authenticated => AuthenticationState::Authenticated,
        }
    }
}
