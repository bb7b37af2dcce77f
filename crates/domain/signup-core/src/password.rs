use serde::{Deserialize, Serialize};

use crate::validators;

/// Single ranked verdict over the password fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PasswordStatus {
    Valid,
    #[default]
    Empty,
    NoMatch,
    TooShort,
}

impl PasswordStatus {
    /// First matching rule wins: empty, then mismatch, then length.
    pub fn reduce(is_empty: bool, is_matched: bool, is_length_sufficient: bool) -> Self {
        if is_empty {
            PasswordStatus::Empty
        } else if !is_matched {
            PasswordStatus::NoMatch
        } else if !is_length_sufficient {
            PasswordStatus::TooShort
        } else {
            PasswordStatus::Valid
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PasswordStatus::Valid => "",
            PasswordStatus::Empty => "Password must not be empty",
            PasswordStatus::NoMatch => "Passwords don't match",
            PasswordStatus::TooShort => "Password not long enough. Must at least be 6 characters",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordFacts {
    pub is_empty: bool,
    pub is_matched: bool,
    pub is_length_sufficient: bool,
}

impl PasswordFacts {
    pub fn derive(password: &str, confirm_password: &str) -> Self {
        Self {
            is_empty: validators::is_password_empty(password),
            is_matched: validators::is_password_matched(password, confirm_password),
            is_length_sufficient: validators::is_password_length_sufficient(password),
        }
    }

    pub fn status(self) -> PasswordStatus {
        PasswordStatus::reduce(self.is_empty, self.is_matched, self.is_length_sufficient)
    }
}

impl Default for PasswordFacts {
    fn default() -> Self {
        Self::derive("", "")
    }
}
