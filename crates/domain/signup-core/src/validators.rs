//! Per-field facts derived from raw text. Lengths count Unicode scalar values.

use signup_config::{MIN_PASSWORD_LEN, MIN_USERNAME_LEN};

pub fn is_username_valid(username: &str) -> bool {
    username.chars().count() >= MIN_USERNAME_LEN
}

pub fn is_password_empty(password: &str) -> bool {
    password.is_empty()
}

pub fn is_password_length_sufficient(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

pub fn is_password_matched(password: &str, confirm_password: &str) -> bool {
    password == confirm_password
}
