use std::sync::LazyLock;

use contracts::system::auth::{LoginRequest, UserInfo};
use regex::Regex;
use thiserror::Error;

/// Simulated round-trip of the sign-in request.
pub const LOGIN_LATENCY_MS: u32 = 1000;

pub const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    email: &'static str,
    password: &'static str,
    name: &'static str,
    role: &'static str,
}

const ACCOUNTS: [Account; 2] = [
    Account {
        email: "admin@kevinlab.co.kr",
        password: "admin123",
        name: "관리자",
        role: "admin",
    },
    Account {
        email: "user@kevinlab.co.kr",
        password: "user123",
        name: "사용자",
        role: "user",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("유효한 이메일 주소를 입력해주세요.")]
    InvalidEmail,
    #[error("비밀번호는 6자 이상이어야 합니다.")]
    PasswordTooShort,
    #[error("이메일 또는 비밀번호가 올바르지 않습니다.")]
    BadCredentials,
}

static EMAIL_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

fn is_valid_email(email: &str) -> bool {
    match &*EMAIL_PATTERN {
        Ok(pattern) => pattern.is_match(email),
        Err(err) => {
            log::error!("email pattern failed to compile: {}", err);
            false
        }
    }
}

/// Form-level checks, run before any lookup.
pub fn validate(request: &LoginRequest) -> Result<(), LoginError> {
    if !is_valid_email(&request.email) {
        return Err(LoginError::InvalidEmail);
    }
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(LoginError::PasswordTooShort);
    }
    Ok(())
}

/// Checks the request against the built-in accounts.
pub fn authenticate(request: &LoginRequest) -> Result<UserInfo, LoginError> {
    validate(request)?;
    ACCOUNTS
        .iter()
        .find(|account| account.email == request.email && account.password == request.password)
        .map(|account| UserInfo {
            email: account.email.to_string(),
            name: account.name.to_string(),
            role: account.role.to_string(),
        })
        .ok_or(LoginError::BadCredentials)
}
