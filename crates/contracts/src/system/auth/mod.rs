use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub email: String,
    pub name: String,
    pub role: String,
}

impl UserInfo {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Authentication blob persisted in browser-local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAuth {
    pub user: UserInfo,
    pub token: String,
    pub expiry: DateTime<Utc>,
}

impl StoredAuth {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn user() -> UserInfo {
        UserInfo {
            email: "admin@kevinlab.co.kr".to_string(),
            name: "관리자".to_string(),
            role: "admin".to_string(),
        }
    }

    #[test]
    fn test_stored_auth_expiry() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let auth = StoredAuth {
            user: user(),
            token: "mock-token".to_string(),
            expiry: now + Duration::days(1),
        };
        assert!(auth.is_valid_at(now));
        assert!(!auth.is_valid_at(now + Duration::days(1)));
    }

    #[test]
    fn test_stored_auth_json_shape() {
        let json = r#"{
            "user": {"email": "user@kevinlab.co.kr", "name": "사용자", "role": "user"},
            "token": "abc",
            "expiry": "2024-03-16T12:00:00Z"
        }"#;
        let auth: StoredAuth = serde_json::from_str(json).unwrap();
        assert_eq!(auth.user.role, "user");
        assert!(!auth.user.is_admin());
        assert_eq!(
            auth.expiry,
            Utc.with_ymd_and_hms(2024, 3, 16, 12, 0, 0).unwrap()
        );
    }
}
