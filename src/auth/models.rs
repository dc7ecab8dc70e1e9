//! Authentication Models
//! Mission: Define secure user and credential data structures

use serde::{Deserialize, Serialize};

/// Role tag required for catalog mutations
pub const ADMIN_ROLE: &str = "ADMIN";

/// Delimiter between role tags in the stored role list
pub const ROLE_DELIMITER: char = ';';

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub login: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub roles: String, // delimiter-separated tags, e.g. "ADMIN;STAFF"
    pub email: String,
}

impl User {
    /// Role tags split on the delimiter, empty entries dropped
    pub fn role_tags(&self) -> Vec<&str> {
        self.roles
            .split(ROLE_DELIMITER)
            .filter(|r| !r.is_empty())
            .collect()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.role_tags().iter().any(|r| *r == role)
    }
}

/// JWT Claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,    // user id
    pub exp: usize, // expiration timestamp
}

/// Registration request body
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub login: String,
    pub password: String,
    pub email: String,
}

/// Registration response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: i64,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Login response: public profile fields plus the bearer token
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: i64,
    pub login: String,
    pub name: String,
    pub roles: String,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_roles(roles: &str) -> User {
        User {
            id: 1,
            name: "Test User".to_string(),
            login: "test".to_string(),
            password_hash: "hash".to_string(),
            roles: roles.to_string(),
            email: "test@example.com".to_string(),
        }
    }

    #[test]
    fn test_role_tags_split_on_delimiter() {
        let user = user_with_roles("ADMIN;STAFF");
        assert_eq!(user.role_tags(), vec!["ADMIN", "STAFF"]);

        assert!(user.has_role(ADMIN_ROLE));
        assert!(user.has_role("STAFF"));
        assert!(!user.has_role("VIEWER"));
    }

    #[test]
    fn test_empty_role_list_has_no_roles() {
        let user = user_with_roles("");
        assert!(user.role_tags().is_empty());
        assert!(!user.has_role(ADMIN_ROLE));
    }

    #[test]
    fn test_role_match_is_exact() {
        // "ADMINISTRATOR" must not satisfy an ADMIN check
        let user = user_with_roles("ADMINISTRATOR");
        assert!(!user.has_role(ADMIN_ROLE));
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = user_with_roles("ADMIN");
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("hash"));
    }
}
