//! User DTOs
//!
//! Request and response bodies use camelCase field names on the wire.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: i64,
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub first_name: String,
    pub last_name: String,
    /// Only present when viewing your own profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub current_password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_camel_case() {
        let body = r#"{
            "email": "adam@example.com",
            "firstName": "Adam",
            "lastName": "Anderson",
            "password": "hunter22"
        }"#;
        let request: RegisterRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.first_name, "Adam");
        assert_eq!(request.last_name, "Anderson");
    }

    #[test]
    fn test_user_response_hides_absent_email() {
        let response = UserResponse {
            first_name: "Adam".to_string(),
            last_name: "Anderson".to_string(),
            email: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("email"));

        let with_email = UserResponse {
            email: Some("adam@example.com".to_string()),
            ..response
        };
        let json = serde_json::to_string(&with_email).unwrap();
        assert!(json.contains("\"email\":\"adam@example.com\""));
    }

    #[test]
    fn test_update_request_partial_body() {
        let request: UpdateUserRequest =
            serde_json::from_str(r#"{"firstName": "Ada"}"#).unwrap();
        assert_eq!(request.first_name.as_deref(), Some("Ada"));
        assert!(request.email.is_none());
        assert!(request.password.is_none());
    }
}
