use serde::{Deserialize, Serialize};

/// Request body for login. Fields default to empty so that an absent field
/// and an empty one fail validation the same way.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for user registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
}

/// Response for login and register: a human-readable message plus where the
/// client should navigate next.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub message: String,
    pub redirect_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_accepts_camel_case_full_name() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"username":"alice","password":"pw123","email":"alice@x.com","fullName":"Alice A"}"#,
        )
        .unwrap();
        assert_eq!(req.full_name, "Alice A");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let req: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(req.username.is_empty());
        assert!(req.password.is_empty());
    }

    #[test]
    fn auth_response_uses_camel_case() {
        let json = serde_json::to_string(&AuthResponse {
            message: "Login successful!".into(),
            redirect_url: "/dashboard".into(),
        })
        .unwrap();
        assert!(json.contains("redirectUrl"));
    }
}
