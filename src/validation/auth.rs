use crate::db::models::auth::{AuthenticateRequest, RegisterRequest};
use crate::error::AppError;

use super::{require_text, validate_input};

pub fn validate_authenticate_request(req: &AuthenticateRequest) -> Result<(), AppError> {
    validate_input(req)?;
    require_text(&req.user_name_or_email_address, "User name or email is required")?;
    Ok(())
}

pub fn validate_register_request(req: &RegisterRequest) -> Result<(), AppError> {
    validate_input(req)?;
    require_text(&req.user_name, "User name is required")?;
    require_text(&req.name, "Name is required")?;
    require_text(&req.surname, "Surname is required")?;
    if req.user_name.trim().contains(char::is_whitespace) {
        return Err(AppError::validation("User name cannot contain spaces"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(user_name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            user_name: user_name.to_string(),
            email_address: email.to_string(),
            name: "Thandi".to_string(),
            surname: "Mokoena".to_string(),
            password: password.to_string(),
        }
    }

    fn request(login: &str, password: &str) -> AuthenticateRequest {
        AuthenticateRequest {
            user_name_or_email_address: login.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_authenticate_request_validation() {
        assert!(validate_authenticate_request(&request("admin", "123qwe")).is_ok());
        assert!(validate_authenticate_request(&request("", "123qwe")).is_err());
        assert!(validate_authenticate_request(&request("   ", "123qwe")).is_err());
        assert!(validate_authenticate_request(&request("admin", "")).is_err());
    }

    #[test]
    fn test_register_request_validation() {
        let email = "admin@example.com";
        assert!(validate_register_request(&register("admin", email, "123qwe")).is_ok());
        assert!(validate_register_request(&register("", email, "123qwe")).is_err());
        assert!(validate_register_request(&register("ad min", email, "123qwe")).is_err());
        assert!(validate_register_request(&register("admin", "not-an-email", "123qwe")).is_err());
        assert!(validate_register_request(&register("admin", email, "123")).is_err());
    }
}
