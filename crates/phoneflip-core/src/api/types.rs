use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{User, UserType};
use crate::util::normalize_text_option;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginMethod {
    #[default]
    Email,
    Phone,
    Google,
    Facebook,
    Apple,
}

/// Body for `POST /auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    pub login_method: LoginMethod,
}

impl LoginRequest {
    pub fn email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            phone: None,
            password: password.into(),
            login_method: LoginMethod::Email,
        }
    }

    pub fn phone(phone: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: None,
            phone: Some(phone.into()),
            password: password.into(),
            login_method: LoginMethod::Phone,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let identifier = match self.login_method {
            LoginMethod::Phone => self.phone.clone(),
            _ => self.email.clone(),
        };
        if normalize_text_option(identifier).is_none() {
            return Err(Error::InvalidInput(
                "Email or phone is required".to_string(),
            ));
        }
        if self.password.trim().is_empty() {
            return Err(Error::InvalidInput("Password is required".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"[REDACTED]")
            .field("login_method", &self.login_method)
            .finish()
    }
}

/// Body for `POST /auth/register`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub user_type: UserType,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    pub password: String,
    pub login_method: LoginMethod,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("user_type", &self.user_type)
            .field("city", &self.city)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Registration form as typed by the user, before validation.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub user_type: UserType,
    pub city: String,
    pub address: Option<String>,
    pub shop_name: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// Validate locally and build the request; nothing is sent on failure.
    pub fn into_request(self) -> Result<RegisterRequest> {
        let required = [
            ("Name", &self.name),
            ("Email", &self.email),
            ("Phone", &self.phone),
            ("City", &self.city),
            ("Password", &self.password),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(Error::InvalidInput(format!("{label} is required")));
            }
        }
        if self.password != self.confirm_password {
            return Err(Error::InvalidInput("Passwords do not match".to_string()));
        }

        Ok(RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            user_type: self.user_type,
            city: self.city.trim().to_string(),
            address: normalize_text_option(self.address),
            shop_name: normalize_text_option(self.shop_name),
            password: self.password,
            login_method: LoginMethod::Email,
        })
    }
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RegisterForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialUserInfo {
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// Body for `POST /auth/social-login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLoginRequest {
    pub provider: LoginMethod,
    pub token: String,
    pub user_info: SocialUserInfo,
}

impl SocialLoginRequest {
    pub fn validate(&self) -> Result<()> {
        if matches!(self.provider, LoginMethod::Email | LoginMethod::Phone) {
            return Err(Error::InvalidInput(
                "Social login needs google, facebook or apple".to_string(),
            ));
        }
        if self.user_info.email.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Email not provided by social provider".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for SocialLoginRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SocialLoginRequest")
            .field("provider", &self.provider)
            .field("token", &"[REDACTED]")
            .field("user_info", &self.user_info)
            .finish()
    }
}

/// Successful auth response.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("user", &self.user)
            .finish()
    }
}

fn default_token_type() -> String {
    "bearer".to_string()
}
