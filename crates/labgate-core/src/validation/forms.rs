//! Per-screen form rules.

use crate::protocol::{LoginRequest, RegisterRequest};

use super::{
    email, min_length, password_complexity, required, rut, ValidationErrors,
    LOGIN_PASSWORD_MIN_LEN, PASSWORD_MIN_LEN,
};

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut errs = ValidationErrors::default();
        errs.check("username", required(&self.username));
        errs.check("password", required(&self.password));
        errs.check("password", min_length(&self.password, LOGIN_PASSWORD_MIN_LEN));
        errs
    }

    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// Two-step sign-up form: personal data first, then account data.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub last_name: String,
    pub second_last_name: String,
    pub rut: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    /// Fields that gate moving on to the second step.
    pub fn validate_personal(&self) -> ValidationErrors {
        let mut errs = ValidationErrors::default();
        errs.check("name", required(&self.name));
        errs.check("lastName", required(&self.last_name));
        errs.check("secondLastName", required(&self.second_last_name));
        errs.check("rut", required(&self.rut));
        errs.check("rut", rut(&self.rut));
        errs
    }

    pub fn validate_account(&self) -> ValidationErrors {
        let mut errs = ValidationErrors::default();
        errs.check("username", required(&self.username));
        errs.check("email", required(&self.email));
        errs.check("email", email(&self.email));
        errs.check("password", required(&self.password));
        errs.check("password", min_length(&self.password, PASSWORD_MIN_LEN));
        errs.check("password", password_complexity(&self.password));
        errs
    }

    pub fn validate(&self) -> ValidationErrors {
        let mut errs = self.validate_personal();
        errs.merge(self.validate_account());
        errs
    }

    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            name: self.name.clone(),
            first_lastname: self.last_name.clone(),
            second_lastname: self.second_last_name.clone(),
            email: self.email.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            rut: self.rut.clone(),
            role: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub repeat_password: String,
}

impl ChangePasswordForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut errs = ValidationErrors::default();
        errs.check("currentPassword", required(&self.current_password));
        errs.check("newPassword", required(&self.new_password));
        errs.check("newPassword", min_length(&self.new_password, PASSWORD_MIN_LEN));
        errs.check("newPassword", password_complexity(&self.new_password));
        errs.check("repeatPassword", required(&self.repeat_password));
        if self.new_password != self.repeat_password {
            errs.set_mismatch();
        }
        errs
    }
}
