//! Form validation rules.
//!
//! Field validators follow the usual reactive-form convention: an empty value
//! is only reported by `required`, every other rule lets it through. Form
//! structs in [`forms`] combine the rules per screen.

pub mod forms;

use std::sync::LazyLock;

use regex::Regex;

pub use forms::{ChangePasswordForm, LoginForm, RegisterForm};

/// Minimum password length for new passwords.
pub const PASSWORD_MIN_LEN: usize = 8;
/// Minimum password length accepted by the login form.
pub const LOGIN_PASSWORD_MIN_LEN: usize = 5;
/// Characters that satisfy the "special character" rule.
pub const PASSWORD_SPECIALS: &str = r#"!@#$%^&*(),.?"':{}|<>_-+=~`[]\;/"#;

const EMAIL_MAX_LEN: usize = 254;
const EMAIL_LOCAL_MAX_LEN: usize = 64;

#[allow(clippy::expect_used)] // literal pattern
static RUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{7,8}-[0-9kK]$").expect("rut pattern"));

#[allow(clippy::expect_used)] // literal pattern
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
        r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    ))
    .expect("email pattern")
});

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Required,
    MinLength { required: usize, actual: usize },
    /// Value does not match the field's pattern (RUT).
    Pattern,
    Email,
    PasswordComplexity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub error: FieldError,
}

/// Outcome of validating a whole form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    issues: Vec<FieldIssue>,
    mismatch: bool,
}

impl ValidationErrors {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty() && !self.mismatch
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn errors_for(&self, field: &str) -> Vec<&FieldError> {
        self.issues
            .iter()
            .filter(|i| i.field == field)
            .map(|i| &i.error)
            .collect()
    }

    pub fn has(&self, field: &str, error: &FieldError) -> bool {
        self.issues.iter().any(|i| i.field == field && &i.error == error)
    }

    /// Cross-field error: the two new-password entries differ.
    pub fn mismatch(&self) -> bool {
        self.mismatch
    }

    pub(crate) fn set_mismatch(&mut self) {
        self.mismatch = true;
    }

    pub(crate) fn check(&mut self, field: &'static str, result: Option<FieldError>) {
        if let Some(error) = result {
            self.issues.push(FieldIssue { field, error });
        }
    }

    pub(crate) fn merge(&mut self, other: ValidationErrors) {
        self.issues.extend(other.issues);
        self.mismatch |= other.mismatch;
    }
}

pub fn required(value: &str) -> Option<FieldError> {
    value.is_empty().then_some(FieldError::Required)
}

pub fn min_length(value: &str, min: usize) -> Option<FieldError> {
    if value.is_empty() {
        return None;
    }
    let actual = value.chars().count();
    (actual < min).then_some(FieldError::MinLength { required: min, actual })
}

/// Chilean RUT: 7 or 8 digits, a dash, and a check digit (0-9 or K).
pub fn rut(value: &str) -> Option<FieldError> {
    if value.is_empty() || RUT_RE.is_match(value) {
        None
    } else {
        Some(FieldError::Pattern)
    }
}

pub fn email(value: &str) -> Option<FieldError> {
    if value.is_empty() {
        return None;
    }
    let local_ok = value
        .split_once('@')
        .is_some_and(|(local, _)| !local.is_empty() && local.len() <= EMAIL_LOCAL_MAX_LEN);
    if value.len() <= EMAIL_MAX_LEN && local_ok && EMAIL_RE.is_match(value) {
        None
    } else {
        Some(FieldError::Email)
    }
}

/// Per-rule breakdown of the password complexity policy, for live hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordChecks {
    pub min_length: bool,
    pub has_number: bool,
    pub has_upper: bool,
    pub has_lower: bool,
    pub has_special: bool,
}

impl PasswordChecks {
    pub fn of(value: &str) -> Self {
        Self {
            min_length: value.chars().count() >= PASSWORD_MIN_LEN,
            has_number: value.chars().any(|c| c.is_ascii_digit()),
            has_upper: value.chars().any(|c| c.is_ascii_uppercase()),
            has_lower: value.chars().any(|c| c.is_ascii_lowercase()),
            has_special: value.chars().any(|c| PASSWORD_SPECIALS.contains(c)),
        }
    }

    pub fn all(&self) -> bool {
        self.min_length && self.has_number && self.has_upper && self.has_lower && self.has_special
    }
}

pub fn password_complexity(value: &str) -> Option<FieldError> {
    if value.is_empty() || PasswordChecks::of(value).all() {
        None
    } else {
        Some(FieldError::PasswordComplexity)
    }
}
