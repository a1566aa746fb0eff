//! Role normalization.
//!
//! Backends hand out roles as `ROLE_ADMIN`, `admin`, ` Role_Admin ` and so on.
//! Every comparison in the workspace goes through [`normalize_role`] so the
//! trim/uppercase/prefix rule lives in exactly one place.

/// Prefix some backends (Spring Security style) put in front of role names.
pub const ROLE_PREFIX: &str = "ROLE_";

/// Trim, uppercase, then strip one leading `ROLE_`.
///
/// ```
/// use labgate_core::normalize_role;
/// assert_eq!(normalize_role(" role_admin "), "ADMIN");
/// assert_eq!(normalize_role("Lab_Tech"), "LAB_TECH");
/// ```
pub fn normalize_role(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    match upper.strip_prefix(ROLE_PREFIX) {
        Some(rest) => rest.to_string(),
        None => upper,
    }
}

/// Normalized role, or `None` when nothing is left after normalization.
/// A role that normalizes to the empty string names no role at all.
pub fn normalized(raw: &str) -> Option<String> {
    let n = normalize_role(raw);
    if n.is_empty() {
        None
    } else {
        Some(n)
    }
}

/// Two role strings are equivalent iff they normalize to the same non-empty name.
pub fn roles_match(a: &str, b: &str) -> bool {
    match (normalized(a), normalized(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Whether `held` (the stored role, if any) is one of `required`.
///
/// Required entries that normalize to nothing are ignored. An absent held
/// role never matches. Callers decide what an empty `required` means.
pub fn role_in<S: AsRef<str>>(held: Option<&str>, required: &[S]) -> bool {
    let Some(held) = held.and_then(normalized) else {
        return false;
    };
    required
        .iter()
        .filter_map(|r| normalized(r.as_ref()))
        .any(|r| r == held)
}
