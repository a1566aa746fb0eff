//! Route table compilation and matching.
//!
//! Rules match by path segment: `/admin` covers `/admin` and `/admin/users`
//! but not `/administrator`. The longest matching rule wins. Both rule
//! prefixes and requested paths are normalized first, so `//admin`,
//! `/./admin` and `/home/../admin` all resolve to `/admin`.

use crate::config::RouteConfig;

/// Compiled protected destination.
#[derive(Debug, Clone)]
pub struct RouteRule {
    pub prefix: String,
    pub roles: Vec<String>, // empty => any authenticated user
}

impl RouteRule {
    fn covers(&self, path: &str) -> bool {
        if self.prefix.is_empty() {
            return true; // "/"
        }
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    pub fn compile(raw: &[RouteConfig]) -> Self {
        let mut rules: Vec<RouteRule> = raw
            .iter()
            .map(|r| RouteRule {
                prefix: normalize_path(&r.path),
                roles: r.roles.clone(),
            })
            .collect();
        // longest first so the first hit is the most specific
        rules.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { rules }
    }

    /// Most specific rule covering `path`, or `None` for a public path.
    pub fn lookup(&self, path: &str) -> Option<&RouteRule> {
        let path = normalize_path(path);
        self.rules.iter().find(|r| r.covers(&path))
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }
}

/// Canonical form used for matching: query/fragment dropped, empty and `.`
/// segments removed, `..` resolved (never above the root), no trailing
/// slash. The root itself is the empty string.
pub fn normalize_path(p: &str) -> String {
    let end = p.find(['?', '#']).unwrap_or(p.len());
    let mut segments: Vec<&str> = Vec::new();
    for seg in p[..end].split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.iter().map(|s| format!("/{s}")).collect()
}
