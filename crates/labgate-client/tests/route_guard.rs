#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::sync::Arc;

use common::MockBackend;
use labgate_client::app_state::AppState;
use labgate_client::config::{self, ClientConfig, NavigationSection, RouteConfig};
use labgate_client::policy::routes::normalize_path;
use labgate_client::policy::{DenyReason, GuardDecision, RouteGuard};
use labgate_client::session::SessionState;
use labgate_client::store::{InMemoryStore, SessionStore};
use labgate_core::session::{ROLE_KEY, TOKEN_KEY, USERNAME_KEY};

const NONE: &[&str] = &[];

fn guard() -> RouteGuard {
    let cfg = ClientConfig::default();
    RouteGuard::new(&cfg.navigation, &cfg.routes)
}

fn logged_in(role: Option<&str>) -> SessionState {
    let store = Arc::new(InMemoryStore::new());
    store.set(TOKEN_KEY, "tok").unwrap();
    store.set(USERNAME_KEY, "u").unwrap();
    if let Some(r) = role {
        store.set(ROLE_KEY, r).unwrap();
    }
    SessionState::new(store)
}

fn anonymous() -> SessionState {
    SessionState::new(Arc::new(InMemoryStore::new()))
}

fn redirect(to: &str, reason: DenyReason) -> GuardDecision {
    GuardDecision::Redirect { to: to.into(), reason }
}

#[test]
fn no_session_goes_to_login() {
    let g = guard();
    let s = anonymous();
    assert_eq!(g.check(&s, NONE), redirect("/login", DenyReason::Unauthenticated));
    assert_eq!(g.check(&s, &["ADMIN"]), redirect("/login", DenyReason::Unauthenticated));
}

#[test]
fn empty_requirement_allows_any_role() {
    let g = guard();
    assert!(g.check(&logged_in(Some("ROLE_USER")), NONE).is_allowed());
    assert!(g.check(&logged_in(Some("whatever")), NONE).is_allowed());
    assert!(g.check(&logged_in(None), NONE).is_allowed());
}

#[test]
fn wrong_role_goes_home_not_login() {
    let g = guard();
    let d = g.check(&logged_in(Some("ROLE_USER")), &["ADMIN"]);
    assert_eq!(d, redirect("/home", DenyReason::Unauthorized));
    assert_eq!(d.redirect_target(), Some("/home"));
}

#[test]
fn missing_role_goes_home() {
    let g = guard();
    assert_eq!(
        g.check(&logged_in(None), &["ADMIN"]),
        redirect("/home", DenyReason::Unauthorized)
    );
}

#[test]
fn any_of_required_roles_is_enough() {
    let g = guard();
    let s = logged_in(Some(" role_lab_tech "));
    assert!(g.check(&s, &["ADMIN", "lab_tech"]).is_allowed());
    assert!(!g.check(&s, &["ADMIN", "SUPERVISOR"]).is_allowed());
}

#[test]
fn path_matching_by_segment() {
    let g = guard();
    let user = logged_in(Some("ROLE_USER"));
    let admin = logged_in(Some("ROLE_ADMIN"));

    // public
    assert!(g.check_path(&anonymous(), "/landing").is_allowed());
    assert!(g.check_path(&anonymous(), "/login").is_allowed());
    assert!(g.check_path(&anonymous(), "/administrator").is_allowed());

    // session only
    assert!(g.check_path(&user, "/home").is_allowed());
    assert!(g.check_path(&user, "/profile?tab=password").is_allowed());
    assert_eq!(
        g.check_path(&anonymous(), "/home/"),
        redirect("/login", DenyReason::Unauthenticated)
    );

    // admin feature
    assert!(g.check_path(&admin, "/admin").is_allowed());
    assert!(g.check_path(&admin, "/admin/laboratories").is_allowed());
    assert_eq!(
        g.check_path(&user, "/admin/users"),
        redirect("/home", DenyReason::Unauthorized)
    );
    assert_eq!(
        g.check_path(&anonymous(), "/admin/analysis"),
        redirect("/login", DenyReason::Unauthenticated)
    );

    // dot segments and repeated slashes resolve before matching
    for p in ["/./admin", "//admin", "/admin/./users", "/home/../admin", "/../admin"] {
        assert_eq!(
            g.check_path(&anonymous(), p),
            redirect("/login", DenyReason::Unauthenticated),
            "{p}"
        );
        assert_eq!(g.check_path(&user, p), redirect("/home", DenyReason::Unauthorized), "{p}");
    }
    assert!(g.check_path(&user, "/admin/../home").is_allowed());
    assert!(g.check_path(&anonymous(), "/admin/../landing").is_allowed());
}

#[test]
fn path_normalization() {
    assert_eq!(normalize_path("/"), "");
    assert_eq!(normalize_path("//admin//users/"), "/admin/users");
    assert_eq!(normalize_path("/a/./b/../c?x=/admin#frag"), "/a/c");
    assert_eq!(normalize_path("/../../admin"), "/admin");
}

#[test]
fn longest_rule_wins() {
    let routes = vec![
        RouteConfig { path: "/admin".into(), roles: vec!["ADMIN".into()] },
        RouteConfig { path: "/admin/reports".into(), roles: vec!["AUDITOR".into(), "ADMIN".into()] },
    ];
    let g = RouteGuard::new(&NavigationSection::default(), &routes);
    let auditor = logged_in(Some("ROLE_AUDITOR"));

    assert!(g.check_path(&auditor, "/admin/reports/2024").is_allowed());
    assert!(!g.check_path(&auditor, "/admin/users").is_allowed());
}

#[test]
fn redirect_targets_follow_config() {
    let cfg = config::load_from_str(
        r#"
version: 1
storage: { kind: memory }
navigation: { login: "/signin", home: "/dashboard" }
routes:
  - path: "/lab"
    roles: ["ROLE_LAB"]
"#,
    )
    .unwrap();
    let store: Arc<dyn SessionStore> = Arc::new(InMemoryStore::new());
    let state = AppState::with_parts(cfg, store.clone(), Arc::new(MockBackend::ok("t", "u", "X", None))).unwrap();

    assert_eq!(state.navigate("/lab").redirect_target(), Some("/signin"));

    store.set(TOKEN_KEY, "t").unwrap();
    store.set(ROLE_KEY, "OTHER").unwrap();
    assert_eq!(state.navigate("/lab").redirect_target(), Some("/dashboard"));

    store.set(ROLE_KEY, "lab").unwrap();
    assert!(state.navigate("/lab/samples").is_allowed());
}

#[test]
fn protected_login_page_is_rejected_at_startup() {
    let cfg = config::load_from_str(
        r#"
version: 1
storage: { kind: memory }
routes:
  - path: "/"
"#,
    )
    .unwrap();
    let store: Arc<dyn SessionStore> = Arc::new(InMemoryStore::new());
    let res = AppState::with_parts(cfg, store, Arc::new(MockBackend::ok("t", "u", "X", None)));
    assert!(res.is_err());
}

#[tokio::test]
async fn login_then_navigate() {
    let store: Arc<dyn SessionStore> = Arc::new(InMemoryStore::new());
    let mut cfg = ClientConfig::default();
    cfg.storage.kind = config::StorageKind::Memory;
    let state = AppState::with_parts(
        cfg,
        store,
        Arc::new(MockBackend::ok("t", "admin", "ROLE_ADMIN", Some(1))),
    )
    .unwrap();

    assert_eq!(state.navigate("/admin").redirect_target(), Some("/login"));

    let req = labgate_core::protocol::LoginRequest {
        username: "admin".into(),
        password: "secret".into(),
    };
    state.auth().login(&req).await.unwrap();
    assert!(state.navigate("/admin/users").is_allowed());

    state.auth().logout();
    assert_eq!(state.navigate("/admin").redirect_target(), Some("/login"));
}
