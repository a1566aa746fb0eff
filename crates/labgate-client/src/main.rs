//! labgate CLI
//!
//! Drives the session policy from a terminal:
//! - `login` / `register` against the configured auth backend
//! - `logout` / `whoami` over the session store
//! - `check <path>` runs the navigation guard for a destination
//! - `routes` lists the compiled route table

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use labgate_client::{app_state::AppState, config};
use labgate_core::error::{login_failure_message, register_failure_message};
use labgate_core::validation::{LoginForm, PasswordChecks, RegisterForm, ValidationErrors};

#[derive(Parser)]
#[command(name = "labgate")]
#[command(about = "Session and role policy client for the lab backend", long_about = None)]
struct Cli {
    /// Path to the YAML config
    #[arg(short, long, default_value = "labgate.yaml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session.
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },

    /// Create an account (does not log in).
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        second_last_name: String,
        #[arg(long)]
        rut: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Forget the stored session.
    Logout,

    /// Print the stored session.
    Whoami,

    /// Run the navigation guard for a path.
    Check { path: String },

    /// List protected routes and redirect targets.
    Routes,

    /// Show which password rules a candidate satisfies.
    PasswordRules { password: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let cfg = match config::load_from_file(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("config load failed ({}): {e}", cli.config);
            return ExitCode::FAILURE;
        }
    };
    let state = match AppState::new(cfg) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("startup failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    run(&state, cli.command).await
}

async fn run(state: &AppState, command: Commands) -> ExitCode {
    match command {
        Commands::Login { username, password } => {
            let form = LoginForm { username, password };
            if !report(&form.validate()) {
                return ExitCode::FAILURE;
            }
            match state.auth().login(&form.to_request()).await {
                Ok(s) => {
                    println!("logged in as {} ({})", s.username, s.role);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("{}", login_failure_message(&e));
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Register {
            name,
            last_name,
            second_last_name,
            rut,
            username,
            email,
            password,
        } => {
            let form = RegisterForm {
                name,
                last_name,
                second_last_name,
                rut,
                username,
                email,
                password,
            };
            if !report(&form.validate()) {
                return ExitCode::FAILURE;
            }
            match state.auth().register(&form.to_request()).await {
                Ok(u) => {
                    println!("registered {} (id {}); log in to continue", u.username, u.id);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("{}", register_failure_message(&e));
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Logout => {
            state.auth().logout();
            println!("logged out");
            ExitCode::SUCCESS
        }
        Commands::Whoami => match state.session().session() {
            Some(s) => {
                let id = s.user_id.map(|i| i.to_string()).unwrap_or_else(|| "-".into());
                println!("{} role={} id={}", s.username, s.role, id);
                ExitCode::SUCCESS
            }
            None => {
                println!("not logged in");
                ExitCode::FAILURE
            }
        },
        Commands::Check { path } => {
            let decision = state.navigate(&path);
            match decision.redirect_target() {
                None => {
                    println!("allow {path}");
                    ExitCode::SUCCESS
                }
                Some(to) => {
                    println!("redirect {path} -> {to}");
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Routes => {
            let nav = &state.cfg().navigation;
            println!("login -> {}  home -> {}", nav.login, nav.home);
            for rule in state.guard().routes().rules() {
                let prefix = if rule.prefix.is_empty() { "/" } else { rule.prefix.as_str() };
                if rule.roles.is_empty() {
                    println!("{prefix}  (any session)");
                } else {
                    println!("{prefix}  roles: {}", rule.roles.join(", "));
                }
            }
            ExitCode::SUCCESS
        }
        Commands::PasswordRules { password } => {
            let c = PasswordChecks::of(&password);
            for (ok, rule) in [
                (c.min_length, "at least 8 characters"),
                (c.has_number, "a number"),
                (c.has_upper, "an uppercase letter"),
                (c.has_lower, "a lowercase letter"),
                (c.has_special, "a special character"),
            ] {
                println!("[{}] {rule}", if ok { "x" } else { " " });
            }
            if c.all() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

// Print field errors; true when the form is valid.
fn report(errs: &ValidationErrors) -> bool {
    for issue in errs.issues() {
        eprintln!("{}: {:?}", issue.field, issue.error);
    }
    if errs.mismatch() {
        eprintln!("passwords do not match");
    }
    errs.is_valid()
}
