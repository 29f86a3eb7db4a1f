//! EcoVault Client Shell
//! Mission: Drive the session, guard and auth flows from the command line
//!
//! One process per command; the file-backed session store is what carries a
//! login across invocations, the way localStorage carries one across page
//! loads.
//!
//! Usage:
//!   cargo run -- login --username ada@example.com --password hunter2
//!   cargo run -- open /dashboard
//!   cargo run -- logout

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ecovault_client::auth::models::{RegisterRequest, ResetPasswordRequest, VerifyOtpRequest};
use ecovault_client::auth::{AuthService, HttpAuthApi};
use ecovault_client::config::Config;
use ecovault_client::guard::routes::{landing_path, Navigation, RouteTable};
use ecovault_client::guard::AccessGuard;
use ecovault_client::session::{FileStorage, SessionStore};

#[derive(Parser, Debug)]
#[command(name = "ecovault")]
#[command(about = "EcoVault e-waste collection client")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the stored session
    Session,
    /// Resolve a path through the route guard
    Open {
        /// Client path, e.g. /dashboard
        path: String,
    },
    /// List the route table
    Routes,
    /// Create a pending account (a verification code follows by email)
    Register {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
    },
    /// Send a fresh verification code
    SendOtp {
        #[arg(long)]
        email: String,
    },
    /// Verify the emailed code and activate the account
    VerifyOtp {
        #[arg(long)]
        email: String,
        #[arg(long)]
        otp: String,
    },
    /// Replace the emailed temporary password
    ResetPassword {
        #[arg(long)]
        username: String,
        #[arg(long)]
        temp_password: String,
        #[arg(long)]
        new_password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let config = Config::from_env()?;

    let storage = FileStorage::open(&config.session_file)?;
    let store = Arc::new(SessionStore::new(storage));

    // Nav-bar analog: re-print the session line whenever it changes.
    let banner_store = Arc::clone(&store);
    let _subscription = store.subscribe(move || {
        print_session_line(&banner_store);
    });

    match args.command {
        Command::Login { username, password } => {
            let service = auth_service(&config, &store)?;
            let outcome = service
                .login(&username, &password)
                .await
                .map_err(anyhow::Error::new)?;

            if outcome.must_reset_password {
                println!("Signed in on a temporary password; set a new one via reset-password");
            } else {
                println!(
                    "Signed in as {}, landing on {}",
                    outcome.role.as_str(),
                    landing_path(outcome.role)
                );
            }
        }
        Command::Logout => {
            let service = auth_service(&config, &store)?;
            service.logout().map_err(anyhow::Error::new)?;
        }
        Command::Session => {
            print_session_line(&store);
        }
        Command::Open { path } => {
            let guard = AccessGuard::new(Arc::clone(&store));
            let table = RouteTable::ecovault_defaults();
            match table.check(&guard, &path) {
                Navigation::Rendered { path } => println!("renders {}", path),
                Navigation::RedirectedTo { from, to } => println!("{} redirects to {}", from, to),
                Navigation::NotFound { path } => println!("no route for {}", path),
                Navigation::RedirectLoop { path } => {
                    println!("{} never settles, the route table loops", path)
                }
            }
        }
        Command::Routes => {
            let table = RouteTable::ecovault_defaults();
            for route in table.iter() {
                println!("{:<24} {}", route.path, route.access);
            }
        }
        Command::Register {
            full_name,
            email,
            phone,
        } => {
            let service = auth_service(&config, &store)?;
            let reply = service
                .register(&RegisterRequest {
                    full_name,
                    email,
                    phone,
                })
                .await
                .map_err(anyhow::Error::new)?;
            println!("{}", reply.message.as_deref().unwrap_or("ok"));
        }
        Command::SendOtp { email } => {
            let service = auth_service(&config, &store)?;
            let reply = service
                .send_otp(&email)
                .await
                .map_err(anyhow::Error::new)?;
            println!("{}", reply.message.as_deref().unwrap_or("ok"));
        }
        Command::VerifyOtp { email, otp } => {
            let service = auth_service(&config, &store)?;
            let reply = service
                .verify_otp(&VerifyOtpRequest { email, otp })
                .await
                .map_err(anyhow::Error::new)?;
            println!("{}", reply.message.as_deref().unwrap_or("ok"));
        }
        Command::ResetPassword {
            username,
            temp_password,
            new_password,
        } => {
            let service = auth_service(&config, &store)?;
            let reply = service
                .reset_password(&ResetPasswordRequest {
                    username,
                    temp_password,
                    new_password,
                })
                .await
                .map_err(anyhow::Error::new)?;
            println!("{}", reply.message.as_deref().unwrap_or("ok"));
        }
    }

    Ok(())
}

fn auth_service(config: &Config, store: &Arc<SessionStore>) -> Result<AuthService> {
    let api = HttpAuthApi::new(
        config.api_url.clone(),
        Duration::from_secs(config.http_timeout_secs),
    )?;
    Ok(AuthService::new(Arc::new(api), Arc::clone(store)))
}

fn print_session_line(store: &SessionStore) {
    let session = store.session();
    match session.role {
        Some(role) => println!("session: authenticated as {} (token present)", role.as_str()),
        None => println!("session: not authenticated"),
    }
}

/// Initialize tracing for the CLI
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ecovault_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
