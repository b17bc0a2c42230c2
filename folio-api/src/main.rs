//! folio-api - Portfolio backend service
//!
//! Serves the REST API used by the public site and the admin dashboard,
//! and optionally the compiled front end itself.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use folio_api::email::EmailRelay;
use folio_api::{build_app, AppState};
use folio_common::config::{AdminCredentials, EmailSettings, FolioConfig, Overrides, TomlConfig};
use folio_common::db::{init::init_database, users};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for folio-api
#[derive(Parser, Debug)]
#[command(name = "folio-api")]
#[command(about = "Portfolio site backend")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "FOLIO_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "FOLIO_HOST")]
    host: Option<String>,

    /// Folder holding folio.db
    #[arg(short, long, env = "FOLIO_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// TOML config file (default: <config dir>/folio/config.toml)
    #[arg(short, long, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Directory with the built front end to serve at /
    #[arg(long, env = "FOLIO_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, env = "FOLIO_LOG_LEVEL")]
    log_level: Option<String>,

    /// Username for the initial admin account
    #[arg(long, env = "FOLIO_ADMIN_USERNAME")]
    admin_username: Option<String>,

    /// Password for the initial admin account
    #[arg(long, env = "FOLIO_ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,

    #[arg(long, env = "FOLIO_EMAILJS_SERVICE_ID")]
    emailjs_service_id: Option<String>,

    #[arg(long, env = "FOLIO_EMAILJS_TEMPLATE_ID")]
    emailjs_template_id: Option<String>,

    #[arg(long, env = "FOLIO_EMAILJS_PUBLIC_KEY")]
    emailjs_public_key: Option<String>,

    #[arg(long, env = "FOLIO_EMAILJS_PRIVATE_KEY", hide_env_values = true)]
    emailjs_private_key: Option<String>,

    /// Override the EmailJS API endpoint
    #[arg(long, env = "FOLIO_EMAILJS_ENDPOINT")]
    emailjs_endpoint: Option<String>,
}

impl Args {
    fn into_overrides(self) -> Overrides {
        Overrides {
            host: self.host,
            port: self.port,
            root_folder: self.root_folder,
            static_dir: self.static_dir,
            log_level: self.log_level,
            admin: AdminCredentials {
                username: self.admin_username,
                password: self.admin_password,
            },
            email: EmailSettings {
                endpoint: self.emailjs_endpoint,
                service_id: self.emailjs_service_id,
                template_id: self.emailjs_template_id,
                public_key: self.emailjs_public_key,
                private_key: self.emailjs_private_key,
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_file = TomlConfig::locate(args.config.as_deref());
    let (file, file_error) = match config_file.as_deref().map(TomlConfig::load) {
        Some(Ok(file)) => (file, None),
        Some(Err(e)) => (TomlConfig::default(), Some(e)),
        None => (TomlConfig::default(), None),
    };
    let config = FolioConfig::resolve(args.into_overrides(), file);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("folio_api={0},folio_common={0},tower_http={0}", config.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting folio-api v{}", env!("CARGO_PKG_VERSION"));
    match (&config_file, file_error) {
        (Some(path), None) => info!("Loaded config from {}", path.display()),
        (Some(path), Some(e)) => {
            warn!("Could not load config {}: {} (using defaults)", path.display(), e)
        }
        (None, _) => info!("No config file found, using defaults"),
    }
    info!("Database: {}", config.database_path.display());

    let pool = init_database(&config.database_path)
        .await
        .context("Failed to initialize database")?;

    users::seed_admin(&pool, &config.admin)
        .await
        .context("Failed to seed admin account")?;

    let mut state = AppState::new(pool);
    match EmailRelay::from_settings(&config.email) {
        Ok(Some(relay)) => {
            info!("Contact relay enabled ({})", relay.endpoint());
            state = state.with_relay(relay);
        }
        Ok(None) => info!("Contact relay disabled (EmailJS not configured)"),
        Err(e) => warn!("Contact relay disabled: {}", e),
    }

    if let Some(dir) = &config.static_dir {
        info!("Serving static site from {}", dir.display());
    }
    let app = build_app(state, config.static_dir.as_deref());

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("folio-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
