use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use parking_lot::Mutex;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use codeassist::application::{CodeAssistClient, NotificationCenter};
use codeassist::domain::Severity;
use codeassist::domain::ports::TokenStoragePort;
use codeassist::infrastructure::config::NotificationsConfig;
use codeassist::infrastructure::{
    AppConfig, CliArgs, ConsoleNavigator, FileTokenStorage, ReqwestTransport, StorageManager,
    TokenBackend, TokioClock,
};
use codeassist::presentation::{CommandRunner, present};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time();

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn token_storage(
    config: &AppConfig,
    storage: &StorageManager,
) -> Result<Arc<dyn TokenStoragePort>> {
    let origin = config.api_origin()?;

    match config.token_backend {
        #[cfg(feature = "keyring")]
        TokenBackend::Keyring => Ok(Arc::new(
            codeassist::infrastructure::KeyringTokenStorage::new(origin),
        )),
        #[cfg(not(feature = "keyring"))]
        TokenBackend::Keyring => {
            tracing::warn!("Built without keyring support, using file storage");
            Ok(Arc::new(FileTokenStorage::in_dir(storage.data_dir(), origin)))
        }
        TokenBackend::File => Ok(Arc::new(FileTokenStorage::in_dir(storage.data_dir(), origin))),
    }
}

fn create_runner(config: &AppConfig, storage: &StorageManager) -> Result<CommandRunner> {
    let transport = ReqwestTransport::with_base_url(&config.api_url, config.request_timeout())
        .wrap_err("failed to create HTTP client")?;
    let navigator = ConsoleNavigator::new(codeassist::NAME);
    let client = CodeAssistClient::new(
        Arc::new(transport),
        token_storage(config, storage)?,
        Arc::new(navigator),
    );

    Ok(CommandRunner::new(client))
}

async fn show_toast(settings: &NotificationsConfig, severity: Severity, message: String) {
    if !settings.enabled || !std::io::stderr().is_terminal() {
        debug!(%severity, %message, "Toast suppressed");
        return;
    }

    let timing = settings.timing();
    let center = Arc::new(Mutex::new(NotificationCenter::new(
        Arc::new(TokioClock),
        timing,
    )));
    center.lock().notify(severity, message, None);

    if let Err(e) = present(center, timing.tick).await {
        debug!(error = %e, "Failed to draw toast");
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(&args);

    init_logging(&config)?;

    info!(version = codeassist::VERSION, api = %config.api_url, "Starting codeassist");

    let runner = create_runner(&config, &storage)?;

    match runner.run(args.command).await {
        Ok(output) => {
            if let Some(body) = output.body {
                println!("{body}");
            }
            if let Some((severity, message)) = output.toast {
                show_toast(&config.notifications, severity, message).await;
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_session_expired() => Ok(ExitCode::from(2)),
        Err(e) => {
            eprintln!("{e}");
            show_toast(&config.notifications, Severity::Error, e.to_string()).await;
            Ok(ExitCode::FAILURE)
        }
    }
}
