pub mod models;
pub mod services;
pub mod api;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::{Instant, SystemTime};

use anyhow::Context;
use tracing::{info, warn, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use services::{FraudDetector, LogConfig, ServiceConfig};

static PROCESS_START: OnceLock<Instant> = OnceLock::new();
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const SESSION_LOG_PREFIX: &str = "veridity_";
const SESSION_LOG_EXT: &str = ".log";

fn startup_elapsed_ms() -> u128 {
    PROCESS_START
        .get()
        .map(|t| t.elapsed().as_millis())
        .unwrap_or(0)
}

/// One log file per server run, named after its start time.
#[derive(Debug, Clone)]
struct SessionLog {
    dir: PathBuf,
    file_name: String,
}

impl SessionLog {
    fn open(config: &LogConfig) -> io::Result<Self> {
        let dir = config.resolved_log_dir();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            file_name: session_file_name(chrono::Local::now()),
        })
    }

    fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

fn session_file_name(started: chrono::DateTime<chrono::Local>) -> String {
    format!(
        "{}{}{}",
        SESSION_LOG_PREFIX,
        started.format("%Y%m%d_%H%M%S"),
        SESSION_LOG_EXT
    )
}

fn is_session_log(name: &str) -> bool {
    name.starts_with(SESSION_LOG_PREFIX) && name.ends_with(SESSION_LOG_EXT)
}

fn console_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(cfg!(debug_assertions))
        .with_target(true)
}

/// Install the global subscriber: stderr always, plus the session file when enabled.
/// A log dir that cannot be created degrades to console-only output.
pub fn init_logging(config: &LogConfig) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let session = if config.file_log {
        SessionLog::open(config)
            .map_err(|e| eprintln!("log dir unavailable, console only: {}", e))
            .ok()
    } else {
        None
    };

    let file_layer = session.as_ref().map(|session| {
        let (writer, guard) =
            tracing_appender::non_blocking(rolling::never(&session.dir, &session.file_name));
        let _ = LOG_GUARD.set(guard);
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer())
        .with(file_layer)
        .init();

    let Some(session) = session else {
        info!(file_log = config.file_log, "logging.console_only");
        return;
    };
    info!(path = %session.path().display(), "logging.session_file");

    let keep = config.keep_sessions;
    std::thread::spawn(move || {
        match prune_session_logs(&session.dir, &session.file_name, keep) {
            Ok(0) => {}
            Ok(removed) => info!(removed, keep, "logging.pruned"),
            Err(e) => warn!(dir = %session.dir.display(), "log pruning failed: {}", e),
        }
    });
}

/// Delete the oldest session logs so that at most `keep` remain, counting `current`,
/// which is never removed. Age is mtime, ties broken by file name. Returns how many
/// files were deleted.
fn prune_session_logs(dir: &Path, current: &str, keep: usize) -> io::Result<usize> {
    let mut previous: Vec<(SystemTime, String)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name == current || !is_session_log(&name) {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        previous.push((modified, name));
    }

    // Newest first; everything past the survivors goes.
    previous.sort_unstable_by(|a, b| b.cmp(a));
    let survivors = keep.saturating_sub(1);

    let mut removed = 0;
    for (_, name) in previous.into_iter().skip(survivors) {
        match fs::remove_file(dir.join(&name)) {
            Ok(()) => removed += 1,
            Err(e) => warn!(file = %name, "could not remove old log: {}", e),
        }
    }
    Ok(removed)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Build the detector, bind and serve until Ctrl-C. Logging must already be initialized.
pub async fn run(config: ServiceConfig) -> anyhow::Result<()> {
    PROCESS_START.get_or_init(Instant::now);

    info!("=== Veridity Started ===");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let detector = FraudDetector::with_defaults().context("failed to build indicator tables")?;
    info!(
        indicators = detector.indicator_count(),
        contradiction_rules = detector.rules().len(),
        "detector.ready"
    );

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(startup_ms = startup_elapsed_ms(), %addr, "Starting {}", api::SERVICE_NAME);
    info!("Endpoints:");
    info!("   GET  /health  - Health check");
    info!("   POST /analyze - Analyze paper for fraud");
    info!("   GET  /test    - Test with sample data");

    let app = api::router(Arc::new(detector));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("=== Veridity Exited ===");
    Ok(())
}
