use std::path::PathBuf;

use clap::Parser;
use veridity_lib::services::{default_host, default_keep_sessions, default_port, LogConfig, ServiceConfig};

#[derive(Parser, Debug)]
#[command(name = "veridity")]
#[command(about = "Veridity fraud detection API server", long_about = None)]
#[command(version)]
struct Cli {
    /// Address to bind
    #[arg(long, env = "VERIDITY_HOST", default_value_t = default_host())]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "VERIDITY_PORT", default_value_t = default_port())]
    port: u16,

    /// Directory for session log files (defaults to the platform data dir)
    #[arg(long, env = "VERIDITY_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Log to the console only
    #[arg(long, env = "VERIDITY_DISABLE_FILE_LOG")]
    no_file_log: bool,

    /// Number of session log files to retain
    #[arg(long, env = "VERIDITY_KEEP_LOGS", default_value_t = default_keep_sessions())]
    keep_logs: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ServiceConfig {
        host: cli.host,
        port: cli.port,
        log: LogConfig {
            file_log: !cli.no_file_log,
            log_dir: cli.log_dir,
            keep_sessions: cli.keep_logs,
        },
    };

    veridity_lib::init_logging(&config.log);
    veridity_lib::run(config).await
}
