use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use regform::config::Config;
use regform::tui;

#[derive(Parser)]
#[command(name = "regform")]
#[command(about = "Terminal sign-up form demo")]
#[command(version)]
struct Cli {
    /// Simulated submission delay in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Initial value for the email field
    #[arg(long)]
    email: Option<String>,

    /// Accept sign-ups instead of simulating a duplicate-email rejection
    #[arg(long)]
    accept: bool,

    /// Log file path
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "regform=info");
    }

    let mut config = Config::from_env()?;
    if let Some(delay_ms) = cli.delay_ms {
        config.submit_delay_ms = delay_ms;
    }
    if let Some(email) = cli.email {
        config.default_email = email;
    }
    if cli.accept {
        config.accept_signups = true;
    }
    if let Some(log_file) = cli.log_file {
        config.log_file = log_file;
    }
    config.validate()?;

    // Initialize logging to both console and file
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let file_appender = tracing_appender::rolling::never(".", &config.log_file);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::from_default_env()),
        )
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();

    info!(
        "Launching sign-up form (delay: {}ms, accept: {})",
        config.submit_delay_ms, config.accept_signups
    );

    // The terminal is already restored by the time run() returns, so the
    // error can propagate to a clean screen and a non-zero exit code.
    let result = tui::run(config).await;
    match &result {
        Ok(_) => info!("TUI exited successfully"),
        Err(e) => error!("TUI failed: {}", e),
    }

    result
}
