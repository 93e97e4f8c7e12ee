use clap::Parser;
use eyre::WrapErr;

use gpa_tracker::cli::RootArgs;
use gpa_tracker::commands;
use gpa_tracker::config::AppConfig;

fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = RootArgs::parse();
    let config = AppConfig::from_env_and_args(&args).wrap_err("load config")?;
    tracing::debug!(?config, "config loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(&config, args.command, &mut out)
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gpa_tracker=info,transcript_io=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
