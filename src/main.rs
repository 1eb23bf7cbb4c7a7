use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ytt::extractors::YtDlpProvider;
use ytt::{app, video, Cli, Config, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr, stdout carries the transcript
    let default_filter = if cli.verbose { "ytt=debug" } else { "ytt=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match execute(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), err);
            ExitCode::from(app::exit_code(&err) as u8)
        }
    }
}

async fn execute(cli: &Cli) -> Result<()> {
    // A bad reference must surface before config or proxy errors
    video::resolve(&cli.video)?;

    let config = Config::load(cli.config.as_deref())?;

    let retrieval = config.retrieval.clone().with_overrides(
        cli.cookies.as_deref(),
        cli.proxy_http.as_deref(),
        cli.proxy_https.as_deref(),
    );
    let provider = YtDlpProvider::new(retrieval)?;

    let mut stdout = std::io::stdout().lock();
    app::run(cli, &config, &provider, &mut stdout).await
}
