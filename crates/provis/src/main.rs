use std::process::ExitCode;

use clap::Parser;
use console::style;
use provis_fetch::{Fetcher, ReqwestClient};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::cli::App;
use crate::config::Config;
use crate::install::SystemRunner;
use crate::pipeline::Pipeline;

mod cli;
mod config;
mod install;
mod pipeline;

fn main() -> ExitCode {
    let app = App::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let code = match run(&app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    };

    // Keep the console window open until acknowledged, on both paths.
    if !app.no_pause {
        cli::pause();
    }

    code
}

fn run(app: &App) -> anyhow::Result<()> {
    let mut config = Config::load(&app.config)?;
    if let Some(url) = &app.url {
        config.source_url = url.clone();
    }

    let fetcher = Fetcher::new(ReqwestClient::new()?);
    let pipeline = Pipeline::new(config, fetcher, SystemRunner);

    let outcome = pipeline.run();

    // Cleanup runs after success and failure alike; a cleanup failure is
    // reported but never displaces the primary outcome.
    if !app.keep_temp {
        if let Err(err) = pipeline.cleanup() {
            warn!("cleanup of the temporary directory failed: {err}");
        }
    }

    outcome.map_err(Into::into)
}
