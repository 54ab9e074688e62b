use std::io::BufRead;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

use crate::app::{App, Input};
use crate::cli::Args;

mod app;
mod cli;
mod plugin_store;

fn init_tracing(data_dir: &Path) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;

    let appender = tracing_appender::rolling::never(data_dir, "cardfind.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(LevelFilter::DEBUG);

    let stderr_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter);

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(guard)
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut app = App::new(args.config.clone(), args.json)?;
    let mut stdout = std::io::stdout();

    if let Some(query) = args.query() {
        app.query(&query);
        return app.print(&mut stdout);
    }

    for line in std::io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;

        let input = match Input::parse(&line) {
            Ok(input) => input,
            Err(e) => {
                eprintln!("{e:#}");
                continue;
            }
        };

        let result = match input {
            Input::Query(query) => {
                app.query(query);
                app.print(&mut stdout)
            }
            Input::Execute(index) => app.execute(index),
            Input::Reload => app.reload(),
            Input::Clear => {
                app.clear();
                Ok(())
            }
        };

        if let Err(e) = result {
            tracing::error!("{e:#}");
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let data_dir = dirs::data_local_dir()
        .context("Failed to get $data_local_dir path")?
        .join("cardfind");
    let _guard = init_tracing(&data_dir)?;

    run(args).inspect_err(|e| tracing::error!("{e:#}"))
}
