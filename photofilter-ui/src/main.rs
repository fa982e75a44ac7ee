use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use photofilter_history::SessionToken;
use photofilter_service::{HttpFilterService, ImageTransformer, ServiceConfig};
use photofilter_ui::{catalogue, run_step, Alert, ButtonStates, Editor, Step};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Run a scripted photo editing session against a filter service.
#[derive(Parser, Debug)]
#[command(name = "photofilter", version)]
struct Cli {
    /// Image to start the session with.
    #[arg(short, long, required_unless_present = "list_filters")]
    input: Option<PathBuf>,

    /// Base URL of the filter service [default: $PHOTOFILTER_SERVICE_URL or http://localhost:4567].
    #[arg(long)]
    service_url: Option<String>,

    /// Seconds to wait for a filter response [default: $PHOTOFILTER_TIMEOUT_SECS or 60].
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the filter menu and transform names, then exit.
    #[arg(long)]
    list_filters: bool,

    /// Directory to write the final image into, as download.png.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the final session state as JSON.
    #[arg(long)]
    json: bool,

    /// Steps, run in order: filter:<name>[:<int>[:<hex>]], rotate-cw, rotate-ccw,
    /// hflip, vflip, undo, redo, restore, open:<file>.
    steps: Vec<Step>,
}

#[derive(Debug, Serialize)]
struct Summary {
    session: SessionToken,
    images: usize,
    undone: usize,
    origins: Vec<usize>,
    at_original: bool,
    buttons: ButtonStates,
    alerts: Vec<Alert>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list_filters {
        println!("{}", catalogue());
        return Ok(());
    }
    let Some(input) = &cli.input else {
        anyhow::bail!("--input is required");
    };

    let mut config = ServiceConfig::from_env().context("read service config from environment")?;
    if let Some(url) = &cli.service_url {
        config.base_url = url.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout_secs = secs;
    }
    let service = HttpFilterService::new(&config).context("configure filter service")?;
    let mut editor = Editor::new(service, ImageTransformer::default());

    editor
        .open_file(input)
        .with_context(|| format!("open input image: {}", input.display()))?;

    let mut alerts = Vec::new();
    for step in &cli.steps {
        if let Err(e) = run_step(&mut editor, step) {
            let alert = Alert::from(&e);
            eprintln!("{}: {}", alert.title, alert.message);
            tracing::warn!(
                step = ?step,
                error = %e,
                remote = e.is_remote(),
                "step failed, session continues"
            );
            alerts.push(alert);
        }
    }

    if let Some(output) = &cli.output {
        let path = editor.save_to(output)?;
        tracing::info!(path = %path.display(), "session saved");
    }

    if cli.json {
        let history = editor.history();
        let summary = Summary {
            session: editor.session().token(),
            images: history.len(),
            undone: history.undone_len(),
            origins: history.origin_indices().to_vec(),
            at_original: history.is_at_original(),
            buttons: editor.buttons(),
            alerts,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
