use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use preventivo_export::render::ChromiumRenderer;
use preventivo_export::template::Template;
use preventivo_server::config::Config;
use preventivo_server::domain::select_domain;
use preventivo_server::pipeline;
use preventivo_server::state::AppState;
use preventivo_store::client::AirtableClient;

#[derive(Parser, Debug)]
#[command(name = "preventivo-server", about = "Quote PDFs from the project store")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (the default).
    Serve,

    /// Generate one quote to a file and exit.
    Generate {
        /// Domain key. Defaults to DEFAULT_TEXT_DOMAIN, then `casawa`.
        domain: Option<String>,

        /// Output path. Defaults to `<filename>.pdf` in the working directory.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Structured JSON logging; RUST_LOG wins over the debug toggle.
    let default_level = if config.debug.verbose() { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .json()
        .init();

    let state = build_state(&config)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(state, config.port).await,
        Command::Generate { domain, output } => {
            let domain = select_domain(domain.as_deref(), &[], state.default_domain.as_deref());
            match pipeline::generate_to_file(&state, &domain, output.as_deref()).await {
                Ok(_) => Ok(()),
                Err(e) => {
                    state.artifacts.record_error("Error during execution", &e);
                    Err(e.into())
                }
            }
        }
    }
}

fn build_state(config: &Config) -> eyre::Result<AppState> {
    let artifacts = config.debug.artifacts();
    if artifacts.is_enabled() {
        info!(dir = %artifacts.dir().display(), "debug artifacts enabled");
    }

    let template = match &config.template_path {
        Some(path) => Template::load(path)?,
        None => Template::builtin()?,
    };
    info!(
        placeholders = template.placeholders().len(),
        "template loaded"
    );

    let renderer = match ChromiumRenderer::discover(config.chromium_path.clone()) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "no Chromium binary found, renders will fail until one is installed");
            ChromiumRenderer::new("chromium")
        }
    }
    .with_timeout(config.render_timeout);
    info!(binary = %renderer.binary().display(), "renderer ready");

    let records = AirtableClient::new(config.airtable.clone(), artifacts.clone());

    Ok(AppState {
        records: Arc::new(records),
        renderer: Arc::new(renderer),
        template: Arc::new(template),
        artifacts,
        default_domain: config.default_domain.clone(),
        render_timeout: config.render_timeout,
    })
}

async fn serve(state: AppState, port: u16) -> eyre::Result<()> {
    let app = preventivo_server::app(state);

    if env::var_os("AWS_LAMBDA_RUNTIME_API").is_some() {
        info!("running under the Lambda runtime");
        return lambda_http::run(app).await.map_err(|e| eyre::eyre!(e));
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "preventivo service listening");
    axum::serve(listener, app).await?;
    Ok(())
}
