use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mairis_prime::{
    api,
    collaborator::{Credentials, GeminiClient, ResearchCollaborator},
    db, export, mcp,
    orchestrator::{CycleOutcome, Orchestrator, OrchestratorConfig},
    store::KnowledgeStore,
};

#[derive(Parser)]
#[command(name = "mairis")]
#[command(about = "MAIRIS PRIME autonomous rocket engine research lab")]
struct Cli {
    /// Path to the SQLite database (default: MAIRIS_DB_PATH or the platform data dir)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard API server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// Start MCP server via stdio
    Mcp,
    /// Run one research cycle and print the outcome
    Cycle,
    /// Print subsystem readiness and counters
    Status,
    /// Write the knowledge state as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Replace the knowledge state with a previously exported document
    Import { file: PathBuf },
    /// Purge all research history and return to genesis
    Reset {
        /// Confirm the purge
        #[arg(long)]
        yes: bool,
    },
    /// Print a past report as plain text
    Report { id: String },
}

/// Initialize tracing with output to stderr (for MCP mode) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "mairis_prime=debug,tower_http=debug".into()),
    );

    if use_stderr {
        // stdout carries the MCP protocol or command output
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn open_database(path: Option<PathBuf>) -> anyhow::Result<db::Database> {
    let db = match path {
        Some(path) => db::Database::open(path)?,
        None => db::Database::open_default()?,
    };
    db.migrate()?;
    Ok(db)
}

fn build_lab(db: db::Database) -> Orchestrator {
    let credentials = Credentials::from_env();
    let transport = GeminiClient::from_env(credentials.clone());
    Orchestrator::new(
        ResearchCollaborator::new(Arc::new(transport)),
        KnowledgeStore::new(db),
        credentials,
        OrchestratorConfig::from_env(),
    )
}

async fn serve(lab: Orchestrator, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting MAIRIS PRIME server on port {}", port);

    let app = api::create_router(lab, api::SecurityConfig::from_env());

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("MAIRIS PRIME listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = !matches!(cli.command, None | Some(Commands::Serve { .. }));
    init_tracing(use_stderr);

    let db = open_database(cli.db)?;

    match cli.command {
        Some(Commands::Serve { port }) => serve(build_lab(db), port).await?,
        None => serve(build_lab(db), 3000).await?,
        Some(Commands::Mcp) => mcp::run_stdio_server(build_lab(db)).await?,
        Some(Commands::Cycle) => {
            let outcome = build_lab(db).run_cycle().await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            if !matches!(outcome, CycleOutcome::Completed { .. }) {
                std::process::exit(1);
            }
        }
        Some(Commands::Status) => {
            let lab = build_lab(db);
            let knowledge = lab.knowledge();
            let target = lab.priority_target();
            println!(
                "Cycles: {}  Papers processed: {}  Breakthroughs: {}",
                knowledge.cycle_count,
                knowledge.total_papers_processed,
                knowledge.breakthroughs.len()
            );
            for (key, subsystem) in knowledge.subsystems.iter() {
                let marker = if key == target { '>' } else { ' ' };
                println!(
                    "{} {:<12} {:>3}%  {}",
                    marker,
                    key.as_str(),
                    subsystem.status,
                    subsystem.name
                );
            }
            if lab.check_credentials() {
                println!("No model API key configured (set MAIRIS_GEMINI_API_KEY).");
            }
        }
        Some(Commands::Export { out }) => {
            let json = build_lab(db).export_state()?;
            match out {
                Some(path) => std::fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{}", json),
            }
        }
        Some(Commands::Import { file }) => {
            let document = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let state = build_lab(db).import_state(&document)?;
            println!(
                "Imported state at cycle {} with {} reports.",
                state.cycle_count,
                state.past_reports.len()
            );
        }
        Some(Commands::Reset { yes }) => {
            if !yes {
                anyhow::bail!("Reset purges all research history; re-run with --yes");
            }
            build_lab(db).reset()?;
            println!("Knowledge state reset to genesis.");
        }
        Some(Commands::Report { id }) => {
            let report = build_lab(db)
                .report(&id)
                .with_context(|| format!("no report with id {}", id))?;
            print!("{}", export::render_report(&report));
        }
    }

    Ok(())
}
