//! Refactorium CLI - technical-debt analysis and modernization planning.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use refactorium_core::{
    AnalysisId, AnalysisResult, AnalysisStatus, ArchitectureProposal, CodebaseId, ProposalId,
    RefactoriumConfig, SeverityLevel,
};
use refactorium_service::AnalysisService;
use refactorium_storage::JsonStore;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "refactorium")]
#[command(about = "Technical-debt analysis and modernization planning", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file. Environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Result store directory
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Print JSON instead of a report
    #[arg(long, global = true)]
    json: bool,

    /// Plain severity labels instead of the themed ones
    #[arg(long, global = true)]
    plain: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a source tree
    Analyze {
        /// Root of the source tree
        path: PathBuf,
        /// Codebase ID the analysis belongs to (generated when omitted)
        #[arg(long)]
        codebase: Option<String>,
        /// Analysis ID (derived from the codebase when omitted)
        #[arg(long)]
        id: Option<String>,
    },
    /// List stored analyses, or the proposals of one analysis
    List {
        /// Analysis ID whose proposals to list
        #[arg(long)]
        analysis: Option<String>,
    },
    /// Show a stored analysis
    Show {
        /// Analysis ID
        id: String,
    },
    /// Generate a modernization proposal for a complete analysis
    Propose {
        /// Analysis ID
        id: String,
    },
    /// Generate a starter skeleton for a proposal
    Scaffold {
        /// Proposal ID
        id: String,
        /// Write the files under this directory instead of listing them
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<RefactoriumConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = RefactoriumConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            config.apply_overrides(|name| std::env::var(name).ok())?;
            config
        }
        None => RefactoriumConfig::from_env()?,
    };
    if let Some(store) = &cli.store {
        config.store_dir = store.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let style = Style {
        spooky: !cli.plain,
        color: std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    };

    match cli.command {
        Commands::Analyze { path, codebase, id } => {
            let service = open_service(&config).await?;
            let codebase_id = codebase.map(CodebaseId).unwrap_or_default();
            info!("Analyzing {} as codebase {}", path.display(), codebase_id);
            let analysis = service
                .analyze_now(codebase_id, id.map(AnalysisId), &path)
                .await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_analysis(&analysis, style);
            }
            if analysis.status == AnalysisStatus::Failed {
                anyhow::bail!(
                    "Analysis failed: {}",
                    analysis.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
        Commands::Show { id } => {
            let service = open_service(&config).await?;
            let analysis = service.get_analysis(&AnalysisId(id)).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_analysis(&analysis, style);
            }
        }
        Commands::List { analysis: Some(id) } => {
            let service = open_service(&config).await?;
            let proposals = service.list_proposals(&AnalysisId(id)).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&proposals)?);
            } else {
                for proposal in &proposals {
                    println!(
                        "{} | {} | {}",
                        proposal.id, proposal.ecosystem, proposal.estimated_effort
                    );
                }
            }
        }
        Commands::List { analysis: None } => {
            let service = open_service(&config).await?;
            let analyses = service.list_analyses().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&analyses)?);
            } else {
                for analysis in &analyses {
                    println!(
                        "{} | {} | {} | {}",
                        analysis.id,
                        analysis.codebase_id,
                        analysis.status,
                        analysis.created_at.to_rfc3339(),
                    );
                }
            }
        }
        Commands::Propose { id } => {
            let service = open_service(&config).await?;
            let proposal = service.create_proposal(&AnalysisId(id)).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&proposal)?);
            } else {
                print_proposal(&proposal);
            }
        }
        Commands::Scaffold { id, out } => {
            let service = open_service(&config).await?;
            let files = service.scaffold(&ProposalId(id)).await?;
            match out {
                Some(dir) => {
                    for (name, content) in &files {
                        write_file(&dir, name, content).await?;
                    }
                    println!("Wrote {} files to {}", files.len(), dir.display());
                }
                None if cli.json => println!("{}", serde_json::to_string_pretty(&files)?),
                None => {
                    for name in files.keys() {
                        println!("{}", name);
                    }
                }
            }
        }
        Commands::Config => {
            let mut shown = config.clone();
            if shown.huggingface.api_token.is_some() {
                shown.huggingface.api_token = Some("***".to_string());
            }
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }
    }

    Ok(())
}

async fn open_service(config: &RefactoriumConfig) -> Result<AnalysisService<JsonStore>> {
    debug!("Opening store at {}", config.store_dir.display());
    let store = JsonStore::new(&config.store_dir)
        .await
        .with_context(|| format!("Failed to open store {}", config.store_dir.display()))?;
    Ok(AnalysisService::new(Arc::new(store), config))
}

async fn write_file(dir: &Path, name: &str, content: &str) -> Result<()> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// How severity labels are rendered.
#[derive(Debug, Clone, Copy)]
struct Style {
    spooky: bool,
    color: bool,
}

impl Style {
    fn severity(&self, level: SeverityLevel) -> String {
        let label = level.label(self.spooky);
        if !self.color {
            return label.to_string();
        }
        match rgb(level.color()) {
            Some((r, g, b)) => format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, label),
            None => label.to_string(),
        }
    }
}

/// Parse `#rrggbb`.
fn rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn print_analysis(analysis: &AnalysisResult, style: Style) {
    println!("Analysis: {}", analysis.id);
    println!("  Codebase: {}", analysis.codebase_id);
    println!("  Status: {} ({}%)", analysis.status, analysis.progress);
    if let Some(error) = &analysis.error {
        println!("  Error: {}", error);
    }
    if analysis.status != AnalysisStatus::Complete {
        return;
    }

    let metrics = &analysis.metrics;
    println!("  Files: {}", metrics.total_files);
    println!("  Lines: {}", metrics.total_lines);
    println!("  Avg complexity: {}", metrics.avg_complexity);
    println!("  Technical debt: {}/100", metrics.technical_debt_score);

    println!("Technologies ({})", analysis.technologies.len());
    for tech in &analysis.technologies {
        println!(
            "  {} {} | {}{}",
            tech.name,
            tech.version.as_deref().unwrap_or("-"),
            style.severity(tech.severity),
            if tech.deprecated { " | deprecated" } else { "" },
        );
    }

    println!("Code smells ({})", analysis.code_smells.len());
    for smell in &analysis.code_smells {
        println!(
            "  {}:{} | {} | {} - {}",
            smell.file,
            smell.line,
            style.severity(smell.severity),
            smell.kind,
            smell.description,
        );
    }

    println!("Hotspots ({})", analysis.cursed_files.len());
    for hotspot in &analysis.cursed_files {
        println!(
            "  {} | {} | {} issues, complexity {}, {} lines",
            hotspot.path,
            style.severity(hotspot.severity),
            hotspot.issues,
            hotspot.complexity,
            hotspot.lines,
        );
    }
}

fn print_proposal(proposal: &ArchitectureProposal) {
    println!("Proposal: {}", proposal.id);
    println!("  Analysis: {}", proposal.analysis_id);
    println!("  Ecosystem: {}", proposal.ecosystem);
    println!("  Effort: {}", proposal.estimated_effort);

    println!("Current stack");
    for item in &proposal.current_stack {
        let version = item.version.as_deref().unwrap_or("-");
        match &item.issue {
            Some(issue) => println!("  {} {} | {}", item.name, version, issue),
            None => println!("  {} {}", item.name, version),
        }
    }

    println!("Proposed stack");
    for item in &proposal.proposed_stack {
        println!("  {}", item);
    }

    println!("Phases");
    for phase in &proposal.phases {
        println!("  {}. {} ({})", phase.phase, phase.title, phase.priority);
        println!("     {}", phase.description);
        for task in &phase.tasks {
            println!("     - {}", task);
        }
    }

    println!();
    println!("{}", proposal.migration_strategy);
}
