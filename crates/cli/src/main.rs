use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use scope_engine::{EngineConfig, FileKind, ScopeEngine, TaskDescription};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scope")]
#[command(about = "Workspace structure and task relevance for TypeScript/JavaScript projects", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file (SCOPE_* environment variables still apply)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a workspace: files, dependencies and patterns
    Analyze(AnalyzeArgs),

    /// Parse a task description into intent and scope keywords
    Parse(ParseArgs),

    /// Rank workspace files by relevance to a task
    Rank(RankArgs),

    /// Show the structure of a single source file
    Structure(StructureArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Workspace root (default: configured root, else current directory)
    root: Option<PathBuf>,

    /// Include scan statistics in the output
    #[arg(long)]
    stats: bool,
}

#[derive(Args)]
struct ParseArgs {
    /// Free-text task description
    task: String,
}

#[derive(Args)]
struct RankArgs {
    /// Free-text task description
    task: String,

    /// Workspace root (default: configured root, else current directory)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Maximum files to print
    #[arg(short, long, default_value_t = 20)]
    limit: usize,
}

#[derive(Args)]
struct StructureArgs {
    /// Source file, absolute or relative to the workspace root
    file: PathBuf,

    /// Workspace root (default: configured root, else current directory)
    #[arg(short, long)]
    root: Option<PathBuf>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RankedFile {
    path: PathBuf,
    kind: FileKind,
    score: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RankOutput {
    task: TaskDescription,
    total_files: usize,
    files: Vec<RankedFile>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = EngineConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let output = match cli.command {
        Commands::Analyze(args) => run_analyze(config, args).await?,
        Commands::Parse(args) => run_parse(config, args)?,
        Commands::Rank(args) => run_rank(config, args).await?,
        Commands::Structure(args) => run_structure(config, args).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Engine rooted at `root`, the configured root, or the current directory.
/// The analyzer makes the root absolute and folds `.`/`..` segments.
fn engine_at(mut config: EngineConfig, root: Option<PathBuf>) -> Result<ScopeEngine> {
    let root = root
        .or_else(|| config.workspace_root.take())
        .unwrap_or_else(|| PathBuf::from("."));
    log::debug!("Workspace root: {}", root.display());

    config.workspace_root = Some(root);
    ScopeEngine::new(config).context("Failed to create engine")
}

async fn run_analyze(config: EngineConfig, args: AnalyzeArgs) -> Result<serde_json::Value> {
    let engine = engine_at(config, args.root)?;
    let analysis = engine
        .analyze_workspace(None)
        .await
        .context("Workspace analysis failed")?;

    let mut value = serde_json::to_value(analysis.as_ref())?;
    if args.stats {
        if let (Some(map), Some(stats)) = (value.as_object_mut(), engine.last_stats().await) {
            map.insert("stats".to_string(), serde_json::to_value(stats)?);
        }
    }
    Ok(value)
}

fn run_parse(config: EngineConfig, args: ParseArgs) -> Result<serde_json::Value> {
    let engine = ScopeEngine::new(config).context("Failed to create engine")?;
    let task = engine.parse_task_description(&args.task)?;
    Ok(serde_json::to_value(task)?)
}

async fn run_rank(config: EngineConfig, args: RankArgs) -> Result<serde_json::Value> {
    let engine = engine_at(config, args.root)?;
    let task = engine.parse_task_description(&args.task)?;
    let scored = engine
        .find_relevant_scored(&task, None)
        .await
        .context("Ranking failed")?;

    let output = RankOutput {
        total_files: scored.len(),
        files: scored
            .into_iter()
            .take(args.limit)
            .map(|s| RankedFile {
                path: s.file.path,
                kind: s.file.kind,
                score: s.score,
            })
            .collect(),
        task,
    };
    Ok(serde_json::to_value(output)?)
}

async fn run_structure(config: EngineConfig, args: StructureArgs) -> Result<serde_json::Value> {
    let engine = engine_at(config, args.root)?;
    let structure = engine
        .analyze_file(&args.file)
        .await
        .with_context(|| format!("Failed to analyze {}", args.file.display()))?;
    Ok(serde_json::to_value(structure)?)
}
