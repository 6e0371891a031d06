//! BoardGraph CLI - circuit board JSON validation and graph export from the command line.

use anyhow::{Context, Result};
use boardgraph::{
    BoardGraphError, BoardInspector, BoardReport, DiagnosticKind, GraphOptions, IdEncoding,
    InspectOptions,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "boardgraph")]
#[command(about = "Circuit board JSON validation and graph export tool", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a board JSON file
    Check {
        /// Path to board .json file, or - for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Also fail when nets reference undeclared pins
        #[arg(long)]
        strict: bool,
    },

    /// Export the node/link graph of a valid board
    Graph {
        /// Path to board .json file, or - for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write graph JSON to this file instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        graph: GraphArgs,
    },

    /// Validate, build the graph and summarize connectivity
    Inspect {
        /// Path to board .json file, or - for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: ReportFormat,

        /// Also fail when nets reference undeclared pins
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        graph: GraphArgs,
    },
}

#[derive(Args)]
struct GraphArgs {
    /// Escape '-', '.' and '\' in node ids so distinct pins never share an id
    #[arg(long)]
    escaped_ids: bool,

    /// Drop net links that point at undeclared pins
    #[arg(long)]
    skip_dangling: bool,
}

impl GraphArgs {
    fn options(&self) -> GraphOptions {
        GraphOptions {
            id_encoding: if self.escaped_ids {
                IdEncoding::Escaped
            } else {
                IdEncoding::Legacy
            },
            skip_dangling_links: self.skip_dangling,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for CI/CD
    Json,
    /// GitHub Actions format
    Github,
}

#[derive(Clone, ValueEnum)]
enum ReportFormat {
    /// Human-readable output
    Human,
    /// Full JSON report including the graph
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Check {
            file,
            format,
            strict,
        } => handle_check(&file, format, strict),
        Commands::Graph {
            file,
            output,
            compact,
            graph,
        } => handle_graph(&file, output.as_deref(), compact, &graph),
        Commands::Inspect {
            file,
            format,
            strict,
            graph,
        } => handle_inspect(&file, format, strict, &graph),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    process::exit(exit_code);
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        tracing::Level::ERROR
    } else {
        match verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(file: &Path) -> Result<Value> {
    if file.as_os_str() == "-" {
        let text = std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?;
        return boardgraph::parse_board_str(&text).context("Failed to parse board JSON from stdin");
    }
    tracing::info!("Reading board file: {}", file.display());
    boardgraph::load_board_value(file)
        .with_context(|| format!("Failed to load board file {}", file.display()))
}

fn handle_check(file: &Path, format: OutputFormat, strict: bool) -> Result<i32> {
    let options = InspectOptions {
        strict,
        ..Default::default()
    };
    let report = BoardInspector::inspect_value(read_input(file)?, &options)?;

    match format {
        OutputFormat::Human => output_human(file, &report),
        OutputFormat::Json => output_json(file, &report)?,
        OutputFormat::Github => output_github(file, &report, strict),
    }

    Ok(if report.passes() { 0 } else { 1 })
}

fn handle_graph(
    file: &Path,
    output: Option<&Path>,
    compact: bool,
    args: &GraphArgs,
) -> Result<i32> {
    let graph = match BoardInspector::graph_for(read_input(file)?, &args.options()) {
        Ok(graph) => graph,
        Err(BoardGraphError::Invalid(messages)) => {
            eprintln!("Board failed validation; graph not built:");
            for message in messages {
                eprintln!("  - {}", message);
            }
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };

    let text = if compact {
        serde_json::to_string(&graph)?
    } else {
        serde_json::to_string_pretty(&graph)?
    };

    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", text),
    }

    Ok(0)
}

fn handle_inspect(
    file: &Path,
    format: ReportFormat,
    strict: bool,
    args: &GraphArgs,
) -> Result<i32> {
    let options = InspectOptions {
        graph: args.options(),
        strict,
    };
    let report = BoardInspector::inspect_value(read_input(file)?, &options)?;

    match format {
        ReportFormat::Human => {
            output_human(file, &report);
            output_summary(&report);
        }
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(if report.passes() { 0 } else { 1 })
}

fn output_human(file: &Path, report: &BoardReport) {
    println!("\nFile: {}", file.display());
    println!("Board: {}", report.name);
    println!("{}", "─".repeat(60));

    if report.validation.is_empty() && report.diagnostics.is_empty() {
        println!("  No issues found");
        return;
    }

    if !report.validation.is_empty() {
        println!("\n  INVALID:");
        for message in &report.validation {
            println!("    - {}", message);
        }
    }

    if !report.diagnostics.is_empty() {
        println!("\n  NOTES:");
        for diagnostic in &report.diagnostics {
            println!("    - {}", diagnostic.message);
        }
    }
}

fn output_summary(report: &BoardReport) {
    let Some(stats) = report.stats else {
        return;
    };
    println!("\n  Summary:");
    println!("    Components:   {}", stats.component_nodes);
    println!("    Pins:         {}", stats.pin_nodes);
    println!("    Pin links:    {}", stats.containment_links);
    println!("    Net links:    {}", stats.net_links);
    println!("    Dangling:     {}", stats.dangling_links);
    if let Some(groups) = report.connected_groups {
        println!("    Groups:       {}", groups);
    }
}

fn output_json(file: &Path, report: &BoardReport) -> Result<()> {
    let output = serde_json::json!({
        "file": file.display().to_string(),
        "board": report.name,
        "valid": report.is_valid(),
        "validation": report.validation,
        "violations": report.violations,
        "diagnostics": report.diagnostics,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_github(file: &Path, report: &BoardReport, strict: bool) {
    for message in &report.validation {
        println!("::error file={}::{}", file.display(), message.replace('\n', " "));
    }
    for diagnostic in &report.diagnostics {
        let level = match diagnostic.kind {
            DiagnosticKind::DanglingReference if strict => "error",
            DiagnosticKind::DanglingReference => "warning",
            DiagnosticKind::DuplicateNodeId => "notice",
        };
        println!("::{} file={}::{}", level, file.display(), diagnostic.message);
    }
}
