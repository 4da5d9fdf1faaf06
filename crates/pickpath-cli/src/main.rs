use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use pickpath_core::{
    AnalysisConfig, AnalysisRequest, AnalysisResult, Analyzer, DistanceModel, SlotIndex,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod loader;
mod output;

#[derive(Parser)]
#[command(name = "pickpath")]
#[command(about = "Pick Path Analyzer - Estimate picker travel distance per warehouse trip", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze pick and layout tables (CSV or XLSX)
    Analyze {
        /// Pick data table
        #[arg(short, long)]
        picks: PathBuf,

        /// Slot layout table
        #[arg(short, long)]
        layout: PathBuf,

        /// Facility config overrides (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory for per-category result tables
        #[arg(short, long, default_value = output::DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Also save the full result as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Analyze a request document (YAML or JSON) holding layout and picks
    Run {
        /// Input file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for result (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Distance between two slots of a layout table
    Distance {
        /// Slot layout table
        #[arg(short, long)]
        layout: PathBuf,

        /// Facility config overrides (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        from: String,
        to: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Analyze {
            picks,
            layout,
            config,
            output_dir,
            json,
        } => analyze_command(&picks, &layout, config.as_deref(), &output_dir, json),
        Commands::Run { input, output } => run_command(&input, output),
        Commands::Distance {
            layout,
            config,
            from,
            to,
        } => distance_command(&layout, config.as_deref(), &from, &to),
    };

    if let Err(err) = &outcome {
        tracing::error!("Error during analysis: {:#}", err);
    }
    outcome
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => loader::read_document(path)
            .with_context(|| format!("Invalid config file {}", path.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

fn load_request(picks: &Path, layout: &Path, config: Option<&Path>) -> Result<AnalysisRequest> {
    println!("{}", "🔍 Loading data files...".bright_blue());

    let layout_table = loader::read_table(layout)?;
    let pick_table = loader::read_table(picks)?;
    println!("  Pick data columns: {}", pick_table.headers.join(", "));
    println!("  Slot layout columns: {}", layout_table.headers.join(", "));

    let layout_rows = loader::layout_rows(&layout_table)
        .with_context(|| format!("Invalid layout table {}", layout.display()))?;
    let pick_rows = loader::pick_rows(&pick_table)
        .with_context(|| format!("Invalid pick table {}", picks.display()))?;

    println!(
        "  {} layout rows, {} pick rows",
        layout_rows.len().to_string().bright_white().bold(),
        pick_rows.len().to_string().bright_white().bold()
    );
    println!();

    Ok(AnalysisRequest {
        layout: layout_rows,
        picks: pick_rows,
        config: load_config(config)?,
    })
}

fn analyze_command(
    picks: &Path,
    layout: &Path,
    config: Option<&Path>,
    output_dir: &Path,
    json: Option<PathBuf>,
) -> Result<()> {
    let request = load_request(picks, layout, config)?;

    println!("{}", "🚀 Analyzing trips...".bright_blue());
    let analyzer = Analyzer::new(request)?;
    let result = analyzer.analyze();

    print_result(&result);

    let written = output::write_reports(output_dir, &result)?;
    println!(
        "💾 Saved {} result tables to {}",
        written.len(),
        output_dir.display().to_string().bright_white()
    );

    if let Some(json_path) = json {
        let content = serde_json::to_string_pretty(&result)?;
        std::fs::write(&json_path, content)?;
        println!(
            "💾 Saved result to {}",
            json_path.display().to_string().bright_white()
        );
    }

    Ok(())
}

fn run_command(input: &Path, output: Option<PathBuf>) -> Result<()> {
    println!("{}", "🔍 Loading input...".bright_blue());
    let request: AnalysisRequest = loader::read_document(input)?;

    println!(
        "  {} layout rows, {} pick rows",
        request.layout.len().to_string().bright_white().bold(),
        request.picks.len().to_string().bright_white().bold()
    );
    println!();

    println!("{}", "🚀 Analyzing trips...".bright_blue());
    let analyzer = Analyzer::new(request)?;
    let result = analyzer.analyze();

    print_result(&result);

    let json = serde_json::to_string_pretty(&result)?;
    if let Some(output_path) = output {
        std::fs::write(&output_path, json)?;
        println!(
            "💾 Saved result to {}",
            output_path.display().to_string().bright_white()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn distance_command(layout: &Path, config: Option<&Path>, from: &str, to: &str) -> Result<()> {
    let table = loader::read_table(layout)?;
    let rows = loader::layout_rows(&table)
        .with_context(|| format!("Invalid layout table {}", layout.display()))?;
    let config = load_config(config)?;
    config.validate()?;

    let index = SlotIndex::build(&rows);
    let model = DistanceModel::new(&index, &config);
    let distance = model.distance(from, to);

    println!(
        "{} -> {}: {}",
        from.bright_white(),
        to.bright_white(),
        format!("{:.2}", distance).bright_green().bold()
    );

    Ok(())
}

fn print_result(result: &AnalysisResult) {
    let filter = &result.filter;
    println!(
        "  Filtered pick data: {} of {} rows remain ({} excluded trips)",
        filter.retained_rows.to_string().bright_white().bold(),
        filter.input_rows,
        filter.excluded_trips.len()
    );
    println!();

    println!("{}", "✅ Analysis complete!".bright_green().bold());
    println!();

    if result.categories.is_empty() {
        println!("{}", "  No trip categories left to analyze".yellow());
        println!();
        return;
    }

    println!("{}", "📊 Results:".bright_yellow().bold());
    for report in &result.categories {
        for (i, line) in report.summary_line().lines().enumerate() {
            if i == 0 {
                println!("  {}", line.bright_white().bold());
            } else {
                println!("    • {}", line);
            }
        }
        println!();
    }
}
