use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use callparse::io::{call_title_from_path, write_metadata_table};
use callparse::{
    parse_document, read_markup_file, run_batch, write_round_tables, BatchConfig, MetadataRecord,
    ParserConfig, Round,
};

#[derive(Parser)]
#[command(name = "callparse")]
#[command(author, version, about = "Earnings call transcript parser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a single transcript into presentation and Q&A tables
    Parse {
        /// Input markup file (PDF converted to styled HTML)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for the tables
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Also write the full transcript as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Parse every transcript in a directory
    Batch {
        /// Directory containing the markup files
        #[arg(short, long)]
        input_dir: PathBuf,

        /// Output directory for the tables and meta_data.csv
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Glob selecting the documents, relative to the input directory
        #[arg(long, default_value = "**/*.html")]
        pattern: String,

        /// Number of worker threads (defaults to one per core)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Only write meta_data.csv
        #[arg(long)]
        metadata_only: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print what a transcript parses to without writing anything
    Inspect {
        /// Input markup file
        #[arg(short, long)]
        input: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            input,
            out_dir,
            json,
            verbose,
        } => {
            setup_logging(verbose);
            parse_transcript(input, out_dir, json)
        }
        Commands::Batch {
            input_dir,
            out_dir,
            pattern,
            jobs,
            metadata_only,
            verbose,
        } => {
            setup_logging(verbose);
            let config = BatchConfig {
                pattern,
                jobs,
                write_content: !metadata_only,
                ..BatchConfig::new(input_dir, out_dir)
            };
            batch_transcripts(config)
        }
        Commands::Inspect { input, verbose } => {
            setup_logging(verbose);
            inspect_transcript(input)
        }
    }
}

/// RUST_LOG overrides the level picked by --verbose
fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn parse_transcript(input: PathBuf, out_dir: PathBuf, json: Option<PathBuf>) -> Result<()> {
    info!("Loading transcript from {:?}", input);
    let markup = read_markup_file(&input)?;
    let call_title = call_title_from_path(&input);

    let parsed = parse_document(&markup, &call_title, &ParserConfig::default());
    for diagnostic in &parsed.diagnostics {
        warn!("{}", diagnostic);
    }

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create directory: {:?}", out_dir))?;

    if parsed.content_parsed {
        for path in write_round_tables(&parsed.transcript, &out_dir)? {
            info!("Table written to {:?}", path);
        }
    }

    let record = MetadataRecord::from_metadata(&parsed.transcript.metadata)?;
    let meta_path = out_dir.join("meta_data.csv");
    write_metadata_table(&[record], &meta_path)?;
    info!("Metadata written to {:?}", meta_path);

    if let Some(json_path) = json {
        parsed.transcript.write_json(&json_path)?;
        info!("Transcript written to {:?}", json_path);
    }

    Ok(())
}

fn batch_transcripts(config: BatchConfig) -> Result<()> {
    let summary = run_batch(&config, &ParserConfig::default())?;

    for diagnostic in &summary.diagnostics {
        warn!("{}", diagnostic);
    }
    info!("Metadata written to {:?}", summary.metadata_path);

    Ok(())
}

fn inspect_transcript(input: PathBuf) -> Result<()> {
    info!("Inspecting transcript from {:?}", input);
    let markup = read_markup_file(&input)?;
    let call_title = call_title_from_path(&input);
    let parsed = parse_document(&markup, &call_title, &ParserConfig::default());
    let transcript = &parsed.transcript;
    let meta = &transcript.metadata;

    println!("Transcript Summary");
    println!("==================");
    println!("Call: {}", meta.call_title);
    println!("Firm: {}", meta.firm_name);
    println!("Ticker: {}", meta.ticker.as_deref().unwrap_or("-"));
    println!("Type: {}", meta.call_type);
    println!(
        "Time (EST): {}",
        meta.time_est_string().unwrap_or_else(|| format!("unparsed ({:?})", meta.time_raw))
    );
    println!();

    println!("Participants");
    println!("------------");
    for (role, names) in meta.participants.roles() {
        println!("{}", role.heading());
        for name in names {
            match meta.participants.title(name) {
                Some(title) if !title.is_empty() => println!("  {} ({})", name, title),
                _ => println!("  {}", name),
            }
        }
    }
    println!();

    for round in [Round::Presentation, Round::QA] {
        let paragraphs = transcript.paragraphs(round);
        println!("{}: {} paragraphs", round, paragraphs.len());
        let mut speakers: Vec<&str> = Vec::new();
        for paragraph in paragraphs {
            if !speakers.contains(&paragraph.speaker.as_str()) {
                speakers.push(&paragraph.speaker);
            }
        }
        for speaker in speakers {
            let count = paragraphs.iter().filter(|p| p.speaker == speaker).count();
            let words: usize = paragraphs
                .iter()
                .filter(|p| p.speaker == speaker)
                .map(|p| p.text.split_whitespace().count())
                .sum();
            let name = if speaker.is_empty() { "(unattributed)" } else { speaker };
            println!("  {}: {} paragraphs, {} words", name, count, words);
        }
    }

    if !parsed.diagnostics.is_empty() {
        println!();
        println!("Diagnostics");
        println!("-----------");
        for diagnostic in &parsed.diagnostics {
            println!("{}", diagnostic.kind);
        }
    }

    Ok(())
}
