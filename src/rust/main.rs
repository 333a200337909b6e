use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::info;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use protexplorer::config::{AnalysisConfig, AnalysisConfigBuilder};
use protexplorer::io::read_fasta;
use protexplorer::isoelectric::PkaSet;
use protexplorer::report::{
    export_sequence, render_text, write_composition_csv, write_exports, write_json, BatchReport,
    ProteinAnalyzer, SEQUENCE_EXPORT_NAME,
};
use protexplorer::structure::StructureView;
use protexplorer::uniprot::UniProtClient;

#[derive(Parser)]
#[command(name = "protexplorer")]
#[command(about = "Protein explorer: amino acid composition, aromatic residues and isoelectric point")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// pKa constant set for the isoelectric point
    #[arg(long, global = true)]
    pka_set: Option<PkaSet>,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Directory to write one analysis text file per protein
    #[arg(short, long, global = true)]
    export: Option<PathBuf>,

    /// Disable coloured sequence output
    #[arg(long, global = true, default_value = "false")]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a protein from UniProt by accession and analyze it
    Fetch {
        /// UniProt accession or entry name (e.g. P69905, HBB_HUMAN)
        accession: String,

        /// UniProt REST base URL
        #[arg(long, env = "PROTEXPLORER_UNIPROT_URL")]
        uniprot_url: Option<String>,

        /// Also write the bare sequence to protein_sequence.txt in the export directory
        #[arg(long, default_value = "false")]
        export_sequence: bool,
    },
    /// Analyze every record of a FASTA file (any compression, "-" for stdin)
    Analyze {
        /// Input FASTA file path
        input: PathBuf,
    },
    /// Print the isoelectric point of a sequence
    Pi {
        /// Protein sequence in one-letter codes
        sequence: String,
    },
    /// Show 3D structure links for a PDB entry
    Structure {
        /// PDB identifier (e.g. 1A3N, 4HHB)
        pdb_id: String,

        /// Write a standalone 3Dmol.js viewer page to this path
        #[arg(long)]
        html: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Full report as JSON
    Json,
    /// Residue composition as CSV
    Csv,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_config(cli: &Cli, uniprot_url: Option<&str>) -> Result<AnalysisConfig> {
    let base = match &cli.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    let color = base.display.color && !cli.no_color && io::stdout().is_terminal();

    let mut builder = AnalysisConfigBuilder::from_config(base).color(color);
    if let Some(pka_set) = cli.pka_set {
        builder = builder.pka_set(pka_set);
    }
    if let Some(url) = uniprot_url {
        builder = builder.uniprot_url(url);
    }
    Ok(builder.build()?)
}

fn print_report(report: &BatchReport, config: &AnalysisConfig, format: OutputFormat) -> Result<()> {
    for failure in &report.failures {
        eprintln!("Record {} ({}) skipped: {}", failure.index + 1, failure.id, failure.message);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => {
            for (i, analysis) in report.analyses.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                write!(out, "{}", render_text(analysis, &config.display))?;
            }
        }
        OutputFormat::Json => {
            write_json(&mut out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_composition_csv(&mut out, &report.analyses)?,
    }
    Ok(())
}

fn export(report: &BatchReport, dir: Option<&Path>) -> Result<()> {
    if let Some(dir) = dir {
        let written = write_exports(dir, &report.analyses)?;
        eprintln!("Wrote {} analysis file(s) to {}", written.len(), dir.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Fetch { accession, uniprot_url, export_sequence: with_sequence } => {
            if *with_sequence && cli.export.is_none() {
                bail!("--export-sequence needs an --export directory");
            }
            let config = load_config(&cli, uniprot_url.as_deref())?;
            let client = UniProtClient::new(&config.uniprot)?;
            let record = client.fetch(accession)?;

            let analyzer = ProteinAnalyzer::new(&config.estimator);
            let report = analyzer.analyze_records(std::slice::from_ref(&record));
            print_report(&report, &config, cli.format)?;
            if report.all_failed() {
                bail!("UniProt entry {} could not be analyzed", accession);
            }
            export(&report, cli.export.as_deref())?;

            if let (true, Some(dir)) = (*with_sequence, cli.export.as_deref()) {
                let path = dir.join(SEQUENCE_EXPORT_NAME);
                std::fs::write(&path, export_sequence(&report.analyses[0]))
                    .with_context(|| format!("writing {}", path.display()))?;
                info!("Wrote {}", path.display());
            }
        }
        Commands::Analyze { input } => {
            let config = load_config(&cli, None)?;
            let parsed = read_fasta(input)
                .with_context(|| format!("reading {}", input.display()))?;
            info!("Read {} record(s) from {}", parsed.records.len(), input.display());

            let analyzer = ProteinAnalyzer::new(&config.estimator);
            let report = analyzer.analyze_parsed(&parsed);
            print_report(&report, &config, cli.format)?;
            if report.all_failed() {
                bail!("none of the {} record(s) could be analyzed", report.record_count());
            }
            export(&report, cli.export.as_deref())?;
        }
        Commands::Pi { sequence } => {
            let config = load_config(&cli, None)?;
            let analyzer = ProteinAnalyzer::new(&config.estimator);
            let sequence = protexplorer::Sequence::new(sequence)?;
            let analysis = analyzer.analyze_sequence("sequence", "sequence", &sequence);
            match cli.format {
                OutputFormat::Text => println!("{}", analysis.isoelectric_point),
                _ => {
                    let report = BatchReport { analyses: vec![analysis], failures: Vec::new() };
                    print_report(&report, &config, cli.format)?;
                }
            }
        }
        Commands::Structure { pdb_id, html } => {
            let config = load_config(&cli, None)?;
            let view = StructureView::new(pdb_id, &config.viewer)?;
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
                _ => {
                    println!("Structure: {}", view.id);
                    println!("Viewer query: {}", view.query());
                    println!("Entry: {}", view.entry_url());
                    println!("Coordinates: {}", view.download_url());
                }
            }
            if let Some(path) = html {
                std::fs::write(path, view.to_html())
                    .with_context(|| format!("writing {}", path.display()))?;
                eprintln!("Viewer page written to {}", path.display());
            }
        }
    }

    Ok(())
}
