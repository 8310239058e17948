use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "ligdom - finds which Pfam domains of PDB structures are in contact with selected ligands.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to process structures in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a directory of PDB files and report ligand-binding Pfam domains.
    Scan(ScanArgs),
    /// Parse a single PDB file and print its chains, ligands and cross-references.
    Inspect(InspectArgs),
}

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Path to the scan configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Input Overrides ---
    /// Directory containing the *.pdb files to scan.
    #[arg(long, value_name = "DIR")]
    pub pdb_directory: Option<PathBuf>,

    /// Residue name of a ligand to look for. Can be used multiple times and
    /// replaces the ligand list of the config file.
    #[arg(short, long = "ligand", value_name = "NAME")]
    pub ligands: Vec<String>,

    /// Process only the first N files (in path order).
    #[arg(short, long, value_name = "N")]
    pub batch_size: Option<usize>,

    // --- Pfam Overrides ---
    /// Directory where Pfam XML documents are cached.
    #[arg(long, value_name = "DIR")]
    pub cache_directory: Option<PathBuf>,

    /// Never contact the Pfam server; structures with uncached documents are skipped.
    #[arg(long)]
    pub offline: bool,

    // --- Report Overrides ---
    /// List every ligand contact in the log report instead of only matched domains.
    #[arg(short, long)]
    pub environment: bool,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the PDB file.
    #[arg(required = true, value_name = "FILE")]
    pub file: PathBuf,

    /// Residue name to treat as a ligand. Can be used multiple times.
    #[arg(short, long = "ligand", value_name = "NAME")]
    pub ligands: Vec<String>,
}
