use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ldwizard", about = "LD Wizard: CSV to RDF via RML mappings", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to the settings file (defaults to ./ldwizard.toml)
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default ldwizard.toml in the current directory
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },

    /// Transform a CSV file to Turtle
    Transform {
        #[command(flatten)]
        args: ConfigArgs,

        /// Write the result to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Print the RML mapping for a CSV file and configuration
    Generate {
        #[command(flatten)]
        args: ConfigArgs,

        /// Write the mapping to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Run an RML or YARRRML mapping as written over a CSV file
    Execute {
        /// Mapping document (.ttl, or .yml/.yaml for YARRRML)
        mapping: PathBuf,

        /// CSV file bound to every logical source of the mapping
        #[arg(long)]
        csv: PathBuf,

        /// CSV field delimiter (detected when omitted)
        #[arg(long)]
        delimiter: Option<char>,

        /// IRI bound to the empty prefix in the output
        #[arg(long)]
        base_iri: Option<String>,

        /// Write the result to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Reconstruct a JSON configuration from an RML or YARRRML mapping
    Extract {
        /// Mapping document (.ttl, or .yml/.yaml for YARRRML)
        mapping: PathBuf,

        /// CSV file whose header row lists the columns
        #[arg(long)]
        csv: PathBuf,

        /// CSV field delimiter (detected when omitted)
        #[arg(long)]
        delimiter: Option<char>,

        /// Fail on rules that cannot be mapped back to a column
        #[arg(long)]
        strict: bool,

        /// Write the configuration to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

/// Inputs that together determine a transformation configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// CSV input file
    pub csv: PathBuf,

    /// JSON transformation configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Existing mapping (RML Turtle or YARRRML) to start from
    #[arg(long)]
    pub mapping: Option<PathBuf>,

    /// Base IRI for generated subjects
    #[arg(long)]
    pub base_iri: Option<String>,

    /// Name of the column that identifies each row
    #[arg(long)]
    pub key: Option<String>,

    /// Class IRI every row is typed with
    #[arg(long)]
    pub class: Option<String>,

    /// CSV field delimiter (detected when omitted)
    #[arg(long)]
    pub delimiter: Option<char>,
}
