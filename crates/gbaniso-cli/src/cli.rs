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
    author = "The gbaniso developers",
    version,
    about = "gbaniso - Calibrates anisotropic grain-boundary properties for multi-grain phase-field models and evaluates them at sample points.",
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

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calibrate kappa, gamma and the mobility constant for every grain pair.
    Calibrate(CalibrateArgs),
    /// Evaluate effective GB properties at the sample points of a CSV file.
    Evaluate(EvaluateArgs),
}

/// Model settings shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Path to the configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Override the GB data file from the config file. Relative to the
    /// current directory, unlike `data-file` inside the config file.
    #[arg(short = 'd', long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Override the diffuse interface width (model length units).
    #[arg(short = 'w', long, value_name = "FLOAT")]
    pub interface_width: Option<f64>,

    /// Override `inclination.enabled` from the config file.
    #[command(flatten)]
    pub inclination: InclinationToggle,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S calibration.tolerance=1e-10
    /// A `data-file` given here is relative to the current directory.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Mutually exclusive flags for switching inclination anisotropy.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct InclinationToggle {
    /// Force inclination anisotropy on.
    #[arg(long)]
    pub inclination: bool,
    /// Force inclination anisotropy off.
    #[arg(long)]
    pub no_inclination: bool,
}

impl InclinationToggle {
    pub fn as_override(self) -> Option<bool> {
        if self.inclination {
            Some(true)
        } else if self.no_inclination {
            Some(false)
        } else {
            None
        }
    }
}

/// Arguments for the `calibrate` subcommand.
#[derive(Args, Debug)]
pub struct CalibrateArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Write the per-pair calibration table to this CSV file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// CSV file of sample points: temperature, eta_0..eta_{N-1}, then gx_i, gy_i, gz_i per grain.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub points: PathBuf,

    /// Path for the CSV file of evaluated properties.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}
