use clap::Parser;
use eyre::{Context, Result, eyre};
use revelation_to_keepassxc::utils::{self, ConvertConfig, ConvertOutcome};
use revelation_to_keepassxc::{Compat, convert};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Convert a Revelation XML export into a KeePassXC-compatible CSV file.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Exported Revelation XML file.
    #[arg(value_name = "XML")]
    input: PathBuf,

    /// CSV file to write. Replaced atomically if it exists.
    #[arg(value_name = "CSV")]
    output: PathBuf,

    /// Path to a specific configuration file.
    /// Defaults to $XDG_CONFIG_HOME/revelation-to-keepassxc/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Reproduce the legacy converter's output: notes replace the description,
    /// card expiry/CCV lines are labelled "Type:", empty ports are still joined.
    #[arg(long)]
    legacy: bool,

    /// Log each folder and skipped entry.
    #[arg(short, long)]
    verbose: bool,

    /// Only print errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    legacy: Option<bool>,
}

fn load_file_config(explicit_path: Option<&Path>) -> Result<FileConfig> {
    let path = if let Some(p) = explicit_path {
        if !p.exists() {
            return Err(eyre!("Config file not found: {}", p.display()));
        }
        Some(p.to_path_buf())
    } else {
        dirs::config_dir()
            .map(|d| d.join("revelation-to-keepassxc/config.toml"))
            .filter(|p| p.exists())
    };

    match path {
        None => Ok(FileConfig::default()),
        Some(p) => {
            let content = fs::read_to_string(&p)
                .wrap_err_with(|| format!("Failed to read config: {}", p.display()))?;
            toml::from_str(&content)
                .wrap_err_with(|| format!("Failed to parse config: {}", p.display()))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    // 1. Load config file (CLI path > default path)
    let file_cfg = load_file_config(cli.config.as_deref())?;

    // 2. Resolve compatibility mode (either CLI or config can turn it on)
    let legacy = cli.legacy || file_cfg.legacy.unwrap_or(false);

    let config = ConvertConfig {
        input: cli.input,
        output: cli.output,
        compat: if legacy { Compat::Legacy } else { Compat::Standard },
        quiet: cli.quiet,
    };

    // 3. Run the conversion
    let outcome = convert::execute(&config).wrap_err_with(|| {
        format!(
            "Conversion of {} failed; {} left untouched",
            config.input.display(),
            config.output.display()
        )
    })?;

    match outcome {
        ConvertOutcome::Empty => println!("No data were imported"),
        ConvertOutcome::Written { records, skipped } => {
            if !config.quiet {
                eprintln!(
                    "Exported {} entries to {} ({} skipped)",
                    records,
                    config.output.display(),
                    skipped
                );
                eprintln!("The CSV holds every password in plain text. Delete it after importing.");
            }
        }
    }

    Ok(())
}
