use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use ua_classifier::{access_log, UaClassifier};

#[derive(Parser)]
#[command(name = "ua-report", about = "User-Agent parser for web server access logs")]
struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract distinct User-Agent values from an access log, sorted.
    Log {
        /// Access log to read.
        #[arg(short = 'f', long)]
        logfile: PathBuf,
        /// Where to write the User-Agent list.
        #[arg(short = 'u', long)]
        uafile: PathBuf,
    },
    /// Classify a User-Agent list and write a CSV report.
    Save {
        /// User-Agent list, one per line.
        #[arg(short = 'u', long)]
        uafile: PathBuf,
        /// Where to write the CSV report.
        #[arg(short = 's', long)]
        savefile: PathBuf,
        /// YAML catalog configuration replacing the built-in catalogs.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Command::Log { logfile, uafile } => parse_log(&logfile, &uafile),
        Command::Save {
            uafile,
            savefile,
            config,
        } => parse_save(&uafile, &savefile, config.as_deref()),
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

fn parse_log(logfile: &Path, uafile: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(logfile)
        .with_context(|| format!("reading access log {}", logfile.display()))?;
    let uas = access_log::collect_user_agents(content.lines());

    let out = File::create(uafile)
        .with_context(|| format!("creating {}", uafile.display()))?;
    access_log::write_user_agents(BufWriter::new(out), &uas)
        .with_context(|| format!("writing {}", uafile.display()))?;

    tracing::info!(count = uas.len(), path = %uafile.display(), "wrote user agents");
    Ok(())
}

fn parse_save(uafile: &Path, savefile: &Path, config: Option<&Path>) -> anyhow::Result<()> {
    let classifier = match config {
        Some(path) => UaClassifier::from_config_path(path)
            .with_context(|| format!("loading catalog config {}", path.display()))?,
        None => UaClassifier::new(),
    };

    let content = std::fs::read_to_string(uafile)
        .with_context(|| format!("reading {}", uafile.display()))?;
    let lines: Vec<&str> = content.lines().collect();

    let out = File::create(savefile)
        .with_context(|| format!("creating {}", savefile.display()))?;
    access_log::write_report(BufWriter::new(out), &classifier, &lines)
        .with_context(|| format!("writing report {}", savefile.display()))?;

    tracing::info!(rows = lines.len(), path = %savefile.display(), "wrote report");
    Ok(())
}
