//! planxl CLI - Project timeline workbook exporter
//!
//! Command-line interface for exporting project snapshots as Excel workbooks
//! and gantt-data JSON.

mod config;
mod source;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use planxl_core::{roles, ProjectId, Renderer, SnapshotSource};
use planxl_render::JsonTimelineRenderer;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ExportConfig;
use crate::source::JsonFileSource;

#[derive(Parser)]
#[command(name = "planxl")]
#[command(author, version, about = "Project timeline workbook exporter", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Export settings (defaults to ./planxl.toml when present)
    #[arg(short, long, global = true, env = "PLANXL_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a project as an Excel workbook
    Export {
        /// Snapshot JSON file (one project or an array)
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,

        /// Project id inside the snapshot file
        #[arg(short, long)]
        project: ProjectId,

        /// Output file, or a directory for the suggested file name
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the nested gantt data of a project as JSON
    Timeline {
        /// Snapshot JSON file (one project or an array)
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,

        /// Project id inside the snapshot file
        #[arg(short, long)]
        project: ProjectId,

        /// Single-line output
        #[arg(long)]
        compact: bool,
    },

    /// List the default team roles
    Roles {
        /// Show only this role code
        #[arg(value_name = "CODE")]
        code: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match cli.command {
        Commands::Export {
            snapshot,
            project,
            output,
        } => cmd_export(cli.config.as_deref(), &snapshot, project, output.as_deref()),
        Commands::Timeline {
            snapshot,
            project,
            compact,
        } => cmd_timeline(&snapshot, project, compact),
        Commands::Roles { code, json } => cmd_roles(code.as_deref(), json),
    }
}

fn cmd_export(
    config: Option<&Path>,
    snapshot: &Path,
    id: ProjectId,
    output: Option<&Path>,
) -> Result<()> {
    let config = ExportConfig::discover(config, Path::new("."))?;
    let exporter = config.exporter();
    let source = JsonFileSource::new(snapshot);

    let workbook = exporter
        .export_from(&source, id)
        .with_context(|| format!("failed to export project {id} from {}", snapshot.display()))?;

    let target = output_path(output, &workbook.file_name);
    workbook
        .save(&target)
        .with_context(|| format!("failed to write {}", target.display()))?;

    info!(path = %target.display(), bytes = workbook.bytes.len(), "wrote workbook");
    println!("{}", target.display());
    Ok(())
}

fn cmd_timeline(snapshot: &Path, id: ProjectId, compact: bool) -> Result<()> {
    let source = JsonFileSource::new(snapshot);
    let project = source
        .load(id)
        .with_context(|| format!("failed to load project {id} from {}", snapshot.display()))?;

    let mut renderer = JsonTimelineRenderer::new();
    if compact {
        renderer = renderer.compact();
    }
    println!("{}", renderer.render(&project)?);
    Ok(())
}

fn cmd_roles(code: Option<&str>, json: bool) -> Result<()> {
    let catalog = match code {
        Some(code) => {
            let role = roles::find_role(code)
                .with_context(|| format!("unknown role '{code}'"))?;
            std::slice::from_ref(role)
        }
        None => roles::default_roles(),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }
    for role in catalog {
        println!(
            "{:<10} {:<16} {}  {}",
            role.name, role.display_name, role.color, role.description
        );
    }
    Ok(())
}

/// Where to write a workbook: an explicit file, a directory plus the
/// suggested name, or the suggested name in the current directory.
fn output_path(output: Option<&Path>, suggested: &str) -> PathBuf {
    let file_name = sanitize_file_name(suggested);
    match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(file_name),
    }
}

/// Project names may contain path separators
fn sanitize_file_name(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}
