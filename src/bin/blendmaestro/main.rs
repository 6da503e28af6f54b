//! BlendMaestro CLI - export blend shapes into dataset assets and import them
//! into mesh directories.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use blendmaestro::settings::{CollisionMode, Settings};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BLENDMAESTRO_BUILD_DATE"), ")");

#[derive(Parser)]
#[command(name = "blendmaestro", version = VERSION, about, long_about = None)]
struct Cli {
    /// More output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Settings file (default: user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List meshes and their blend shapes
    #[command(alias = "l")]
    List {
        /// Mesh directory
        dir: PathBuf,
        /// Include meshes without blend shapes
        #[arg(long)]
        all: bool,
    },

    /// Export selected blend shapes of a mesh into a dataset asset
    #[command(alias = "e")]
    Export {
        dir: PathBuf,
        mesh: String,
        /// Blend shape indices (comma separated)
        #[arg(short, long, value_delimiter = ',', conflicts_with = "shape", required_unless_present = "shape")]
        index: Vec<usize>,
        /// Blend shape names (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        shape: Vec<String>,
        /// Output asset file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Import a dataset asset into matching meshes
    #[command(alias = "i")]
    Import {
        dir: PathBuf,
        asset: PathBuf,
        /// Target mesh handle (default: every mesh named like the dataset)
        #[arg(short, long)]
        mesh: Option<String>,
        /// Collision handling (default from settings)
        #[arg(short, long, value_enum)]
        policy: Option<PolicyArg>,
        /// Do not back up meshes before writing
        #[arg(long)]
        no_backup: bool,
    },

    /// Show the contents of a dataset asset
    Inspect { asset: PathBuf },

    /// Remove a blend shape from a mesh
    Remove { dir: PathBuf, mesh: String, shape: String },

    /// Convert a dataset asset to plain JSON
    ToJson {
        asset: PathBuf,
        output: PathBuf,
        /// Indented output (default from settings)
        #[arg(long)]
        pretty: bool,
    },

    /// Convert plain JSON (including legacy exports) to a dataset asset
    FromJson { input: PathBuf, output: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Ask,
    Overwrite,
    Skip,
}

impl From<PolicyArg> for CollisionMode {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Ask => CollisionMode::Ask,
            PolicyArg::Overwrite => CollisionMode::Overwrite,
            PolicyArg::Skip => CollisionMode::Skip,
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("BLENDMAESTRO_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("blendmaestro={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<Settings> {
    use anyhow::Context;
    match path {
        Some(p) => Settings::load_from(p).with_context(|| format!("failed to load settings from {}", p.display())),
        None => Ok(Settings::load()),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = load_settings(cli.config.as_ref())?;

    match cli.command {
        Command::List { dir, all } => commands::cmd_list(&settings, &dir, all),
        Command::Export { dir, mesh, index, shape, output } => {
            commands::cmd_export(&settings, &dir, &mesh, &index, &shape, &output)
        }
        Command::Import { dir, asset, mesh, policy, no_backup } => {
            let mode = policy.map(CollisionMode::from).unwrap_or(settings.collision_policy);
            commands::cmd_import(&settings, &dir, &asset, mesh.as_deref(), mode, !no_backup)
        }
        Command::Inspect { asset } => commands::cmd_inspect(&settings, &asset),
        Command::Remove { dir, mesh, shape } => commands::cmd_remove(&settings, &dir, &mesh, &shape),
        Command::ToJson { asset, output, pretty } => {
            commands::cmd_to_json(&settings, &asset, &output, pretty || settings.pretty_json)
        }
        Command::FromJson { input, output } => commands::cmd_from_json(&settings, &input, &output),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
