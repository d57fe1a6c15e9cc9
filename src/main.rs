use chrono::Utc;
use clap::{Parser, Subcommand};
use sidebargen::config::{self, SidebarConfig};
use sidebargen::naming::NodeKind;
use sidebargen::{document, edit, generate, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    if env!("SIDEBARGEN_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    let hash = env!("SIDEBARGEN_GIT_HASH");
    if hash.is_empty() {
        "dev@unknown"
    } else {
        // Leaked once at startup
        Box::leak(format!("dev@{hash}").into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "sidebargen")]
#[command(about = "Generate a navigation sidebar from a documentation tree")]
#[command(long_about = "\
Generate a navigation sidebar from a documentation tree

Folders become sections, .md/.html files become pages, and the result is
written as a JSON document for the page templates.

Content structure:

  content/
  ├── about.md                 # → About       /about
  ├── guide/                   # → Guide       /guide/index
  │   ├── index.md             #   (the folder's own page, no separate entry)
  │   └── install.md           #   → Install   /guide/install
  ├── assets/                  # excluded by name
  └── empty/                   # no pages, no index → left out

Every sidebar starts with Home (/) and ends with Change Log (/changelog).

Run 'sidebargen gen-config' to print a documented sidebar.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Config file (stock defaults apply when it does not exist)
    #[arg(long, default_value = config::CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Sidebar document path (overrides `output` from the config file)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Fail instead of replacing an existing sidebar document
    #[arg(long)]
    no_overwrite: bool,

    /// Write only the built-in entries when the content directory is missing
    #[arg(long)]
    allow_missing_source: bool,
}

#[derive(clap::Args)]
struct AddArgs {
    /// Page or folder name (a page without extension gets .md)
    name: String,

    /// Create a folder instead of a page
    #[arg(long)]
    folder: bool,

    /// Parent folder path inside the content directory, e.g. guide/advanced
    #[arg(long, default_value = "")]
    parent: String,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the content directory and write the sidebar document
    Generate(GenerateArgs),
    /// Scan and print the sidebar without writing it
    Check,
    /// Create a page or folder and add it to the existing sidebar
    Add(AddArgs),
    /// Print the sidebar document currently on disk
    Show,
    /// Print a stock sidebar.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let load = || -> Result<SidebarConfig, config::ConfigError> {
        let mut config = config::load_config(&cli.config)?;
        if let Some(output) = &cli.output {
            config.output = output.clone();
        }
        Ok(config)
    };

    match &cli.command {
        Command::GenConfig => print!("{}", config::stock_config_toml()),
        Command::Generate(args) => {
            let mut config = load()?;
            apply_generate_args(&mut config, args);
            let generated = generate::generate_with_report(&cli.source, &config)?;
            output::print_generated(&generated, &cli.source);
            println!("==> Wrote {}", config.output.display());
        }
        Command::Check => {
            let config = load()?;
            let previous = document::load_or_default(&config.output, &config.title);
            let generated = generate::build(&cli.source, &config, Some(&previous), Utc::now())?;
            output::print_generated(&generated, &cli.source);
            println!("==> Content is valid");
        }
        Command::Add(args) => {
            let config = load()?;
            let kind = if args.folder {
                NodeKind::Folder
            } else {
                NodeKind::File
            };
            let doc = edit::add_entry(&cli.source, &args.name, kind, &args.parent, &config)?;
            output::print_document(&doc);
            println!("==> Updated {}", config.output.display());
        }
        Command::Show => {
            let config = load()?;
            match document::read_document(&config.output)? {
                Some(doc) => output::print_document(&doc),
                None => println!("No sidebar at {}", config.output.display()),
            }
        }
    }

    Ok(())
}

fn apply_generate_args(config: &mut SidebarConfig, args: &GenerateArgs) {
    if args.no_overwrite {
        config.overwrite_existing = false;
    }
    if args.allow_missing_source {
        config.allow_missing_source = true;
    }
}

/// Logs go to stderr; `SIDEBARGEN_LOG` takes precedence over `-v`.
fn init_logging(verbosity: u8) {
    let directive = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env("SIDEBARGEN_LOG").unwrap_or_else(|_| EnvFilter::new(directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
