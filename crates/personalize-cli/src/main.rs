mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{catalog::CatalogSubcommand, config::ConfigSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "personalize",
    about = "Multi-item personalization configurator: detect item counts, preview, validate and run the wizard",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .personalize/)
    #[arg(long, global = true, env = "PERSONALIZE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default .personalize/config.yaml
    Init,

    /// Detect how many items a listing title describes
    Detect {
        /// Listing title (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        /// Explicit item count; wins over the title
        #[arg(long)]
        items: Option<usize>,
    },

    /// List the selectable fonts and colors
    Catalog {
        #[command(subcommand)]
        subcommand: CatalogSubcommand,
    },

    /// Render the live preview for one configuration
    Preview {
        #[arg(long, default_value = "")]
        font: String,
        #[arg(long, default_value = "")]
        color: String,
        #[arg(long, default_value = "")]
        text: String,
    },

    /// Check one configuration and report the first problem
    Validate {
        #[arg(long, default_value = "")]
        font: String,
        #[arg(long, default_value = "")]
        color: String,
        #[arg(long, default_value = "")]
        text: String,
    },

    /// Run the configuration wizard against an in-memory purchase form
    Session {
        /// Listing title used for item-count detection
        #[arg(long)]
        title: String,

        /// Explicit item count; wins over the title
        #[arg(long)]
        items: Option<usize>,

        /// YAML list of actions to apply (default: read line commands from stdin)
        #[arg(long)]
        script: Option<PathBuf>,

        /// Exit non-zero when the final submission is blocked
        #[arg(long)]
        require_complete: bool,
    },

    /// Show or validate the configurator config
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Session { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Detect { title, items } => cmd::detect::run(&title.join(" "), items, cli.json),
        Commands::Catalog { subcommand } => cmd::catalog::run(&root, subcommand, cli.json),
        Commands::Preview { font, color, text } => {
            cmd::preview::run(&root, &font, &color, &text, cli.json)
        }
        Commands::Validate { font, color, text } => {
            cmd::validate::run(&root, &font, &color, &text, cli.json)
        }
        Commands::Session {
            title,
            items,
            script,
            require_complete,
        } => cmd::session::run(
            &root,
            cmd::session::SessionArgs {
                title,
                items,
                script,
                require_complete,
            },
            cli.json,
        ),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
