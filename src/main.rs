use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use tracing_subscriber::EnvFilter;

mod commands;

/// Xsolla Utils - image cache and theme registry tools for UI builders
#[derive(Parser)]
#[command(name = "xsolla-utils")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load images through the shared cache
    Image {
        /// Image URLs (http, https or file)
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Print the cache key of a resource URL
    Key {
        /// Resource URL
        url: String,
    },

    /// Inspect and select themes
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Show the widget class bound to a widget type
    Widget {
        /// Widget type name (e.g., Button)
        widget_type: String,

        /// Widgets library to use instead of the current one
        #[arg(short, long)]
        library: Option<String>,
    },

    /// List the named type slots
    Types {
        /// Only show one kind
        #[arg(value_enum)]
        kind: Option<TypeKind>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Show every entry of a theme
    Show {
        /// Theme id (defaults to the current theme)
        #[arg(short, long)]
        theme: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a color by name
    Color {
        name: String,

        #[arg(short, long)]
        theme: Option<String>,
    },

    /// Resolve a font by name
    Font {
        name: String,

        #[arg(short, long)]
        theme: Option<String>,
    },

    /// Resolve a brush by name
    Brush {
        name: String,

        #[arg(short, long)]
        theme: Option<String>,
    },

    /// List available themes
    List,

    /// Select the current theme and save it to the configuration
    Use {
        /// Theme id
        id: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., ui_builder.interface_theme)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TypeKind {
    Widget,
    Color,
    Font,
    Brush,
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("XSOLLA_UTILS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Image { urls } => commands::image::run(urls),
        Commands::Key { url } => commands::key::run(&url),
        Commands::Theme { action } => commands::theme::run(&action),
        Commands::Widget {
            widget_type,
            library,
        } => commands::widget::run(&widget_type, library.as_deref()),
        Commands::Types { kind } => commands::types::run(kind),
        Commands::Config { action } => commands::config::run(&action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "xsolla-utils", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
