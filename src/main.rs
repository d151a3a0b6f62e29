//! CLI entry point for nova-blog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nova_blog::commands::{self, list::ListOptions};
use nova_blog::{Blog, BlogError};

#[derive(Parser)]
#[command(name = "nova-blog")]
#[command(author = "Nova Estudio Creative")]
#[command(version)]
#[command(about = "Browse, filter and preview the posts of a static blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, optionally filtered by category, tag or search text
    #[command(alias = "ls")]
    List {
        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        tag: Option<String>,

        /// Case-insensitive search over title, description, category and tags
        #[arg(short, long)]
        query: Option<String>,

        /// Print the list markup
        #[arg(long)]
        html: bool,
    },

    /// Show a post from the index
    Show {
        slug: String,

        /// Print the post page markup
        #[arg(long)]
        html: bool,
    },

    /// Render a markdown file that is not in the index
    Preview {
        path: PathBuf,

        #[arg(long)]
        html: bool,
    },

    /// List the available categories and tags
    Filters,

    /// Show the current theme, or toggle it
    Theme {
        #[arg(long)]
        toggle: bool,
    },

    /// Serve the site directory locally for previewing (development only)
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "nova_blog=debug,info"
    } else {
        "nova_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Error: failed to read the current directory: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    if let Commands::Version = cli.command {
        println!("nova-blog version {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let blog = match Blog::new(&base_dir) {
        Ok(blog) => blog,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!("Site directory: {:?}", blog.site_dir);

    match run(&blog, &base_dir, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<BlogError>() {
                Some(blog_error) => {
                    tracing::error!("{}", blog_error);
                    eprintln!("{}", blog_error.user_message(&blog.config.strings()));
                }
                None => eprintln!("Error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(blog: &Blog, base_dir: &Path, command: Commands) -> Result<()> {
    match command {
        Commands::List {
            category,
            tag,
            query,
            html,
        } => {
            let options = ListOptions {
                category,
                tag,
                query,
                html,
            };
            commands::list::run(blog, &options).await?;
        }

        Commands::Show { slug, html } => {
            commands::show::run(blog, &slug, html).await?;
        }

        Commands::Preview { path, html } => {
            let path = if path.is_absolute() {
                path
            } else {
                base_dir.join(path)
            };
            commands::preview::run(blog, &path, html)?;
        }

        Commands::Filters => {
            commands::filters::run(blog).await?;
        }

        Commands::Theme { toggle } => {
            commands::theme::run(blog, toggle)?;
        }

        Commands::Serve { port, ip } => {
            tracing::info!("Starting server at http://{}:{}", ip, port);
            nova_blog::server::start(blog, &ip, port).await?;
        }

        Commands::Version => {
            println!("nova-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
