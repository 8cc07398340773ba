//! CLI entry point for inkpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkpress::commands::new::NewPost;

#[derive(Parser)]
#[command(name = "inkpress")]
#[command(version)]
#[command(about = "A markdown-sourced blog backend with a JSON API", long_about = None)]
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
    /// Initialize a new blog
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Slug (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,

        /// Category, may be repeated
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Author name
        #[arg(short, long)]
        author: Option<String>,
    },

    /// Start the API server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (overrides config)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// List blog content
    List {
        /// Type of content to list (post, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Validate every post and report malformed files
    Check,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "inkpress=debug,tower_http=debug,info"
    } else {
        "inkpress=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing blog in {:?}", target_dir);
            inkpress::commands::init::init_site(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::New {
            title,
            slug,
            categories,
            author,
        } => {
            let blog = inkpress::Blog::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            inkpress::commands::new::create_post(
                &blog,
                &title,
                NewPost {
                    slug,
                    categories,
                    author,
                },
            )?;
        }

        Commands::Serve { port, ip } => {
            let blog = inkpress::Blog::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| blog.config.server.ip.clone());
            let port = port.unwrap_or(blog.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            inkpress::server::start(&blog, &ip, port).await?;
        }

        Commands::List { r#type } => {
            let blog = inkpress::Blog::new(&base_dir)?;
            inkpress::commands::list::run(&blog, &r#type)?;
        }

        Commands::Check => {
            let blog = inkpress::Blog::new(&base_dir)?;
            inkpress::commands::check::run(&blog)?;
        }

        Commands::Version => {
            println!("inkpress version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
