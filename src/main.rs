//! bookstore CLI: offline access to the RDF book catalog.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use oxigraph::model::Triple;

use rdf_bookstore::catalog::{BookInput, Catalog, parse_rdf_xml_triples};
use rdf_bookstore::config::ServerConfig;
use rdf_bookstore::error::{BookstoreError, BookstoreResult};
use rdf_bookstore::notify::{notifier_from_config, notify_best_effort};
use rdf_bookstore::visualize::to_vis_graph;

#[derive(Parser)]
#[command(name = "bookstore", version, about = "RDF book catalog")]
struct Cli {
    /// RDF/XML catalog file (defaults to the configured `store_path`).
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// TOML config file (`store_path` and notification settings).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty catalog file if none exists.
    Init,

    /// Create or update a book.
    Add {
        /// Book ID (whitespace is removed).
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        /// Theme to add; existing themes are kept.
        #[arg(long)]
        theme: Option<String>,
        #[arg(long)]
        level: Option<String>,
        /// Skip the chatbot notification for this write.
        #[arg(long)]
        no_notify: bool,
    },

    /// List all books as JSON.
    List,

    /// Show one book as JSON.
    Show {
        /// Book ID.
        id: String,
    },

    /// Print the visualization graph of an RDF/XML file as JSON.
    Visualize {
        /// RDF/XML document to convert.
        file: PathBuf,
    },
}

fn main() -> miette::Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())?;
    Ok(())
}

fn run(cli: Cli) -> BookstoreResult<()> {
    let mut config = ServerConfig::resolve(cli.config.as_deref())?;
    if let Some(path) = cli.store {
        config.store_path = path;
    }
    let store_path = config.store_path.clone();
    let catalog = Catalog::new(&store_path);

    match cli.command {
        Commands::Init => {
            if catalog.init()? {
                println!("Initialized empty catalog at {}", store_path.display());
            } else {
                println!("Catalog already exists at {}", store_path.display());
            }
        }

        Commands::Add {
            id,
            title,
            author,
            theme,
            level,
            no_notify,
        } => {
            let input = BookInput {
                id: Some(id),
                title,
                author,
                theme,
                level,
            };
            let id = catalog.add_book(&input)?;
            println!("Book '{id}' saved successfully!");
            if !no_notify {
                notify_best_effort(notifier_from_config(&config).as_ref(), &id);
            }
        }

        Commands::List => {
            let books = catalog.list_books()?;
            println!("{}", serde_json::to_string_pretty(&books)?);
        }

        Commands::Show { id } => {
            let detail = catalog.get_book(&id)?;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }

        Commands::Visualize { file } => {
            let reader = std::fs::File::open(&file).map_err(|source| BookstoreError::Io {
                path: file.display().to_string(),
                source,
            })?;
            let triples =
                parse_rdf_xml_triples(std::io::BufReader::new(reader), &file.display().to_string())?;
            let vis = to_vis_graph(triples.iter().map(Triple::as_ref));
            println!("{}", serde_json::to_string_pretty(&vis)?);
        }
    }

    Ok(())
}
