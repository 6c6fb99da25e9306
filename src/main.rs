use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use pokebrowse::catalog::{CatalogFetcher, PokeApiFetcher};
use pokebrowse::core::config::{self, CliOverrides, ResolvedConfig};
use pokebrowse::core::{BrowseController, FavoritesStore, PAGE_SIZE};
use pokebrowse::shell::Shell;
use pokebrowse::shell::render::{self, Operation};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "pokebrowse", about = "Browse, search and favorite PokeAPI entries")]
struct Args {
    /// Catalog base URL (default https://pokeapi.co/api/v2)
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive browser (default)
    Browse,
    /// Print the first N pages of the catalog
    List {
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },
    /// Look an entry up by name or number
    Search { query: String },
    /// Show details for one or more ids, names or URLs
    Show {
        #[arg(required = true)]
        refs: Vec<String>,
    },
}

fn build_controller(config: &ResolvedConfig) -> io::Result<BrowseController> {
    let fetcher = PokeApiFetcher::new(Some(config.base_url.clone()), config.timeout)
        .map_err(io::Error::other)?;
    log::info!("Using catalog fetcher: {}", fetcher.name());
    Ok(BrowseController::new(Arc::new(fetcher), PAGE_SIZE))
}

#[tokio::main]
async fn main() -> io::Result<ExitCode> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to pokebrowse.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("pokebrowse.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            log::warn!("Falling back to defaults: {e}");
            config::BrowseConfig::default()
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            timeout_secs: args.timeout,
        },
    );
    log::info!(
        "pokebrowse starting: base_url={}, timeout={:?}",
        resolved.base_url,
        resolved.timeout
    );

    let mut controller = build_controller(&resolved)?;
    let mut stdout = io::stdout();

    match args.command.unwrap_or(Command::Browse) {
        Command::Browse => {
            let favorites = FavoritesStore::new();
            let mut shell = Shell::new(controller, favorites, stdout);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            shell.run(stdin).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::List { pages } => {
            for n in 0..pages.max(1) {
                match controller.load_page(n == 0).await {
                    Ok(0) => break,
                    Ok(_) => {}
                    Err(kind) => {
                        eprintln!("{}", render::failure(Operation::Load, kind));
                        return Ok(ExitCode::FAILURE);
                    }
                }
            }
            let text = render::summaries(controller.items(), |_| false);
            writeln!(stdout, "{text}")?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Search { query } => match controller.search(&query).await {
            Ok(found) => {
                writeln!(stdout, "{}", render::detail(&found, false, 72))?;
                Ok(ExitCode::SUCCESS)
            }
            Err(kind) => {
                eprintln!("{}", render::failure(Operation::Search, kind));
                Ok(ExitCode::FAILURE)
            }
        },
        Command::Show { refs } => {
            let fetcher = PokeApiFetcher::new(Some(resolved.base_url.clone()), resolved.timeout)
                .map_err(io::Error::other)?;
            match fetcher.fetch_details(&refs).await {
                Ok(details) => {
                    let cards: Vec<String> = details
                        .iter()
                        .map(|d| render::detail(d, false, 72))
                        .collect();
                    writeln!(stdout, "{}", cards.join("\n\n"))?;
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    log::warn!("Batch detail fetch failed: {e}");
                    eprintln!("{}", render::failure(Operation::Detail, e.kind()));
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
