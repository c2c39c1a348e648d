use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;

use furryfriends::cli::{render_favourites, run_session, Cli, Command};
use furryfriends::fetcher::{ImageSource, RemoteImageFetcher};
use furryfriends::logging::init_tracing;
use furryfriends::{App, Config, FavouritesStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity());

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = Some(dir);
    }

    match cli.command {
        Command::Fetch => {
            let fetcher = RemoteImageFetcher::new(&config.api)?;
            let image = fetcher
                .fetch()
                .await
                .with_context(|| format!("Could not fetch from {}", fetcher.endpoint()))?;
            println!("status: {}", image.status);
            println!("message: {}", image.message);
        }
        Command::Favourites => {
            let store = FavouritesStore::open(config.storage.favourites_path());
            if store.entries().is_empty() {
                println!("no favourites saved in {}", store.path().display());
            } else {
                println!("{}", render_favourites(store.entries()));
            }
        }
        Command::Session => {
            let mut app = App::from_config(&config)?;
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            run_session(&mut app, stdin, &mut stdout).await?;
        }
    }

    Ok(())
}
