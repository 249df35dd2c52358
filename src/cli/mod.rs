use anyhow::Context;
use clap::Parser;
use log::info;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::{App, RenderSink};
use crate::catalog::{CatalogSearchClient, CatalogTransport, HttpTransport};
use crate::config::Config;
use crate::domain::TrackId;
use crate::favorites::FavoritesStore;
use crate::storage::{KeyValueStore, SqliteStore};

pub mod terminal;

use terminal::TerminalSink;

#[derive(Parser)]
#[command(name = "favdeck")]
#[command(version = "0.1")]
#[command(about = "Search songs and keep your favorites")]
pub struct Cli {
    /// Path to the config TOML file, built-in defaults when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

const HELP: &str = "\
Commands:
  search <keyword>   search the catalog
  fav <id>           add a song from the last search to favorites
  unfav <id>         remove a song from favorites
  list               show favorites
  clear              remove all favorites
  help               show this help
  quit               exit";

/// One line typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Favorite(TrackId),
    Unfavorite(TrackId),
    List,
    Clear,
    Help,
    Quit,
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let id = |rest: &str| {
            rest.parse::<TrackId>()
                .map_err(|_| Command::Invalid(format!("'{rest}' is not a song id")))
        };

        match word {
            // the app reports a blank keyword itself
            "search" | "s" => Command::Search(rest.to_string()),
            "fav" | "f" => id(rest).map(Command::Favorite).unwrap_or_else(|e| e),
            "unfav" | "u" => id(rest).map(Command::Unfavorite).unwrap_or_else(|e| e),
            "list" | "l" => Command::List,
            "clear" => Command::Clear,
            "help" | "?" | "" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => Command::Invalid(format!("unknown command '{other}'")),
        }
    }
}

/// Entrypoint for CLI
pub fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let storage = SqliteStore::new(&cfg.storage).context("Failed to open favorites storage")?;
    let transport = HttpTransport::new().context("Failed to create HTTP client")?;

    let app = App::new(
        CatalogSearchClient::new(transport, &cfg.catalog),
        FavoritesStore::new(storage),
        TerminalSink::new(std::io::stdout()),
    );

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(interact(app))
}

async fn interact<T, S, R>(mut app: App<T, S, R>) -> anyhow::Result<()>
where
    T: CatalogTransport,
    S: KeyValueStore,
    R: RenderSink,
{
    println!("{HELP}");
    app.load_favorites();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match Command::parse(&line) {
            Command::Search(keyword) => app.search(&keyword).await,
            Command::Favorite(id) => app.add_favorite(id),
            Command::Unfavorite(id) => app.remove_favorite(id),
            Command::List => app.load_favorites(),
            Command::Clear => app.clear_favorites(),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Invalid(reason) => println!("{reason}\n{HELP}"),
        }
    }

    info!("bye");
    Ok(())
}
