mod render;

use std::process::ExitCode;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use neo_core::{AppConfig, DashboardApi, Filter, NearEarthObject};
use reqwest::{redirect, ClientBuilder};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "neowatch", version, about = "Near-Earth object risk dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch a date window and print stats, the scored grid and the closest approaches
    Feed {
        #[command(flatten)]
        window: Window,
        #[arg(long, default_value = "all")]
        filter: Filter,
        #[arg(long, default_value = "")]
        search: String,
        /// Print normalized objects with their assessment as JSON
        #[arg(long)]
        json: bool,
    },
    /// Bookmark one object from a date window
    Track {
        #[arg(long)]
        user: String,
        #[arg(long)]
        id: String,
        #[command(flatten)]
        window: Window,
    },
    /// Remove a bookmark
    Untrack {
        #[arg(long)]
        user: String,
        #[arg(long)]
        id: String,
    },
    /// List a user's bookmarks
    Tracked {
        #[arg(long)]
        user: String,
    },
}

#[derive(Debug, clap::Args)]
struct Window {
    /// First day (YYYY-MM-DD), defaults to today
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Last day (YYYY-MM-DD), defaults to the start day
    #[arg(long)]
    end: Option<NaiveDate>,
}

impl Window {
    fn resolve(&self) -> (NaiveDate, NaiveDate) {
        let start = self.start.unwrap_or_else(|| Utc::now().date_naive());
        (start, self.end.unwrap_or(start))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let config = AppConfig::load();
    let client = match build_client() {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };
    let api = DashboardApi::from_config(client, &config).await;

    match run(&api, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(api: &DashboardApi, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Feed {
            window,
            filter,
            search,
            json,
        } => {
            let (start, end) = window.resolve();
            let objects = load(api, start, end).await?;
            if json {
                println!("{}", render::json_report(&objects)?);
            } else {
                print!("{}", render::dashboard(&objects, filter, &search));
            }
        }
        Command::Track { user, id, window } => {
            let (start, end) = window.resolve();
            let objects = load(api, start, end).await?;
            let neo = objects
                .iter()
                .find(|neo| neo.id == id)
                .ok_or_else(|| format!("No object with id {id} between {start} and {end}."))?;
            let items = api.track(&user, neo).await?;
            print!("{}", render::tracked_list(&user, &items));
        }
        Command::Untrack { user, id } => {
            let items = api.untrack(&user, &id).await?;
            print!("{}", render::tracked_list(&user, &items));
        }
        Command::Tracked { user } => {
            let items = api.tracked(&user).await?;
            print!("{}", render::tracked_list(&user, &items));
        }
    }
    Ok(())
}

async fn load(
    api: &DashboardApi,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<NearEarthObject>, String> {
    api.load_window(start, end).await.map_err(|e| {
        error!(error = %e, "feed fetch failed");
        "Unable to fetch NEO data. Check the network and that the API key is valid.".to_owned()
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_client() -> reqwest::Result<reqwest::Client> {
    ClientBuilder::new()
        .redirect(redirect::Policy::limited(5))
        .user_agent(concat!("neowatch/", env!("CARGO_PKG_VERSION")))
        .build()
}
