use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use reduxlite::app::actions::{
    add_random_number, change_channel, change_os, delete_random_number, randomize_number,
    request_new_numbers_from_api,
};
use reduxlite::app::source::source_from_config;
use reduxlite::app::{query_view, AppState, AppStore, Channel, Os, CATALOG};
use reduxlite::config::{ApiConfig, Config, Defaults};
use reduxlite::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "reduxlite",
    version,
    about = "Single-store state container driving a small options and numbers demo"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging for this crate (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Override the initial channel (release, beta, nightly).
    #[arg(long, global = true)]
    channel: Option<Channel>,

    /// Override the initial operating system (windows, mac, linux).
    #[arg(long, global = true)]
    os: Option<Os>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scripted session against the store, printing state as it goes.
    Demo,

    /// Request a fresh batch of numbers and print the final state.
    Fetch {
        /// Fetch from this http(s) endpoint instead of the configured source.
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,

        /// Delay of the simulated source in milliseconds.
        #[arg(long, value_name = "MS")]
        delay_ms: Option<u64>,
    },

    /// Print the server query string for the selected options.
    Query,

    /// List products, channels and operating systems as JSON.
    Catalog,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let defaults = Defaults {
        channel: cli.channel.unwrap_or(config.defaults.channel),
        os: cli.os.unwrap_or(config.defaults.os),
    };
    let store = AppStore::new(AppState::from_defaults(&defaults));

    match cli.command {
        Command::Demo => run_demo(&store, &config.api).await,
        Command::Fetch { endpoint, delay_ms } => {
            let mut api = config.api.clone();
            if endpoint.is_some() {
                api.endpoint = endpoint;
            }
            if let Some(delay_ms) = delay_ms {
                api.delay_ms = delay_ms;
            }
            run_fetch(&store, &api).await
        }
        Command::Query => {
            println!("{}", query_view(&store).get());
            Ok(())
        }
        Command::Catalog => {
            println!("{}", serde_json::to_string_pretty(&CATALOG)?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

fn print_state(label: &str, state: &AppState) -> anyhow::Result<()> {
    println!("# {}", label);
    println!("{}", serde_json::to_string_pretty(state)?);
    Ok(())
}

async fn run_demo(store: &AppStore, api: &ApiConfig) -> anyhow::Result<()> {
    // Mirrors the option selection the way a page would mirror it into its URL.
    let query = query_view(store);
    let _mirror = query.subscribe(|query| tracing::info!(url = %format!("?{}", query), "Query changed"));

    let dispatcher = store.dispatcher();
    let add = dispatcher.connect(|()| add_random_number());
    let delete = dispatcher.connect(delete_random_number);

    for _ in 0..3 {
        add(())?;
    }
    dispatcher.dispatch(randomize_number(1))?;
    delete(0)?;
    print_state("after local edits", &dispatcher.get_state())?;

    dispatcher.dispatch(change_channel(Channel::Nightly))?;
    dispatcher.dispatch(change_os(Os::Linux))?;

    let source = source_from_config(api)?;
    let routine = dispatcher
        .dispatch(request_new_numbers_from_api(source))?
        .into_routine()
        .context("request did not start a routine")?;
    print_state("request in flight", &dispatcher.get_state())?;

    routine.join().await?;
    print_state("request finished", &dispatcher.get_state())
}

async fn run_fetch(store: &AppStore, api: &ApiConfig) -> anyhow::Result<()> {
    let source = source_from_config(api)?;
    tracing::info!(source = source.name(), "Requesting numbers");

    let routine = store
        .dispatch(request_new_numbers_from_api(source))?
        .into_routine()
        .context("request did not start a routine")?;
    let outcome = routine.join().await;

    print_state("state", &store.snapshot())?;
    outcome
}
