//! Tic-tac-toe server - unified CLI
//!
//! Runs the HTTP API or works on the game database directly.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::net::SocketAddr;
use std::sync::Arc;
use tictactoe_rules::{GameState, Mark, Player};
use tictactoe_server::{
    Application, ServerConfig, SqliteGameRepository, StoreError, TimestampIdGenerator, server,
};
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = ServerConfig::load(cli.config.as_deref())?
        .with_database_url(cli.database_url.clone());

    initialize_tracing(&config);

    match cli.command {
        Command::Serve { port, host } => run_http_server(config.with_address(host, port)).await,
        Command::New { starting_player } => run_new(&config, starting_player),
        Command::Show { game_id } => run_show(&config, &game_id),
        Command::Mark {
            game_id,
            player,
            cell,
        } => run_mark(&config, &game_id, Mark::new(player, cell)),
    }
}

fn initialize_tracing(config: &ServerConfig) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Opens the configured database and wraps it in the application service.
#[instrument(skip(config), fields(database_url = %config.database_url()))]
fn build_application(config: &ServerConfig) -> Result<Application> {
    let repository = SqliteGameRepository::open(config.database_url().clone())
        .context("Failed to open game database")?;
    Ok(Application::new(
        Arc::new(repository),
        Arc::new(TimestampIdGenerator::new()),
        *config.starting_player(),
    ))
}

/// Run the HTTP game server
#[instrument(skip(config))]
async fn run_http_server(config: ServerConfig) -> Result<()> {
    info!("Starting tic-tac-toe server");

    let addr: SocketAddr = format!("{}:{}", config.host(), config.port())
        .parse()
        .context("Invalid host/port combination")?;

    let app = Arc::new(build_application(&config)?);
    info!(starting_player = %app.starting_player(), "New games use the configured first player");
    let router = server::router(app);

    info!(%addr, "Listening on http://{}/", addr);
    server::serve(router, addr).await?;
    Ok(())
}

/// Create a game and print it
#[instrument(skip(config))]
fn run_new(config: &ServerConfig, starting_player: Option<Player>) -> Result<()> {
    let app = build_application(config)?;
    let game = match starting_player {
        Some(player) => app.new_game_starting_with(player)?,
        None => app.new_game()?,
    };
    println!("{}", serde_json::to_string_pretty(&game)?);
    Ok(())
}

/// Print a stored game
#[instrument(skip(config))]
fn run_show(config: &ServerConfig, game_id: &str) -> Result<()> {
    let app = build_application(config)?;
    let game = app.get_game(game_id)?;
    println!("{}", serde_json::to_string_pretty(&game)?);
    print_board(game.state());
    Ok(())
}

/// Draws the board on stderr, followed by whose turn it is and the free cells.
fn print_board(state: &GameState) {
    eprint!("{}", state.marks().display());
    if let Some(next) = state.next_player() {
        let open: Vec<String> = state
            .marks()
            .empty_cells()
            .iter()
            .map(ToString::to_string)
            .collect();
        eprintln!("{} to move; open cells: {}", next, open.join(", "));
    }
}

/// Place a mark and print the result
#[instrument(skip(config))]
fn run_mark(config: &ServerConfig, game_id: &str, mark: Mark) -> Result<()> {
    let app = build_application(config)?;
    match app.add_mark(game_id, mark) {
        Ok(game) => {
            println!("{}", serde_json::to_string_pretty(&game)?);
            print_board(game.state());
            Ok(())
        }
        Err(StoreError::Rejected(rejection)) => {
            warn!(%rejection, "Mark rejected");
            println!("{}", serde_json::to_string_pretty(&rejection)?);
            Err(StoreError::Rejected(rejection).into())
        }
        Err(e) => Err(e.into()),
    }
}
