//! Command-line interface for tictactoe_server.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_rules::{Cell, Player};

/// Tic-tac-toe game server
#[derive(Parser, Debug)]
#[command(name = "tictactoe_server")]
#[command(about = "Tic-tac-toe game server with a REST API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./tictactoe.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database path (overrides config and DATABASE_URL)
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Create a new game and print it
    New {
        /// Player who moves first (1 or 2)
        #[arg(long)]
        starting_player: Option<Player>,
    },

    /// Print a stored game
    Show {
        /// Game id
        game_id: String,
    },

    /// Place a mark and print the updated game
    Mark {
        /// Game id
        game_id: String,

        /// Player placing the mark (1 or 2)
        #[arg(long)]
        player: Player,

        /// Cell to mark, e.g. CENTER_CENTER
        #[arg(long)]
        cell: Cell,
    },
}
