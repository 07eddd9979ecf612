use anyhow::{Context, Result};
use chess_room::chess_board::fen::INITIAL_POSITION;
use chess_room::config::{AppConfig, STORE_DIR_ENV};
use chess_room::controller::SessionController;
use chess_room::store::{JsonFileStore, MemoryStore, RoomName, SessionStore, DEFAULT_ROOM};
use chess_room::ui::{render_board, render_score};
use chess_room::Game;

use clap::arg;
use clap::command;
use clap::ArgMatches;
use clap::Command;

use std::io::{stdin, stdout};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let matches = command!()
        .propagate_version(true)
        .arg(arg!(
            -d --debug "Turn debugging information on"
        ))
        .subcommand(
            Command::new("play")
                .about("Play a game in a room, reading commands from stdin")
                .arg(arg!(-r --room <ROOM> "Room name").default_value(DEFAULT_ROOM))
                .arg(
                    arg!(-s --"store-dir" <DIR> "Directory holding the saved rooms")
                        .env(STORE_DIR_ENV)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(arg!(-e --ephemeral "Keep the game in memory only"))
                .arg(arg!(-f --fen <FEN> "Starting position for a new room")),
        )
        .subcommand(
            Command::new("score")
                .about("Print the score of a position")
                .arg(arg!(-f --fen <FEN> "Board position").default_value(INITIAL_POSITION)),
        )
        .subcommand(
            Command::new("show")
                .about("Print a position")
                .arg(arg!(-f --fen <FEN> "Board position").default_value(INITIAL_POSITION)),
        )
        .get_matches();

    let debug = matches.get_flag("debug");
    init_logging(debug);

    match matches.subcommand() {
        Some(("play", arg_matches)) => {
            let config = play_config(arg_matches)?;
            play(&config)
        }
        Some(("score", arg_matches)) => {
            let game = game_from_args(arg_matches)?;
            println!("{}", render_score(&game));
            Ok(())
        }
        Some(("show", arg_matches)) => {
            let game = game_from_args(arg_matches)?;
            println!("{}", render_board(game.board()));
            Ok(())
        }
        None => {
            let store_dir = std::env::var_os(STORE_DIR_ENV).map(PathBuf::from);
            play(&AppConfig::new(RoomName::default(), store_dir))
        }
        _ => unreachable!("Exhausted list of subcommands"),
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn play_config(arg_matches: &ArgMatches) -> Result<AppConfig> {
    let room = arg_matches
        .get_one::<String>("room")
        .map(String::as_str)
        .unwrap_or(DEFAULT_ROOM);
    let room = RoomName::new(room)?;
    let store_dir = arg_matches.get_one::<PathBuf>("store-dir").cloned();

    let mut config = AppConfig::new(room, store_dir);
    config.ephemeral = arg_matches.get_flag("ephemeral");
    config.fen = arg_matches.get_one::<String>("fen").cloned();
    Ok(config)
}

fn game_from_args(arg_matches: &ArgMatches) -> Result<Game> {
    let fen = arg_matches
        .get_one::<String>("fen")
        .map(String::as_str)
        .unwrap_or(INITIAL_POSITION);
    Game::from_fen(fen).with_context(|| format!("Invalid position '{}'", fen))
}

fn play(config: &AppConfig) -> Result<()> {
    let fallback = config.initial_game().context("Invalid starting position")?;

    let mut store: Box<dyn SessionStore> = if config.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        let store = JsonFileStore::new(&config.store)
            .with_context(|| format!("Failed to open store at {}", config.store.directory.display()))?;
        tracing::debug!("Using session store at {}", store.directory().display());
        Box::new(store)
    };

    tracing::info!(room = %config.room, ephemeral = config.ephemeral, "Opening session");
    let controller = SessionController::open(config.room.clone(), store.as_mut(), fallback)?;
    let game = controller.run(stdin().lock(), stdout().lock())?;
    tracing::info!(room = %config.room, state = ?game.state(), "Session closed");
    Ok(())
}
