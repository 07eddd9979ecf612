use chess_room::chess_board::{ChessField, Color, PieceType};
use chess_room::controller::SessionController;
use chess_room::store::{load_game, JsonFileStore, MemoryStore, RoomName, SessionStore, StoreConfig};
use chess_room::Game;
use std::io::Cursor;

fn f(s: &str) -> ChessField {
    ChessField::from_algebraic(s).unwrap()
}

fn play<S: SessionStore + ?Sized>(store: &mut S, room: &str, fallback: Game, script: &str) -> (Game, String) {
    let controller = SessionController::open(RoomName::new(room).unwrap(), store, fallback).unwrap();
    let mut output = Vec::new();
    let game = controller.run(Cursor::new(script.as_bytes()), &mut output).unwrap();
    (game, String::from_utf8(output).unwrap())
}

#[test]
fn test_session_prints_board_and_score() {
    let mut store = MemoryStore::new();
    let (game, output) = play(&mut store, "lobby", Game::new(), "start\nmove b2 b3\nstatus\nend\n");

    assert!(output.starts_with("> Chess game started."));
    assert!(output.contains("> black to move"));
    assert!(output.contains("38.0"));
    assert_eq!(game.turn(), Color::Black);
    assert_eq!(load_game(&store, &RoomName::new("lobby").unwrap()).unwrap().map(|g| g.turn()), Some(Color::Black));
}

#[test]
fn test_end_before_start_keeps_position() {
    let mut store = MemoryStore::new();
    let (game, _) = play(&mut store, "idle", Game::new(), "end\nmove e2 e4\n");
    assert_eq!(game.board(), Game::new().board());
    assert_eq!(game.turn(), Color::White);
}

#[test]
fn test_rooms_do_not_share_state() {
    let mut store = MemoryStore::new();
    play(&mut store, "one", Game::new(), "start\nmove e2 e4\nend\n");
    let (other, _) = play(&mut store, "two", Game::new(), "start\nend\n");
    assert_eq!(other.turn(), Color::White);
    assert!(other.board().piece_at(f("e2")).is_some());
}

#[test]
fn test_unpromoted_pawn_is_offered_again_after_resume() {
    let mut store = MemoryStore::new();
    let fallback = Game::from_fen("7k/1P6/8/8/8/8/8/K7 w").unwrap();
    play(&mut store, "promo", fallback, "start\nmove b7 b8\nend\n");

    let (game, output) = play(&mut store, "promo", Game::new(), "start\npromote n\n");
    assert!(output.contains("promote queen|rook|bishop|knight"));
    assert_eq!(game.board().piece_at(f("b8")).map(|p| p.kind), Some(PieceType::Knight));
}

#[test]
fn test_json_store_session_roundtrip() {
    let dir = std::env::temp_dir().join(format!("chess-room-session-{}", std::process::id()));
    let config = StoreConfig { directory: dir.clone() };

    let mut store = JsonFileStore::new(&config).unwrap();
    play(&mut store, "saved", Game::new(), "start\nmove g1 f3\nend\n");
    assert!(dir.join("saved.json").exists());

    let mut reopened = JsonFileStore::new(&config).unwrap();
    let (game, _) = play(&mut reopened, "saved", Game::new(), "start\nmove g8 f6\n");
    assert_eq!(game.board().piece_at(f("f3")).map(|p| p.kind), Some(PieceType::Knight));
    assert_eq!(game.board().piece_at(f("f6")).map(|p| p.kind), Some(PieceType::Knight));
    assert_eq!(game.turn(), Color::White);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_finished_game_is_removed_from_json_store() {
    let dir = std::env::temp_dir().join(format!("chess-room-finish-{}", std::process::id()));
    let mut store = JsonFileStore::new(&StoreConfig { directory: dir.clone() }).unwrap();
    let fallback = Game::from_fen("4k3/8/8/8/8/8/8/4RK2 w").unwrap();

    play(&mut store, "final", fallback.clone(), "start\nmove f1 g1\nmove e8 d8\nend\n");
    assert!(dir.join("final.json").exists());

    let (game, output) = play(&mut store, "final", fallback, "start\nmove e1 e7\nmove d8 d7\nmove e7 d7\n");
    assert!(output.contains("white wins"));
    assert!(game.is_terminal());
    assert!(!dir.join("final.json").exists());

    std::fs::remove_dir_all(&dir).unwrap();
}
