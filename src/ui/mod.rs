//! Console views. Everything here only reads from the game.

use crate::chess_board::{ChessBoard, ChessField, Color};
use crate::game::{Game, Verdict};
use tabled::settings::Style;
use tabled::{Table, Tabled};

pub const START_MESSAGE: &str = "> Chess game started.\n\
> start game: start\n\
> end game: end\n\
> show score: status\n\
> move piece: move source target - e.g. move b2 b3";

pub const PROMOTION_PROMPT: &str = "> Pawn reached the last rank. Choose: promote queen|rook|bishop|knight";

/// Box-drawn grid with rank 8 on top, white pieces in upper case.
pub fn render_board(board: &ChessBoard) -> String {
    let mut board_representation = String::new();
    board_representation.push_str("    a   b   c   d   e   f   g   h  \n");
    board_representation.push_str("  ┌───┬───┬───┬───┬───┬───┬───┬───┐\n");

    for rank in (0..8u8).rev() {
        board_representation.push_str(&format!("{} │", rank + 1));
        for file in 0..8u8 {
            let square = board
                .piece_at(ChessField { rank, file })
                .map(|piece| piece.to_char())
                .unwrap_or(' ');
            board_representation.push_str(&format!(" {} │", square));
        }
        board_representation.push_str(&format!(" {}\n", rank + 1));

        if rank > 0 {
            board_representation.push_str("  ├───┼───┼───┼───┼───┼───┼───┼───┤\n");
        }
    }

    board_representation.push_str("  └───┴───┴───┴───┴───┴───┴───┴───┘\n");
    board_representation.push_str("    a   b   c   d   e   f   g   h  \n");

    board_representation
}

#[derive(Tabled)]
struct ScoreRow {
    color: String,
    score: String,
    result: String,
}

fn verdict_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Win => "win",
        Verdict::Lose => "lose",
        Verdict::Draw => "draw",
    }
}

pub fn render_score(game: &Game) -> String {
    let score = game.score();
    let outcome = game.outcome();
    let rows = [Color::White, Color::Black].map(|color| ScoreRow {
        color: color.to_string(),
        score: format!("{:.1}", score.get(color)),
        result: verdict_label(outcome.verdict(color)).to_string(),
    });
    Table::new(rows).with(Style::modern()).to_string()
}

pub fn render_turn(game: &Game) -> String {
    format!("> {} to move", game.turn())
}
