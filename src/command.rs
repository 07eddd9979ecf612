use crate::chess_board::{ChessField, PieceType};
use crate::error::ChessError;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Move { from: ChessField, to: ChessField },
    Status,
    Promote(PieceType),
    End,
}

impl FromStr for Command {
    type Err = ChessError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&keyword, args)) = tokens.split_first() else {
            return Err(ChessError::Parse(String::from("empty command")));
        };

        match (keyword, args) {
            ("start", []) => Ok(Command::Start),
            ("end", []) => Ok(Command::End),
            ("status", []) => Ok(Command::Status),
            ("move", [from, to]) => Ok(Command::Move {
                from: ChessField::from_algebraic(from)?,
                to: ChessField::from_algebraic(to)?,
            }),
            ("move", _) => Err(ChessError::Parse(String::from("usage: move <source> <target>, e.g. move b2 b3"))),
            ("promote", [kind]) => {
                let kind = kind.parse::<PieceType>()?;
                if kind.is_promotion_target() {
                    Ok(Command::Promote(kind))
                } else {
                    Err(ChessError::InvalidPromotionTarget)
                }
            }
            ("promote", _) => Err(ChessError::Parse(String::from("usage: promote <queen|rook|bishop|knight>"))),
            _ => Err(ChessError::Parse(format!("unknown command: {}", line.trim()))),
        }
    }
}
