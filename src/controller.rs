use crate::chess_board::{ChessField, Color};
use crate::command::Command;
use crate::error::ChessError;
use crate::game::Game;
use crate::store::{load_game, save_game, RoomName, SessionStore};
use crate::ui::{render_board, render_score, render_turn, PROMOTION_PROMPT, START_MESSAGE};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Waiting,
    Playing,
    Promotion(ChessField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Drives one room: reads commands line by line, applies them to the game and
/// keeps the store in sync. Invalid input is reported and the loop asks again.
pub struct SessionController<'s, S: SessionStore + ?Sized> {
    room: RoomName,
    store: &'s mut S,
    game: Game,
    phase: Phase,
}

impl<'s, S: SessionStore + ?Sized> SessionController<'s, S> {
    /// Resumes the stored game of `room`, or starts from `fallback` when there is none.
    pub fn open(room: RoomName, store: &'s mut S, fallback: Game) -> Result<Self> {
        let stored = load_game(&*store, &room).with_context(|| format!("Failed to load room '{}'", room))?;
        let game = match stored {
            Some(game) => {
                tracing::info!(room = %room, turn = %game.turn(), "Resuming stored game");
                game
            }
            None => {
                tracing::info!(room = %room, "No stored game, starting a new one");
                fallback
            }
        };
        Ok(Self {
            room,
            store,
            game,
            phase: Phase::Waiting,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Runs until `end`, end of input or a captured king, then persists and returns the game.
    pub fn run<R: BufRead, W: Write>(mut self, input: R, mut output: W) -> Result<Game> {
        writeln!(output, "{}", START_MESSAGE)?;

        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if self.handle_line(line, &mut output)? == Flow::Stop {
                break;
            }
        }

        self.finish(&mut output)?;
        Ok(self.game)
    }

    fn handle_line<W: Write>(&mut self, line: &str, output: &mut W) -> Result<Flow> {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!(room = %self.room, input = line, "Rejected input: {}", e);
                writeln!(output, "> error: {}", e)?;
                return Ok(Flow::Continue);
            }
        };

        match (self.phase, command) {
            (_, Command::End) => Ok(Flow::Stop),
            (Phase::Waiting, Command::Start) => {
                self.phase = match self.pending_promotion() {
                    Some(field) => Phase::Promotion(field),
                    None => Phase::Playing,
                };
                self.show_position(output)?;
                if let Phase::Promotion(_) = self.phase {
                    writeln!(output, "{}", PROMOTION_PROMPT)?;
                }
                Ok(Flow::Continue)
            }
            (Phase::Waiting, _) => {
                writeln!(output, "> error: the game has not started yet, enter start")?;
                Ok(Flow::Continue)
            }
            (_, Command::Start) => {
                writeln!(output, "> error: the game is already running")?;
                Ok(Flow::Continue)
            }
            (_, Command::Status) => {
                writeln!(output, "{}", render_score(&self.game))?;
                Ok(Flow::Continue)
            }
            (Phase::Playing, Command::Move { from, to }) => self.play(from, to, output),
            (Phase::Playing, Command::Promote(_)) => {
                writeln!(output, "> error: {}", ChessError::InvalidPromotionTarget)?;
                Ok(Flow::Continue)
            }
            (Phase::Promotion(field), Command::Promote(kind)) => {
                match self.game.promote(field, kind) {
                    Ok(()) => {
                        tracing::debug!(room = %self.room, square = %field, "Promoted pawn to {:?}", kind);
                        self.persist()?;
                        self.phase = Phase::Playing;
                        self.show_position(output)?;
                    }
                    Err(e) => writeln!(output, "> error: {}", e)?,
                }
                Ok(Flow::Continue)
            }
            (Phase::Promotion(_), Command::Move { .. }) => {
                writeln!(output, "{}", PROMOTION_PROMPT)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn play<W: Write>(&mut self, from: ChessField, to: ChessField, output: &mut W) -> Result<Flow> {
        let mover = self.game.turn();
        match self.game.make_move(from, to) {
            Ok(captured) => {
                tracing::debug!(room = %self.room, %mover, %from, %to, ?captured, "Move accepted");
            }
            Err(e) => {
                tracing::debug!(room = %self.room, %mover, %from, %to, "Move rejected: {}", e);
                writeln!(output, "> error: {}", e)?;
                return Ok(Flow::Continue);
            }
        }

        if self.game.is_terminal() {
            writeln!(output, "> The king has fallen. {} wins.", mover)?;
            return Ok(Flow::Stop);
        }

        self.persist()?;
        if self.game.can_promote(to) {
            self.phase = Phase::Promotion(to);
            writeln!(output, "{}", render_board(self.game.board()))?;
            writeln!(output, "{}", PROMOTION_PROMPT)?;
        } else {
            self.show_position(output)?;
        }
        Ok(Flow::Continue)
    }

    /// A pawn left unpromoted on its last rank by an earlier session.
    fn pending_promotion(&self) -> Option<ChessField> {
        [Color::White, Color::Black]
            .into_iter()
            .flat_map(|color| self.game.board().pieces_of(color))
            .map(|(field, _)| field)
            .find(|field| self.game.can_promote(*field))
    }

    fn show_position<W: Write>(&self, output: &mut W) -> Result<()> {
        writeln!(output, "{}", render_board(self.game.board()))?;
        writeln!(output, "{}", render_turn(&self.game))?;
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        save_game(&mut *self.store, &self.room, &self.game).with_context(|| format!("Failed to save room '{}'", self.room))
    }

    fn finish<W: Write>(&mut self, output: &mut W) -> Result<()> {
        writeln!(output, "{}", render_board(self.game.board()))?;
        writeln!(output, "{}", render_score(&self.game))?;

        if self.game.is_terminal() {
            self.store
                .delete_session(&self.room)
                .with_context(|| format!("Failed to delete room '{}'", self.room))?;
            tracing::info!(room = %self.room, "Game finished, session deleted");
        } else {
            self.persist()?;
            tracing::info!(room = %self.room, turn = %self.game.turn(), "Session saved");
        }
        output.flush()?;
        Ok(())
    }
}
