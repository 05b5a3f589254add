use crate::engine::state::GameSession;
use crate::game::{GameStatus, Location};

/// Validated entry points into the session, one variant per legal move
/// shape. Each command re-checks legality against the current board before
/// committing, so callers holding stale analysis can never corrupt state.
/// Commands are ignored outside active play (chooser, deal-in, win screen).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    MoveCascadeRunToCascade {
        src: usize,
        start: usize,
        dst: usize,
    },
    MoveCascadeTopToFreecell {
        src: usize,
        cell: usize,
    },
    MoveFreecellToCascade {
        cell: usize,
        dst: usize,
    },
    MoveCascadeTopToFoundation {
        src: usize,
    },
    MoveFreecellToFoundation {
        cell: usize,
    },
    MoveFoundationTopToCascade {
        foundation_idx: usize,
        dst: usize,
    },
    Undo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineCommandResult {
    pub changed: bool,
}

impl EngineCommandResult {
    pub const fn unchanged() -> Self {
        Self { changed: false }
    }

    pub const fn changed() -> Self {
        Self { changed: true }
    }
}

fn changed_or_unchanged(changed: bool) -> EngineCommandResult {
    if changed {
        EngineCommandResult::changed()
    } else {
        EngineCommandResult::unchanged()
    }
}

pub fn execute_command(session: &mut GameSession, command: EngineCommand) -> EngineCommandResult {
    if session.status() != GameStatus::Playing || session.is_dealing() {
        return EngineCommandResult::unchanged();
    }
    match command {
        EngineCommand::MoveCascadeRunToCascade { src, start, dst } => {
            if !session.game().can_move_cascade_run_to_cascade(src, start, dst) {
                return EngineCommandResult::unchanged();
            }
            let count = session.game().cascade_len(src) - start;
            session.apply_move(Location::cascade(src), Location::cascade(dst), count);
            EngineCommandResult::changed()
        }
        EngineCommand::MoveCascadeTopToFreecell { src, cell } => {
            if !session.game().can_move_cascade_top_to_freecell(src, cell) {
                return EngineCommandResult::unchanged();
            }
            session.apply_move(Location::cascade(src), Location::freecell(cell), 1);
            EngineCommandResult::changed()
        }
        EngineCommand::MoveFreecellToCascade { cell, dst } => {
            if !session.game().can_move_freecell_to_cascade(cell, dst) {
                return EngineCommandResult::unchanged();
            }
            session.apply_move(Location::freecell(cell), Location::cascade(dst), 1);
            EngineCommandResult::changed()
        }
        EngineCommand::MoveCascadeTopToFoundation { src } => {
            let Some(foundation) = session
                .game()
                .cascade_top(src)
                .and_then(|card| session.game().foundation_index_for(card))
            else {
                return EngineCommandResult::unchanged();
            };
            session.apply_move(Location::cascade(src), Location::foundation(foundation), 1);
            EngineCommandResult::changed()
        }
        EngineCommand::MoveFreecellToFoundation { cell } => {
            let Some(foundation) = session
                .game()
                .freecell_card(cell)
                .and_then(|card| session.game().foundation_index_for(card))
            else {
                return EngineCommandResult::unchanged();
            };
            session.apply_move(Location::freecell(cell), Location::foundation(foundation), 1);
            EngineCommandResult::changed()
        }
        EngineCommand::MoveFoundationTopToCascade {
            foundation_idx,
            dst,
        } => {
            if !session
                .game()
                .can_move_foundation_top_to_cascade(foundation_idx, dst)
            {
                return EngineCommandResult::unchanged();
            }
            session.apply_move(Location::foundation(foundation_idx), Location::cascade(dst), 1);
            EngineCommandResult::changed()
        }
        EngineCommand::Undo => changed_or_unchanged(session.undo()),
    }
}
