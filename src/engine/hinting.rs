use crate::engine::commands::{execute_command, EngineCommand};
use crate::engine::foundation_safety;
use crate::engine::state::GameSession;
use crate::game::{FreecellGame, CASCADE_COUNT, FREECELL_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintMove {
    FreecellToFoundation { cell: usize },
    CascadeTopToFoundation { src: usize },
    FreecellToCascade { cell: usize, dst: usize },
    CascadeRunToCascade { src: usize, start: usize, dst: usize },
    CascadeTopToFreecell { src: usize, cell: usize },
}

#[derive(Debug, Clone)]
pub struct HintSuggestion {
    pub message: String,
    pub hint_move: HintMove,
}

/// Enumerates candidate moves with a purely local heuristic, best first:
/// safe foundation promotions, then freecell returns, cascade runs, and as a
/// last resort parking a top card in a freecell. No look-ahead.
pub fn enumerate_hint_candidates(game: &FreecellGame) -> Vec<HintSuggestion> {
    let relaxed = game.difficulty().unrestricted_moves();
    let mut candidates = Vec::new();

    for cell in 0..FREECELL_COUNT {
        if !foundation_safety::can_auto_promote_freecell(game, cell, relaxed) {
            continue;
        }
        candidates.push(HintSuggestion {
            message: format!("Hint: Move the cell {} card to a foundation.", cell + 1),
            hint_move: HintMove::FreecellToFoundation { cell },
        });
    }

    for src in 0..CASCADE_COUNT {
        if !foundation_safety::can_auto_promote_cascade(game, src, relaxed) {
            continue;
        }
        candidates.push(HintSuggestion {
            message: format!("Hint: Move C{} top card to a foundation.", src + 1),
            hint_move: HintMove::CascadeTopToFoundation { src },
        });
    }

    for cell in 0..FREECELL_COUNT {
        for dst in 0..CASCADE_COUNT {
            if game.can_move_freecell_to_cascade(cell, dst) {
                candidates.push(HintSuggestion {
                    message: format!("Hint: Move the cell {} card to C{}.", cell + 1, dst + 1),
                    hint_move: HintMove::FreecellToCascade { cell, dst },
                });
            }
        }
    }

    for src in 0..CASCADE_COUNT {
        let len = game.cascade_len(src);
        for start in 0..len {
            for dst in 0..CASCADE_COUNT {
                if !game.can_move_cascade_run_to_cascade(src, start, dst) {
                    continue;
                }
                let amount = len - start;
                candidates.push(HintSuggestion {
                    message: format!(
                        "Hint: Move {amount} card(s) C{} -> C{}.",
                        src + 1,
                        dst + 1
                    ),
                    hint_move: HintMove::CascadeRunToCascade { src, start, dst },
                });
            }
        }
    }

    if let Some(cell) = (0..FREECELL_COUNT).find(|&cell| game.freecell_card(cell).is_none()) {
        for src in 0..CASCADE_COUNT {
            if game.can_move_cascade_top_to_freecell(src, cell) {
                candidates.push(HintSuggestion {
                    message: format!("Hint: Park C{} top card in a free cell.", src + 1),
                    hint_move: HintMove::CascadeTopToFreecell { src, cell },
                });
            }
        }
    }

    candidates
}

pub fn command_for_hint(hint_move: HintMove) -> EngineCommand {
    match hint_move {
        HintMove::FreecellToFoundation { cell } => EngineCommand::MoveFreecellToFoundation { cell },
        HintMove::CascadeTopToFoundation { src } => {
            EngineCommand::MoveCascadeTopToFoundation { src }
        }
        HintMove::FreecellToCascade { cell, dst } => {
            EngineCommand::MoveFreecellToCascade { cell, dst }
        }
        HintMove::CascadeRunToCascade { src, start, dst } => {
            EngineCommand::MoveCascadeRunToCascade { src, start, dst }
        }
        HintMove::CascadeTopToFreecell { src, cell } => {
            EngineCommand::MoveCascadeTopToFreecell { src, cell }
        }
    }
}

pub fn apply_hint_move(session: &mut GameSession, hint_move: HintMove) -> bool {
    execute_command(session, command_for_hint(hint_move)).changed
}
