use crate::engine::foundation_safety;
use crate::game::{FreecellGame, Location, CASCADE_COUNT, FREECELL_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Promotion {
    pub from: Location,
    pub foundation: usize,
}

/// Finds the next card to promote automatically, scanning freecells 0..3
/// then cascade tops 0..7. Only one promotion is returned per call; the
/// session re-arms its deferred check after applying it, so a cleanup chain
/// runs one card at a time.
///
/// `relaxed` skips the safety heuristic (relaxed difficulty or auto-solve).
pub fn next_auto_promotion(game: &FreecellGame, relaxed: bool) -> Option<Promotion> {
    for cell in 0..FREECELL_COUNT {
        if !foundation_safety::can_auto_promote_freecell(game, cell, relaxed) {
            continue;
        }
        let Some(card) = game.freecell_card(cell) else {
            continue;
        };
        let Some(foundation) = game.foundation_index_for(card) else {
            continue;
        };
        return Some(Promotion {
            from: Location::freecell(cell),
            foundation,
        });
    }

    for col in 0..CASCADE_COUNT {
        if !foundation_safety::can_auto_promote_cascade(game, col, relaxed) {
            continue;
        }
        let Some(card) = game.cascade_top(col) else {
            continue;
        };
        let Some(foundation) = game.foundation_index_for(card) else {
            continue;
        };
        return Some(Promotion {
            from: Location::cascade(col),
            foundation,
        });
    }

    None
}
