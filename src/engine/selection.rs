use crate::engine::events::GameEvent;
use crate::engine::state::GameSession;
use crate::game::{
    can_place_on_cascade, can_place_on_foundation, is_ordered_run, Card, GameStatus, Location,
    PileKind,
};

/// The picked-up cards: a source location and the ordered tail lifted from
/// it, pending a destination choice. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub source: Location,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// Pick did nothing (empty pile, wrong status, mid-deal, flash pending).
    Ignored,
    /// A source was captured; waiting for a destination.
    Selected,
    /// Second pick on the original source; selection dropped quietly.
    Deselected,
    /// Legal destination; the move was applied.
    Committed,
    /// Illegal destination; source flagged invalid until the flash clears.
    Rejected,
}

/// Two-state pick machine: Idle until a source is captured, Pending until
/// the second pick commits, rejects, or deselects.
#[derive(Debug, Default)]
pub struct SelectionController {
    selection: Option<Selection>,
    /// Board revision the selection was captured against.
    selection_revision: u64,
    invalid_at: Option<Location>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn invalid_location(&self) -> Option<Location> {
        self.invalid_at
    }

    /// Drops selection and flash state, for new-game resets.
    pub fn reset(&mut self) {
        self.selection = None;
        self.invalid_at = None;
    }

    /// Called when the deferred invalid-flash callback fires.
    pub fn clear_invalid(&mut self) {
        self.invalid_at = None;
    }

    /// Handles one pick. `card_index` addresses a card inside a cascade
    /// (picking it and everything above it); `None` means the pile's top.
    pub fn pick(
        &mut self,
        session: &mut GameSession,
        location: Location,
        card_index: Option<usize>,
    ) -> PickOutcome {
        if session.status() != GameStatus::Playing
            || session.is_dealing()
            || self.invalid_at.is_some()
        {
            return PickOutcome::Ignored;
        }

        match self.selection.take() {
            None => self.capture(session, location, card_index),
            Some(selection) => {
                // The board moved under the pending selection (deferred
                // promotion, undo, a command); drop it and treat this pick
                // as a fresh capture.
                if session.revision() != self.selection_revision {
                    return self.capture(session, location, card_index);
                }
                self.resolve(session, selection, location)
            }
        }
    }

    /// Double-click shortcut: try the exposed cascade or freecell card
    /// against every foundation and commit to the first that accepts it.
    /// Foundation piles are not quick-move sources.
    pub fn quick_move(&mut self, session: &mut GameSession, location: Location) -> bool {
        if session.status() != GameStatus::Playing
            || session.is_dealing()
            || location.kind == PileKind::Foundation
        {
            return false;
        }
        let Some(card) = session.game().exposed_card(location) else {
            return false;
        };
        match session.game().foundation_index_for(card) {
            Some(foundation) => {
                self.selection = None;
                session.apply_move(location, Location::foundation(foundation), 1);
                true
            }
            None => {
                session.emit(GameEvent::InvalidMove);
                false
            }
        }
    }

    fn capture(
        &mut self,
        session: &GameSession,
        location: Location,
        card_index: Option<usize>,
    ) -> PickOutcome {
        let game = session.game();
        let cards = match location.kind {
            PileKind::Cascade => {
                let Some(pile) = game.cascades().get(location.index) else {
                    return PickOutcome::Ignored;
                };
                if pile.is_empty() {
                    return PickOutcome::Ignored;
                }
                let idx = card_index.unwrap_or(pile.len() - 1);
                if idx >= pile.len() {
                    return PickOutcome::Ignored;
                }
                let tail = &pile[idx..];
                if is_ordered_run(tail) {
                    tail.to_vec()
                } else {
                    // Broken tail: fall back to the single accessible card.
                    vec![pile[pile.len() - 1]]
                }
            }
            PileKind::Freecell | PileKind::Foundation => match game.exposed_card(location) {
                Some(card) => vec![card],
                None => return PickOutcome::Ignored,
            },
        };

        self.selection_revision = session.revision();
        self.selection = Some(Selection {
            source: location,
            cards,
        });
        PickOutcome::Selected
    }

    fn resolve(
        &mut self,
        session: &mut GameSession,
        selection: Selection,
        target: Location,
    ) -> PickOutcome {
        if self.is_legal_destination(session, &selection, target) {
            let count = selection.cards.len();
            session.apply_move(selection.source, target, count);
            return PickOutcome::Committed;
        }

        if target == selection.source {
            return PickOutcome::Deselected;
        }

        self.invalid_at = Some(selection.source);
        session.emit(GameEvent::InvalidMove);
        session.schedule_invalid_flash();
        PickOutcome::Rejected
    }

    fn is_legal_destination(
        &self,
        session: &GameSession,
        selection: &Selection,
        target: Location,
    ) -> bool {
        let game = session.game();
        let Some(first) = selection.cards.first().copied() else {
            return false;
        };
        match target.kind {
            PileKind::Cascade => {
                target.index < game.cascades().len()
                    && can_place_on_cascade(first, game.cascade_top(target.index))
                    && selection.cards.len() <= game.max_movable_cards(target.index)
            }
            PileKind::Freecell => {
                selection.cards.len() == 1
                    && target.index < game.freecells().len()
                    && game.freecell_card(target.index).is_none()
            }
            PileKind::Foundation => {
                selection.cards.len() == 1
                    && game
                        .foundations()
                        .get(target.index)
                        .is_some_and(|pile| can_place_on_foundation(first, pile))
            }
        }
    }
}
