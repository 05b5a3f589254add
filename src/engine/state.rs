use log::{debug, info};

use crate::engine::automation::AutomationProfile;
use crate::engine::autoplay;
use crate::engine::events::GameEvent;
use crate::engine::hinting::{self, HintSuggestion};
use crate::engine::scheduler::{DeferredKind, Scheduler};
use crate::game::{Difficulty, FreecellGame, GameStatus, Location, PileKind, DECK_SIZE};

pub const INITIAL_HINTS: u8 = 3;

/// The single active game: board, undo history, counters, status and the
/// deferred-work bookkeeping around them. All mutation funnels through
/// `apply_move`, `undo` and the lifecycle methods; presentation layers read
/// state and drain events but never touch the board directly.
#[derive(Debug)]
pub struct GameSession {
    game: FreecellGame,
    history: Vec<FreecellGame>,
    revision: u64,
    moves: u32,
    elapsed_seconds: u32,
    hints_remaining: u8,
    status: GameStatus,
    dealing: bool,
    dealt_cards: usize,
    auto_solving: bool,
    promotion_streak: u8,
    last_foundation_move_at: Option<u64>,
    stuck_reported: bool,
    events: Vec<GameEvent>,
    scheduler: Scheduler,
    profile: AutomationProfile,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            game: FreecellGame::empty(Difficulty::Medium),
            history: Vec::new(),
            revision: 0,
            moves: 0,
            elapsed_seconds: 0,
            hints_remaining: INITIAL_HINTS,
            status: GameStatus::Selecting,
            dealing: false,
            dealt_cards: 0,
            auto_solving: false,
            promotion_streak: 0,
            last_foundation_move_at: None,
            stuck_reported: false,
            events: Vec::new(),
            scheduler: Scheduler::new(),
            profile: AutomationProfile::standard(),
        }
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn game(&self) -> &FreecellGame {
        &self.game
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn difficulty(&self) -> Difficulty {
        self.game.difficulty()
    }

    /// Monotonic board revision, bumped on every committed transition.
    /// Collaborators holding captured analysis compare it to detect that the
    /// board has moved underneath them.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn hints_remaining(&self) -> u8 {
        self.hints_remaining
    }

    pub fn history(&self) -> &[FreecellGame] {
        &self.history
    }

    pub fn is_dealing(&self) -> bool {
        self.dealing
    }

    pub fn dealt_cards(&self) -> usize {
        self.dealt_cards
    }

    pub fn is_auto_solving(&self) -> bool {
        self.auto_solving
    }

    pub fn profile(&self) -> AutomationProfile {
        self.profile
    }

    pub fn clock_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn pending(&self, kind: DeferredKind) -> bool {
        self.scheduler.is_pending(kind)
    }

    /// Hands the queued feedback events to the caller, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Starts a fresh deal. Any deferred promotion or deal callback armed
    /// against the previous board is cancelled in the same step, so nothing
    /// stale can touch the new one.
    pub fn new_game(&mut self, difficulty: Difficulty, seed: u64) {
        self.scheduler.cancel_all();
        self.game = FreecellGame::new_with_seed(seed, difficulty);
        self.revision += 1;
        self.history.clear();
        self.moves = 0;
        self.elapsed_seconds = 0;
        self.hints_remaining = INITIAL_HINTS;
        self.status = GameStatus::Playing;
        self.dealing = true;
        self.dealt_cards = 0;
        self.auto_solving = false;
        self.promotion_streak = 0;
        self.last_foundation_move_at = None;
        self.stuck_reported = false;
        self.events.clear();
        self.scheduler
            .schedule_in(DeferredKind::DealStep, self.profile.deal_card_interval_ms);
        info!("new {} game, seed {}", difficulty.id(), seed);
    }

    /// Returns to the difficulty chooser, discarding in-flight deferred work.
    pub fn abandon_game(&mut self) {
        self.scheduler.cancel_all();
        self.status = GameStatus::Selecting;
        self.dealing = false;
        self.auto_solving = false;
    }

    /// Applies a validated move as one atomic transition: snapshot the
    /// pre-move board, relocate the trailing `count` cards, bump the move
    /// counter, then observe the result (win, stuck, follow-up promotion).
    /// Legality checks belong to the caller.
    pub fn apply_move(&mut self, from: Location, to: Location, count: usize) {
        if count == 0 {
            return;
        }

        self.history.push(self.game.clone());
        self.game.relocate(from, to, count);
        self.revision += 1;
        self.moves += 1;
        self.stuck_reported = false;
        debug!(
            "move {:?}[{}] -> {:?}[{}] ({} card(s)), move #{}",
            from.kind, from.index, to.kind, to.index, count, self.moves
        );

        if to.kind == PileKind::Foundation {
            self.bump_promotion_streak();
            self.events.push(GameEvent::AutoPromotion {
                streak: self.promotion_streak,
            });
        } else if count > 1 {
            self.events.push(GameEvent::MultiMove { cards: count });
        } else {
            self.events.push(GameEvent::SingleMove);
        }

        self.observe_board();
    }

    /// Restores the most recent snapshot. A no-op with empty history; the
    /// move counter keeps its post-move value either way.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            return false;
        };
        self.game = previous;
        self.revision += 1;
        self.last_foundation_move_at = None;
        self.promotion_streak = 0;
        self.stuck_reported = false;
        self.events.push(GameEvent::Undo);
        debug!("undo, {} snapshot(s) left", self.history.len());
        self.observe_board();
        true
    }

    /// One elapsed-time tick. Gated on active play so the clock neither runs
    /// on the chooser screen nor during the deal-in.
    pub fn tick_second(&mut self) {
        if self.status == GameStatus::Playing && !self.dealing {
            self.elapsed_seconds += 1;
        }
    }

    /// Advances the deferred-work clock and handles whatever came due.
    /// Returns the fired kinds so the embedding can react to the ones it
    /// owns (e.g. clearing the invalid-move indicator).
    pub fn advance(&mut self, delta_ms: u64) -> Vec<DeferredKind> {
        let fired = self.scheduler.advance(delta_ms);
        for kind in &fired {
            match kind {
                DeferredKind::AutoPromotion | DeferredKind::AutoSolveStep => {
                    self.run_auto_promotion_step();
                }
                DeferredKind::DealStep => self.deal_step(),
                DeferredKind::DealSettle => self.finish_deal(),
                DeferredKind::InvalidFlashClear => {}
            }
        }
        fired
    }

    /// Promotes at most one card to a foundation, freecells first, then
    /// cascade tops. Applying the move re-arms the deferred check, so chains
    /// run card by card.
    pub fn run_auto_promotion_step(&mut self) -> bool {
        if self.status != GameStatus::Playing || self.dealing {
            return false;
        }
        let relaxed = self.game.difficulty().unrestricted_moves() || self.auto_solving;
        match autoplay::next_auto_promotion(&self.game, relaxed) {
            Some(promotion) => {
                self.apply_move(promotion.from, Location::foundation(promotion.foundation), 1);
                true
            }
            None => {
                self.auto_solving = false;
                false
            }
        }
    }

    /// Enters auto-solve: promotions skip the safety check and run on the
    /// short interval until no card has a foundation destination.
    pub fn start_auto_solve(&mut self) {
        if self.status != GameStatus::Playing || self.dealing {
            return;
        }
        self.auto_solving = true;
        self.scheduler.cancel(DeferredKind::AutoPromotion);
        self.scheduler
            .schedule_in(DeferredKind::AutoSolveStep, self.profile.auto_solve_step_ms);
    }

    /// Spends one hint on the first local candidate move, if any remain.
    pub fn request_hint(&mut self) -> Option<HintSuggestion> {
        if self.status != GameStatus::Playing || self.dealing || self.hints_remaining == 0 {
            return None;
        }
        let suggestion = hinting::enumerate_hint_candidates(&self.game)
            .into_iter()
            .next()?;
        self.hints_remaining -= 1;
        self.events.push(GameEvent::Hint);
        Some(suggestion)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn schedule_invalid_flash(&mut self) {
        self.scheduler
            .schedule_in(DeferredKind::InvalidFlashClear, self.profile.invalid_flash_ms);
    }

    pub(crate) fn from_restored(
        game: FreecellGame,
        history: Vec<FreecellGame>,
        moves: u32,
        elapsed_seconds: u32,
        hints_remaining: u8,
        status: GameStatus,
    ) -> Self {
        let mut session = Self {
            game,
            history,
            moves,
            elapsed_seconds,
            hints_remaining,
            status,
            dealing: false,
            dealt_cards: DECK_SIZE,
            ..Self::default()
        };
        if session.status == GameStatus::Playing {
            session.schedule_promotion_check();
        }
        session
    }

    fn deal_step(&mut self) {
        self.dealt_cards += 1;
        self.events.push(GameEvent::CardDealt);
        if self.dealt_cards < DECK_SIZE {
            self.scheduler
                .schedule_in(DeferredKind::DealStep, self.profile.deal_card_interval_ms);
        } else {
            self.scheduler
                .schedule_in(DeferredKind::DealSettle, self.profile.deal_settle_ms);
        }
    }

    fn finish_deal(&mut self) {
        self.dealing = false;
        debug!("deal settled after {} cards", self.dealt_cards);
        self.observe_board();
    }

    /// Post-transition observation: terminal check, stuck notification, and
    /// the debounced follow-up promotion. Rescheduling here (rather than
    /// stacking timers) is what gives the promotion its latest-board-only
    /// semantics.
    fn observe_board(&mut self) {
        if self.status == GameStatus::Playing && self.game.is_won() {
            self.status = GameStatus::Won;
            self.history.clear();
            self.auto_solving = false;
            self.scheduler.cancel(DeferredKind::AutoPromotion);
            self.scheduler.cancel(DeferredKind::AutoSolveStep);
            self.events.push(GameEvent::Win);
            info!(
                "won in {} moves, {} seconds",
                self.moves, self.elapsed_seconds
            );
            return;
        }

        if self.status != GameStatus::Playing || self.dealing {
            return;
        }

        if self.game.is_stuck() && !self.stuck_reported {
            self.stuck_reported = true;
            self.events.push(GameEvent::Stuck);
        }

        self.schedule_promotion_check();
    }

    fn schedule_promotion_check(&mut self) {
        let (kind, delay) = if self.auto_solving {
            (DeferredKind::AutoSolveStep, self.profile.auto_solve_step_ms)
        } else {
            (DeferredKind::AutoPromotion, self.profile.promotion_debounce_ms)
        };
        self.scheduler.schedule_in(kind, delay);
    }

    fn bump_promotion_streak(&mut self) {
        let now = self.scheduler.now_ms();
        let within_window = self
            .last_foundation_move_at
            .is_some_and(|last| now.saturating_sub(last) < self.profile.streak_window_ms);
        self.promotion_streak = if within_window {
            (self.promotion_streak + 1).min(self.profile.max_promotion_streak)
        } else {
            0
        };
        self.last_foundation_move_at = Some(now);
    }
}
