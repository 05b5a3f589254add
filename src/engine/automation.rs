/// Timing and tuning knobs for the reactive layer. One profile covers all
/// difficulty tiers; rule differences live in the rules themselves, not in
/// the pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutomationProfile {
    /// Pause between automatic promotions in normal play, so the player can
    /// follow each card visually.
    pub promotion_debounce_ms: u64,
    /// Much shorter pause while an explicit auto-solve is running.
    pub auto_solve_step_ms: u64,
    /// How long the invalid-move indicator stays on the source pile.
    pub invalid_flash_ms: u64,
    /// Interval between cards during the deal-in sequence.
    pub deal_card_interval_ms: u64,
    /// Settle time after the last dealt card before play begins.
    pub deal_settle_ms: u64,
    /// Elapsed-time counter granularity.
    pub timer_tick_ms: u64,
    /// Foundation moves closer together than this extend the streak.
    pub streak_window_ms: u64,
    /// Streak intensity cap carried on promotion events.
    pub max_promotion_streak: u8,
}

pub const FREECELL_AUTOMATION_PROFILE: AutomationProfile = AutomationProfile {
    promotion_debounce_ms: 800,
    auto_solve_step_ms: 100,
    invalid_flash_ms: 400,
    deal_card_interval_ms: 45,
    deal_settle_ms: 500,
    timer_tick_ms: 1_000,
    streak_window_ms: 800,
    max_promotion_streak: 12,
};

impl AutomationProfile {
    pub fn standard() -> Self {
        FREECELL_AUTOMATION_PROFILE
    }
}
