//! Deferred engine work, one slot per kind. Rescheduling a kind replaces its
//! pending entry, so a callback armed against an older board can never fire
//! against a newer one. The clock is advanced manually by the embedding loop,
//! which keeps every transition testable without real timers.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferredKind {
    AutoPromotion,
    AutoSolveStep,
    InvalidFlashClear,
    DealStep,
    DealSettle,
}

impl DeferredKind {
    pub const ALL: [DeferredKind; 5] = [
        DeferredKind::AutoPromotion,
        DeferredKind::AutoSolveStep,
        DeferredKind::InvalidFlashClear,
        DeferredKind::DealStep,
        DeferredKind::DealSettle,
    ];

    fn slot(self) -> usize {
        match self {
            DeferredKind::AutoPromotion => 0,
            DeferredKind::AutoSolveStep => 1,
            DeferredKind::InvalidFlashClear => 2,
            DeferredKind::DealStep => 3,
            DeferredKind::DealSettle => 4,
        }
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    due_at: [Option<u64>; 5],
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Arms `kind` to fire after `delay_ms`. An already-pending entry of the
    /// same kind is replaced.
    pub fn schedule_in(&mut self, kind: DeferredKind, delay_ms: u64) {
        self.due_at[kind.slot()] = Some(self.now_ms.saturating_add(delay_ms));
    }

    pub fn cancel(&mut self, kind: DeferredKind) {
        self.due_at[kind.slot()] = None;
    }

    /// Drops every pending entry in one step, for new-game resets.
    pub fn cancel_all(&mut self) {
        self.due_at = [None; 5];
    }

    pub fn is_pending(&self, kind: DeferredKind) -> bool {
        self.due_at[kind.slot()].is_some()
    }

    /// Moves the clock forward and returns the kinds that came due, ordered
    /// by due time (slot order breaks ties).
    pub fn advance(&mut self, delta_ms: u64) -> Vec<DeferredKind> {
        self.now_ms = self.now_ms.saturating_add(delta_ms);

        let mut fired: Vec<(u64, DeferredKind)> = Vec::new();
        for kind in DeferredKind::ALL {
            if let Some(due) = self.due_at[kind.slot()] {
                if due <= self.now_ms {
                    self.due_at[kind.slot()] = None;
                    fired.push((due, kind));
                }
            }
        }
        fired.sort_by_key(|(due, kind)| (*due, kind.slot()));
        fired.into_iter().map(|(_, kind)| kind).collect()
    }
}
