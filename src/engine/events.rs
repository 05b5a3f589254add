/// Discrete notifications for feedback collaborators (audio, haptics,
/// effects). The engine queues them during transitions and consumes nothing
/// back; collaborators drain the queue after each settled step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    CardDealt,
    SingleMove,
    MultiMove { cards: usize },
    InvalidMove,
    AutoPromotion { streak: u8 },
    Undo,
    Win,
    Hint,
    Stuck,
}
