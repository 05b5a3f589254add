//! FreeCell rules and game-state engine: move legality, supermove capacity,
//! safe auto-promotion, undo history. UI-agnostic; embedders drive the
//! deferred-work clock and drain feedback events.

pub mod engine;
pub mod game;
