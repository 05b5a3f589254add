pub mod automation;
pub mod autoplay;
pub mod commands;
pub mod events;
pub mod foundation_safety;
pub mod hinting;
pub mod scheduler;
pub mod selection;
pub mod session;
pub mod state;
