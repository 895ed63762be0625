pub mod chat;
pub mod crew;
pub mod health;
pub mod scenes;
pub mod schedule;
pub mod scripts;
pub mod stats;
