//! Matching module containing normalization, signals, and the engine

pub mod config;
pub mod engine;
pub mod normalize;
pub mod signals;

pub use config::*;
pub use engine::*;
pub use normalize::*;
pub use signals::*;
