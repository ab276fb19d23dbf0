//! Configuration for the stardust background.
//!
//! Settings are read from a TOML file. Every field has a default, so a
//! missing file or a partial file is always valid.

mod config;
mod error;

pub use config::{BackgroundConfig, CellConfig, Config, EffectsConfig, LogConfig, MAX_CELL_PX};
pub use error::ConfigError;
