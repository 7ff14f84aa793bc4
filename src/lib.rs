//! reelpress library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod content;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Which screen opens first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartView {
    #[default]
    Browse,
    NewPost,
}
