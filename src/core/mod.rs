//! # Core Application Logic
//!
//! This module contains reelpress's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`pagination`]: Append-only lists fed one page at a time
//! - [`navigator`]: Page jumps on a horizontal viewport
//! - [`detail`]: One record fetched per identifier
//! - [`editor`]: Post form state and upload rules
//! - [`embed`]: Video and file-link fragments for post bodies
//! - [`session`]: The signed-in user
//! - [`config`]: Settings and their override chain

pub mod action;
pub mod config;
pub mod detail;
pub mod editor;
pub mod embed;
pub mod navigator;
pub mod pagination;
pub mod session;
pub mod state;
