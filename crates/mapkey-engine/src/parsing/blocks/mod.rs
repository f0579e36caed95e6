//! # Segmentation
//!
//! Two-phase segmentation of a document into mapkey records.
//!
//! ## Phases
//!
//! 1. **Line Classification** (`classify`): each line becomes a `LineClass`
//!    holding local facts only (declaration/continuation/comment, trailing
//!    escape, marker spans).
//!
//! 2. **Block Construction** (`builder`): a `BlockBuilder` state machine
//!    (`Scanning` / `InContinuation`) decides which lines each record claims
//!    and emits a `Block` when the record closes.
//!
//! ## Modules
//!
//! - **`types`**: `Block`, `BlockLine`, `Segmented`
//! - **`kinds`**: line types owning their delimiters (`Declaration`,
//!   `Continuation`, `Comment`, `Region`, `Escape`, `Terminator`)
//! - **`classify`**: `MapkeyLineClassifier` produces `LineClass` for each line
//! - **`builder`**: `BlockBuilder` state machine
//!
//! ## Key Invariants
//!
//! - Blocks are emitted in document order and never overlap
//! - A record that never terminates still yields a block ending at the last
//!   line it claimed
//! - Block spans exclude the final line break

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{LineClass, LineKind, MapkeyLineClassifier};
pub use types::{Block, BlockLine, BlockLineKind, Segmented};
