//! Data layer: table model, loading, merging, filtering, and direction transforms.
//!
//! Architecture:
//! ```text
//!   edge file            node files
//!       │                    │
//!       ▼                    ▼
//!   ┌──────────┐       ┌──────────┐
//!   │  loader   │       │  loader   │  parse TSV → Table
//!   └──────────┘       └──────────┘
//!       │ interactome        │ attribute tables
//!       ▼                    ▼
//!   ┌───────────────────────────┐
//!   │  merge                     │  node universe ⟕ attributes → node table
//!   └───────────────────────────┘
//!                │
//!                ▼
//!   ┌──────────┐          ┌───────────┐
//!   │  filter   │          │ direction  │  edge table encodings for
//!   └──────────┘          └───────────┘  external tools
//! ```

pub mod direction;
pub mod filter;
pub mod loader;
pub mod merge;
pub mod model;

/// Identifier column of the node table; always the first column.
pub const NODE_ID: &str = "NODEID";
pub const INTERACTOR1: &str = "Interactor1";
pub const INTERACTOR2: &str = "Interactor2";
pub const WEIGHT: &str = "Weight";
pub const DIRECTION: &str = "Direction";
