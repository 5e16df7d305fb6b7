// src/learn/mod.rs
//! # Spaced-repetition core
//!
//! Everything that decides *what to ask next* and *what an answer changes*:
//!
//! - `status`  – streak → mastery status, status → draw weight.
//! - `record`  – per-item learning records, the ordered store, reconciliation
//!               against the vocabulary, by-identity merge.
//! - `group`   – fixed-size positional groups and auto-selection of the group
//!               with the most outstanding work.
//! - `session` – the flashcard loop as a state machine over an owned working set.
//! - `report`  – session totals and the per-item dump.
//!
//! No terminal or file I/O happens here; the loop talks to a `Prompter` and the
//! CLI decides when to load and save.
//!
//! ```text
//! vocab + records → reconcile → select_group → Session::run → summarize → merge
//! ```
pub mod group;
pub mod record;
pub mod report;
pub mod session;
pub mod status;

pub use group::{select_group, GroupOverview, WorkingSet};
pub use record::{reconcile, LearningRecord, ReconcileDelta, RecordStore};
pub use report::{summarize, Summary};
pub use session::{run_session, Card, Flow, Judgment, Prompter, Session, SessionOutcome, SessionState};
pub use status::{classify, weight, Status};
