//! Domain model for the planner roster and task catalog.
//!
//! # Responsibility
//! - Define canonical data structures for servers, characters and tasks.
//! - Keep field validation close to the data it protects.
//!
//! # Invariants
//! - Rows are identified by SQLite rowids (`Option<i64>`, `None` before the
//!   first insert).
//! - A character always carries a denormalized `server_timezone`; reset
//!   computation consumes that string and nothing else.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod character;
pub mod server;
pub mod task;
