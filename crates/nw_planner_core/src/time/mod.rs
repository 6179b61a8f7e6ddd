//! Time-zone aware reset computation core.
//!
//! # Responsibility
//! - Convert between UTC instants and wall-clock time in arbitrary IANA zones.
//! - Derive canonical reset-period tokens and next-reset instants for the
//!   fixed game schedule (daily 05:00 local, weekly Tuesday 05:00 local).
//!
//! # Invariants
//! - Everything in this module is pure: no I/O, no shared state, no clocks
//!   other than explicitly passed reference instants (`*_now` wrappers are
//!   the only exception and delegate immediately).
//! - No operation here panics or returns an error for in-range inputs;
//!   degraded behavior (unknown zone, DST gap) is resolved deterministically.
//!
//! # See also
//! - docs/architecture/reset-schedule.md

pub mod reset;
pub mod zoned;
