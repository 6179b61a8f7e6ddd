//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and reset computation into use-case level
//!   APIs.
//! - Own the degraded-zone logging policy: the pure time core never logs,
//!   services warn exactly where a fallback to UTC happens.

pub mod reset_service;
pub mod task_service;
