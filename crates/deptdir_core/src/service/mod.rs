//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation and uniqueness checks around repository calls.
//! - Keep callers decoupled from storage details.

pub mod department_service;
