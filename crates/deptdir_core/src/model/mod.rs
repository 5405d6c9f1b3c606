//! Domain model for the department directory.
//!
//! # Responsibility
//! - Define the canonical `Department` record used by services and stores.
//! - Own the field rules every persisted department must satisfy.
//!
//! # Invariants
//! - A department is identified by a store-assigned integer id.
//! - Deletion is a hard delete; there are no tombstones.

pub mod department;
