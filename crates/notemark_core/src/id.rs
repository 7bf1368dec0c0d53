//! Id generation capability.
//!
//! # Responsibility
//! - Provide the injected "generate a globally unique string" primitive used
//!   for new note ids and offered to callers minting tag ids.
//!
//! # Invariants
//! - A generator never returns the same string twice within one process.

use uuid::Uuid;

/// Source of unique ids for newly created records.
pub trait IdGenerator {
    /// Returns a string unique across all prior calls on this generator.
    fn generate(&mut self) -> String;
}

/// Random v4 UUID ids. The default generator for production callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `prefix-N` ids for tests and scripted imports.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    /// Starts a generator counting from `prefix-1`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
