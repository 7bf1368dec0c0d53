//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate collection reads/writes into note/tag use-case APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod note_service;
