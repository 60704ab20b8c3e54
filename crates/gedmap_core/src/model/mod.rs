//! Normalized ancestor graph records.
//!
//! # Responsibility
//! - Define the person/event/place shapes produced by the pipeline.
//! - Keep every "may be absent" field a real `Option`, never a sentinel.
//!
//! # Invariants
//! - A person `id` is assigned once at construction and never changes.
//! - An all-absent `DateTriple` is never stored on an event or person.

pub mod event;
pub mod person;
