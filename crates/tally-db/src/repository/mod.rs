//! # Repository Module
//!
//! Repository implementations for the draft store.
//!
//! ## Repository Pattern
//! Each repository owns the SQL for one table and exposes typed methods.
//! Callers never see SQL; they see domain operations.

pub mod draft;

pub use draft::{CheckoutDraft, DraftRepository};
