//! # Workflows Module
//!
//! High-level entry points that run the whole per-structure pipeline.
//!
//! ## Overview
//!
//! [`scan`] takes structure files from disk through parsing, terminator
//! validation and domain resolution. Each file becomes one independent
//! [`Structure`](crate::core::models::structure::Structure), so a batch can be
//! spread across threads and a failure in one file never affects another.
//! Contact matching is left to the caller, which borrows from the returned
//! structures through [`ContactMatcher`](crate::engine::contacts::ContactMatcher).

pub mod scan;
