//! # Core Module
//!
//! This module provides the stateless building blocks of ligdom: the entity
//! model of a parsed structure, the fixed-column record parser, and the
//! geometric primitives used by contact detection.
//!
//! ## Architecture
//!
//! - **Structure Representation** ([`models`]) - Atoms, residues, chains, ligands,
//!   cross-references, domain annotations and the owning `Structure`
//! - **File Input** ([`io`]) - Streaming PDB record parsing with explicit cursors
//! - **Geometry** ([`utils`]) - Distance and the heavy-atom contact predicate

pub mod io;
pub mod models;
pub mod utils;
