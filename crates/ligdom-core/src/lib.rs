//! # ligdom Core Library
//!
//! Extracts structural-biology facts from macromolecular coordinate files: parses
//! PDB records into a typed hierarchy of chains, residues, atoms and ligands,
//! attaches protein-domain annotations to each cross-referenced chain, and finds
//! which domains physically contact which ligands.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split throughout:
//!
//! - **[`core`]: The Foundation.** Entity models, the record parser and geometric
//!   primitives. Nothing here performs network or annotation-format I/O.
//!
//! - **[`engine`]: The Logic Core.** Post-parse validation, domain resolution through
//!   a pluggable [`engine::annotation::DomainSource`], and the contact matcher.
//!
//! - **[`workflows`]: The Public API.** Runs parse, validate and resolve for one
//!   file or a batch of files, one independent structure per worker.

pub mod core;
pub mod engine;
pub mod workflows;
