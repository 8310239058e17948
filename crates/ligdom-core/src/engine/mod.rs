//! # Engine Module
//!
//! This module holds the logic that runs over a parsed [`Structure`](crate::core::models::structure::Structure):
//! closing-record validation, domain resolution and ligand contact matching.
//!
//! ## Overview
//!
//! A structure moves through the engine in a fixed order. [`validation`] drops
//! chains that were never closed, [`annotation`] attaches domain intervals
//! obtained from a [`DomainSource`](annotation::DomainSource), and [`contacts`]
//! computes which ligands touch which residues and domains. Each stage that
//! fails marks the structure invalid instead of returning an error, so a batch
//! never stops because of one bad file.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Recognized ligand names and the contact cutoff
//! - **Validation** ([`validation`]) - Terminator checks after parsing
//! - **Annotation** ([`annotation`]) - The domain-source seam and all-or-nothing resolution
//! - **Contacts** ([`contacts`]) - Ligand environment and binding-domain reductions
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine misuse errors

pub mod annotation;
pub mod config;
pub mod contacts;
pub mod error;
pub mod progress;
pub mod validation;
