//! # Core Models Module
//!
//! This module contains the entity types used to represent a parsed coordinate
//! file: atoms, residues, chains, ligands, cross-references to UniProt and the
//! domain annotations attached to them.
//!
//! ## Overview
//!
//! Every entity validates and coerces its fields on construction (whitespace is
//! stripped, numeric fields are parsed) and fails with a [`fields::MalformedRecord`]
//! if coercion fails. Children are only ever appended, so file order is kept.
//!
//! ## Key Components
//!
//! - [`atom`] - A named atom with an element symbol and a position in Angstroms
//! - [`residue`] - An amino-acid residue and the terminator sentinel that closes a chain
//! - [`chain`] - An ordered polymer of residues
//! - [`ligand`] - A bound small molecule kept outside the chains
//! - [`xref`] - A chain-to-UniProt cross-reference
//! - [`domain`] - A domain interval on a chain
//! - [`structure`] - The owning container with its validity flag
//! - [`builder`] - Cursor-driven incremental construction used by the parser

pub mod atom;
pub mod builder;
pub mod chain;
pub mod domain;
pub mod fields;
pub mod ligand;
pub mod residue;
pub mod structure;
pub mod xref;
