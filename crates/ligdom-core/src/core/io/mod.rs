//! Provides input functionality for coordinate file formats.
//!
//! This module contains the fixed-column PDB record parser and the trait-based
//! interface it implements, so further formats can be added behind the same API.

pub mod pdb;
pub mod traits;
