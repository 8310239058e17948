use super::fields::{MalformedRecord, parse_float};
use nalgebra::Point3;

/// A single atom read from a coordinate record.
///
/// Atoms are immutable once constructed and are owned by exactly one
/// [`Residue`](super::residue::Residue) or [`Ligand`](super::ligand::Ligand).
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The atom name with surrounding whitespace removed (e.g. "CA", "FE").
    name: String,
    /// The element symbol; may be empty when the record omits it.
    element: String,
    /// Cartesian position in Angstroms.
    position: Point3<f64>,
}

impl Atom {
    /// Creates an atom from already typed values.
    ///
    /// # Arguments
    ///
    /// * `name` - The atom name; surrounding whitespace is stripped.
    /// * `element` - The element symbol; surrounding whitespace is stripped.
    /// * `position` - The atom position in Angstroms.
    pub fn new(name: &str, element: &str, position: Point3<f64>) -> Self {
        Self {
            name: name.trim().to_string(),
            element: element.trim().to_string(),
            position,
        }
    }

    /// Creates an atom from the raw text fields of a coordinate record.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedRecord`] if any coordinate is not a valid float.
    pub fn from_fields(
        name: &str,
        element: &str,
        x: &str,
        y: &str,
        z: &str,
    ) -> Result<Self, MalformedRecord> {
        let position = Point3::new(
            parse_float("x", x)?,
            parse_float("y", y)?,
            parse_float("z", z)?,
        );
        Ok(Self::new(name, element, position))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn position(&self) -> &Point3<f64> {
        &self.position
    }

    /// Whether the atom is a hydrogen, judged by the first character of its name.
    pub fn is_hydrogen(&self) -> bool {
        self.name.starts_with('H')
    }
}
