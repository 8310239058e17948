use crate::core::models::atom::Atom;
use nalgebra::Point3;

/// Distance (Angstroms) below which two heavy atoms are considered in contact.
pub const CONTACT_DISTANCE_ANGSTROMS: f64 = 5.0;

pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    nalgebra::distance(a, b)
}

/// Whether two atoms are in contact: both are heavy atoms and their distance is
/// strictly below `cutoff`.
pub fn in_contact(a: &Atom, b: &Atom, cutoff: f64) -> bool {
    !a.is_hydrogen() && !b.is_hydrogen() && distance(a.position(), b.position()) < cutoff
}
