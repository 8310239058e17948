pub mod inspect;
pub mod scan;
