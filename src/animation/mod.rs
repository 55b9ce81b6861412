pub mod curve;
pub mod ease;
pub mod interp;
pub mod series;
