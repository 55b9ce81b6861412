pub mod focus;
pub mod table;
