pub mod host;
pub mod motion;
pub mod source;
