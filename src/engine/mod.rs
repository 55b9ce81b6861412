pub mod frame;
pub mod mount;
pub mod resolver;
pub mod signals;
