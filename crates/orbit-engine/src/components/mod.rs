pub mod ship;
pub mod star;
pub mod target;
