pub mod backend;
pub mod range;
