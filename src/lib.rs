#![allow(missing_docs)]

pub mod error;
pub mod function;
pub mod preset;
pub mod quantize;

pub use error::Error;
