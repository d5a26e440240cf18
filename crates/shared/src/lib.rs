mod date;
mod error;
pub mod json;

pub use date::*;
pub use error::*;
