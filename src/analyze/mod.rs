pub mod analyzer;
pub mod filter;
mod model;

pub use model::*;
