pub mod error;
pub mod geometry;
pub mod makevalid;
pub mod math;

pub use error::{PlanarisError, Result};
