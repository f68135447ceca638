//! Scene primitives driven by the pools

mod disabled;
mod transform;

pub use disabled::*;
pub use transform::*;
