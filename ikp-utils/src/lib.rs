mod json;
pub use json::*;
mod number;
pub use number::*;
