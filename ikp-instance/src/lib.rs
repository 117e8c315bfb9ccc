mod error;
pub use error::*;
mod instance;
pub use instance::*;
mod solution;
pub use solution::*;
