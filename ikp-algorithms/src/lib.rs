pub(crate) type HashSet<T> = std::collections::HashSet<T, ahash::RandomState>;

mod diagnostics;
pub use diagnostics::*;
mod intervals;
pub use intervals::*;
mod params;
pub use params::*;
mod reconstruct;
pub use reconstruct::*;
mod rounding;
pub use rounding::*;
mod solver;
pub use solver::*;
mod subset_sums;
pub use subset_sums::*;
mod table;
pub use table::*;
