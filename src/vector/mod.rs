//! Algorithms that search for local minima of functions along multiple dimensions.

mod nelder_mead;
mod observe;
mod simplex;
mod vertex;

pub use self::nelder_mead::NelderMead;
pub use self::nelder_mead::NelderMeadBuilder;
pub use self::nelder_mead::NelderMeadBuilderError;

pub use self::observe::{Event, LogObserver, Observer, Operation};
pub use self::simplex::Simplex;
pub use self::vertex::Vertex;
