//! Entity model: [`Measure`] inside [`Area`] inside [`Areas`].
//!
//! Every write that lands on an existing key is a merge, never a replacement: the incoming value
//! wins a collision and everything else is kept.

pub mod area;
pub mod areas;
pub mod measure;

pub use area::{Area, LANG_ENGLISH, LANG_WELSH};
pub use areas::Areas;
pub use measure::Measure;
