//! Connected regions of matching cell state.
//!
//! - `flood_fill`: relabel the component containing a seed in place
//! - `region`: compute the same component without mutating
//!
//! Both expand 4-connected with an explicit stack, so depth is bounded by the
//! board size rather than the call stack.

pub mod flood;

pub use flood::{flood_fill, region, Region};
