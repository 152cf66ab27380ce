//! Pure route geometry engines
//!
//! - [`polyline`]: delta/zig-zag polyline codec
//! - [`duration`]: normalization of heterogeneous duration values to minutes
//! - [`walking`]: distance-based walking time estimates and the minimum policy

pub mod duration;
pub mod polyline;
pub mod walking;

pub use duration::{DurationValue, to_minutes};
pub use polyline::{PolylineError, decode, decode_strict, encode};
pub use walking::{WalkingPolicy, WalkingTally};
