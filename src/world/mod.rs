// world/ - Surface geometry and colors
//
// Pure functions and plain values the simulation and renderer query.
// No state, no allocation.

mod palette;
mod viewport;

pub use palette::*;
pub use viewport::*;
