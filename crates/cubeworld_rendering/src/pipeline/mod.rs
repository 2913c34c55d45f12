//! Per-frame output handed to the host.

mod frame;
mod stats;

pub use frame::{DrawCommand, RenderFrame};
pub use stats::RenderStats;
