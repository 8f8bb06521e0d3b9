//! Foundation layer: math, timing, and logging
//!
//! These modules have no dependency on the rendering layer and are safe to
//! use from any subsystem.

pub mod logging;
pub mod math;
pub mod time;

pub use math::{lerp, Vec3};
pub use time::FrameTimer;
