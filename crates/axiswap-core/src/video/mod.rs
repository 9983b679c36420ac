pub mod clip;
pub mod frame;
pub mod planar;

pub use clip::Clip;
pub use frame::{Frame, Yuv};
