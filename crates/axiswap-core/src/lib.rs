//! Spatio-temporal transpose of Y4M clips: frame `t` of the output is column
//! `t` of every input frame.

pub mod error;
pub mod pipeline;
pub mod preview;
pub mod transform;
pub mod video;
pub mod workers;
pub mod y4m;

pub use error::{Error, ErrorKind, Result};
pub use video::{Clip, Frame, Yuv};
