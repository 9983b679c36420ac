use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::video::frame::Frame;
use crate::video::planar;
use crate::workers::fork_join;

/// An in-memory sequence of equally sized frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    width: u32,
    height: u32,
    frames: Vec<Frame>,
}

impl Clip {
    /// Create an empty clip that accepts `width x height` frames.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frames: Vec::new(),
        }
    }

    /// Decode a run of concatenated 4:2:0 frames, one decode job per frame.
    pub fn from_planar(
        data: &[u8],
        width: u32,
        height: u32,
        pool: &rayon::ThreadPool,
    ) -> Result<Self> {
        let frame_size = planar::frame_size(width, height)?;
        if frame_size == 0 {
            return Err(Error::format(format!(
                "cannot decode frames of size {width}x{height}"
            )));
        }
        if data.len() % frame_size != 0 {
            error!(
                bytes = data.len(),
                frame_size, "planar data is not a whole number of frames"
            );
            return Err(Error::format(format!(
                "planar data of {} bytes is not a multiple of the {frame_size}-byte frame size",
                data.len()
            )));
        }

        let count = data.len() / frame_size;
        debug!(count, width, height, "decoding frames");

        let frames = fork_join(pool, count, |i| {
            let start = i * frame_size;
            planar::decode(&data[start..start + frame_size], width, height)
        })?;

        Ok(Self {
            width,
            height,
            frames,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of frames held.
    pub fn frames(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Append a frame. Its dimensions must match the clip's.
    pub fn push(&mut self, frame: Frame) -> Result<()> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(Error::Dimension {
                expected_width: self.width,
                expected_height: self.height,
                width: frame.width(),
                height: frame.height(),
            });
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn frame(&self, index: usize) -> Result<&Frame> {
        self.frames.get(index).ok_or_else(|| {
            Error::range(format!(
                "frame {index} outside clip of {} frames",
                self.frames.len()
            ))
        })
    }

    pub fn as_slice(&self) -> &[Frame] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }
}

impl<'a> IntoIterator for &'a Clip {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
