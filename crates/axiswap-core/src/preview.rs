use std::path::{Path, PathBuf};

use image::GrayImage;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::video::clip::Clip;
use crate::video::frame::Frame;

/// Writes the luma plane of frames as grayscale PNGs for quick inspection.
pub struct PreviewWriter {
    dir: PathBuf,
}

impl PreviewWriter {
    /// Prepare `dir`, creating it if needed.
    pub fn create(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir).map_err(|e| {
            Error::Preview(format!("failed to create {}: {e}", dir.display()))
        })?;
        info!(?dir, "preview directory ready");
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("frame_{index:08}.png"))
    }

    /// Save one frame. Returns `false` when the frame has no pixels to draw.
    pub fn save_frame(&self, index: usize, frame: &Frame) -> Result<bool> {
        if frame.width() == 0 || frame.height() == 0 {
            warn!(
                index,
                width = frame.width(),
                height = frame.height(),
                "skipping preview of zero-area frame"
            );
            return Ok(false);
        }

        let luma = frame.pixels().iter().map(|p| p.y).collect::<Vec<_>>();
        let img = GrayImage::from_raw(frame.width(), frame.height(), luma).ok_or_else(|| {
            Error::Preview(format!("luma buffer does not fit frame {index}"))
        })?;

        let path = self.frame_path(index);
        img.save(&path)
            .map_err(|e| Error::Preview(format!("failed to save {}: {e}", path.display())))?;

        debug!(?path, "saved preview frame");
        Ok(true)
    }

    /// Save every frame of `clip`, returning how many images were written.
    pub fn save_clip(&self, clip: &Clip) -> Result<usize> {
        let mut written = 0;
        for (index, frame) in clip.iter().enumerate() {
            if self.save_frame(index, frame)? {
                written += 1;
            }
        }
        info!(written, dir = ?self.dir, "preview frames saved");
        Ok(written)
    }
}
