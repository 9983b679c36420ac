//! YUV4MPEG2 container support, restricted to 8-bit `C420mpeg2` streams.

pub mod reader;
pub mod writer;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::video::clip::Clip;

pub use reader::{read_clip, Y4mHeader, Y4mReader};
pub use writer::{header_line, write_clip};

pub const SIGNATURE: &str = "YUV4MPEG2";
pub const COLORSPACE_420MPEG2: &str = "C420mpeg2";
pub const FRAME_MARKER: &str = "FRAME";
/// Rate stamped on every output file; the input rate is not carried over.
pub const OUTPUT_FRAMERATE: &str = "30:1";

/// Open `path` and parse it as a Y4M clip.
pub fn read_file(path: &Path, pool: &rayon::ThreadPool) -> Result<(Y4mHeader, Clip)> {
    info!(?path, "reading y4m file");
    let file = File::open(path).map_err(|e| Error::open(path, e))?;
    read_clip(BufReader::new(file), pool)
}

/// Create (or truncate) `path` and write `clip` to it.
pub fn write_file(clip: &Clip, path: &Path, pool: &rayon::ThreadPool) -> Result<()> {
    info!(?path, frames = clip.frames(), "writing y4m file");
    let file = File::create(path).map_err(|e| Error::open(path, e))?;
    write_clip(clip, BufWriter::new(file), pool)
}
