use std::io::Write;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::video::clip::Clip;
use crate::video::planar;

use super::{COLORSPACE_420MPEG2, FRAME_MARKER, OUTPUT_FRAMERATE, SIGNATURE};

/// Header line written for `clip`. The framerate is always [`OUTPUT_FRAMERATE`].
pub fn header_line(clip: &Clip) -> String {
    format!(
        "{SIGNATURE} W{} H{} F{OUTPUT_FRAMERATE} {COLORSPACE_420MPEG2}\n",
        clip.width(),
        clip.height()
    )
}

/// Serialize `clip` as Y4M, encoding frames in parallel on `pool`.
pub fn write_clip<W: Write>(clip: &Clip, mut out: W, pool: &rayon::ThreadPool) -> Result<()> {
    let frame_size = planar::frame_size(clip.width(), clip.height())?;
    let encoded = encode_frames(clip, frame_size, pool)?;

    out.write_all(header_line(clip).as_bytes())
        .map_err(Error::Write)?;

    for i in 0..clip.frames() {
        let payload = &encoded[i * frame_size..(i + 1) * frame_size];
        writeln!(out, "{FRAME_MARKER}").map_err(Error::Write)?;
        out.write_all(payload).map_err(Error::Write)?;
    }
    out.flush().map_err(Error::Write)?;

    info!(
        frames = clip.frames(),
        width = clip.width(),
        height = clip.height(),
        "y4m clip written"
    );
    Ok(())
}

/// Encode every frame into its own `frame_size` range of one buffer.
fn encode_frames(clip: &Clip, frame_size: usize, pool: &rayon::ThreadPool) -> Result<Vec<u8>> {
    let total = frame_size.checked_mul(clip.frames()).ok_or_else(|| {
        Error::format(format!(
            "{} frames of {frame_size} bytes overflow the output buffer",
            clip.frames()
        ))
    })?;
    let mut buffer = vec![0u8; total];
    if frame_size == 0 {
        debug!(frames = clip.frames(), "zero-area frames, nothing to encode");
        return Ok(buffer);
    }

    let results = pool.install(|| {
        buffer
            .par_chunks_exact_mut(frame_size)
            .zip(clip.as_slice().par_iter())
            .map(|(chunk, frame)| planar::encode_into(frame, chunk))
            .collect::<Vec<_>>()
    });
    for item in results {
        item?;
    }

    Ok(buffer)
}
