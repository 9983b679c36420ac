//! Time/width axis swap.
//!
//! Output frame `t` is built from column `t` of every input frame:
//! `out[t].pixel(x, y) == in[x].pixel(t, y)`. The output width is the input
//! frame count rounded down to even, so a trailing odd frame is dropped.

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::video::clip::Clip;
use crate::video::frame::Frame;
use crate::workers::fork_join;

/// Output width for a clip of `frames` frames. It must fit a frame width.
pub fn swapped_width(frames: usize) -> Result<u32> {
    let even = frames - frames % 2;
    u32::try_from(even)
        .map_err(|_| Error::format(format!("{frames} frames exceed the maximum frame width")))
}

/// Swap the time and horizontal axes of `clip`, one job per output frame.
pub fn swap_time_and_width(clip: &Clip, pool: &rayon::ThreadPool) -> Result<Clip> {
    let out_width = swapped_width(clip.frames())?;
    let out_height = clip.height();
    let out_frames = clip.width() as usize;

    if clip.frames() % 2 != 0 {
        debug!(frames = clip.frames(), "dropping trailing frame to keep width even");
    }
    info!(
        in_width = clip.width(),
        in_frames = clip.frames(),
        out_width,
        out_frames,
        "swapping time and width axes"
    );

    let frames = fork_join(pool, out_frames, |t| column_frame(clip, t as u32, out_width))?;

    let mut out = Clip::new(out_width, out_height);
    for frame in frames {
        out.push(frame)?;
    }
    Ok(out)
}

/// Gather column `column` of the first `width` input frames into one frame.
fn column_frame(clip: &Clip, column: u32, width: u32) -> Result<Frame> {
    let mut frame = Frame::new(width, clip.height());
    for y in 0..clip.height() {
        for x in 0..width {
            let pixel = clip.frame(x as usize)?.pixel(column, y)?;
            frame.set_pixel(x, y, pixel)?;
        }
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::frame::Yuv;
    use crate::workers::build_pool;

    /// Clip whose pixel at `(x, y)` in frame `t` encodes all three coordinates.
    fn coordinate_clip(width: u32, height: u32, frames: u32) -> Clip {
        let mut clip = Clip::new(width, height);
        for t in 0..frames {
            let mut frame = Frame::new(width, height);
            for y in 0..height {
                for x in 0..width {
                    frame
                        .set_pixel(x, y, Yuv::new(x as u8, y as u8, t as u8))
                        .unwrap();
                }
            }
            clip.push(frame).unwrap();
        }
        clip
    }

    #[test]
    fn swapped_width_rounds_down_to_even() {
        assert_eq!(swapped_width(0).unwrap(), 0);
        assert_eq!(swapped_width(1).unwrap(), 0);
        assert_eq!(swapped_width(4).unwrap(), 4);
        assert_eq!(swapped_width(7).unwrap(), 6);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn swapped_width_rejects_counts_beyond_u32() {
        let max = u32::MAX as usize;
        assert_eq!(swapped_width(max).unwrap(), u32::MAX - 1);
        let err = swapped_width(max + 3).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Format);
    }

    #[test]
    fn mapping_law_holds() {
        let pool = build_pool(Some(3)).unwrap();
        let input = coordinate_clip(5, 3, 4);
        let out = swap_time_and_width(&input, &pool).unwrap();

        assert_eq!(out.width(), 4);
        assert_eq!(out.height(), 3);
        assert_eq!(out.frames(), 5);
        for t in 0..out.frames() {
            for y in 0..out.height() {
                for x in 0..out.width() {
                    let got = out.frame(t).unwrap().pixel(x, y).unwrap();
                    let want = input.frame(x as usize).unwrap().pixel(t as u32, y).unwrap();
                    assert_eq!(got, want, "t={t} x={x} y={y}");
                }
            }
        }
    }

    #[test]
    fn odd_frame_count_drops_last_frame() {
        let pool = build_pool(Some(2)).unwrap();
        let input = coordinate_clip(2, 2, 3);
        let out = swap_time_and_width(&input, &pool).unwrap();
        assert_eq!(out.width(), 2);
        for frame in &out {
            assert!(frame.pixels().iter().all(|p| p.v < 2));
        }
    }

    #[test]
    fn swapping_twice_restores_even_clip() {
        let pool = build_pool(Some(2)).unwrap();
        let input = coordinate_clip(4, 3, 6);
        let once = swap_time_and_width(&input, &pool).unwrap();
        let twice = swap_time_and_width(&once, &pool).unwrap();
        assert_eq!(twice, input);
    }

    #[test]
    fn empty_clip_yields_zero_width_frames() {
        let pool = build_pool(Some(1)).unwrap();
        let input = Clip::new(3, 2);
        let out = swap_time_and_width(&input, &pool).unwrap();
        assert_eq!(out.width(), 0);
        assert_eq!(out.frames(), 3);
        assert!(out.iter().all(|f| f.pixels().is_empty()));
    }
}
