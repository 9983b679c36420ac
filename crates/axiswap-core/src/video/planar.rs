//! 4:2:0 "mpeg2" planar layout.
//!
//! A frame of `W x H` occupies `(W*H*3)/2` bytes: the full-resolution Y plane,
//! then U, then V, each chroma plane `W/2` samples wide. Chroma sample
//! `(cx, cy)` covers the 2x2 luma block whose top-left corner is `(2cx, 2cy)`.

use crate::error::{Error, Result};
use crate::video::frame::{Frame, Yuv};

/// Byte size of one encoded frame. Dimensions too large to address are a
/// format error.
pub fn frame_size(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|luma| luma.checked_mul(3))
        .map(|n| n / 2)
        .ok_or_else(|| Error::format(format!("frame size of {width}x{height} overflows")))
}

/// Byte offsets of the Y, U and V planes' chroma lookups for one frame.
#[derive(Debug, Clone, Copy)]
struct Layout {
    width: usize,
    u_offset: usize,
    v_offset: usize,
    size: usize,
}

impl Layout {
    fn new(width: u32, height: u32) -> Result<Self> {
        let size = frame_size(width, height)?;
        let luma = width as usize * height as usize;
        Ok(Self {
            width: width as usize,
            u_offset: luma,
            v_offset: luma + luma / 4,
            size,
        })
    }

    fn luma(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn chroma(&self, x: usize, y: usize) -> usize {
        (y / 2) * (self.width / 2) + x / 2
    }

    /// Indices of the U and V samples for luma `(x, y)`. Odd dimensions can
    /// push these past the buffer end.
    fn chroma_indices(&self, x: usize, y: usize) -> Result<(usize, usize)> {
        let c = self.chroma(x, y);
        let (u, v) = (self.u_offset + c, self.v_offset + c);
        if v >= self.size {
            return Err(Error::format(format!(
                "chroma sample for pixel ({x}, {y}) falls outside the {}-byte frame",
                self.size
            )));
        }
        Ok((u, v))
    }
}

/// Decode one planar frame.
pub fn decode(buf: &[u8], width: u32, height: u32) -> Result<Frame> {
    let layout = Layout::new(width, height)?;
    if buf.len() != layout.size {
        return Err(Error::format(format!(
            "planar buffer is {} bytes, expected {} for {width}x{height}",
            buf.len(),
            layout.size
        )));
    }

    let mut frame = Frame::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let (xs, ys) = (x as usize, y as usize);
            let (u, v) = layout.chroma_indices(xs, ys)?;
            let pixel = Yuv::new(buf[layout.luma(xs, ys)], buf[u], buf[v]);
            frame.set_pixel(x, y, pixel)?;
        }
    }
    Ok(frame)
}

/// Encode `frame` into `buf`, which must be exactly [`frame_size`] bytes.
///
/// Every luma pixel writes its chroma unconditionally, so the last pixel of
/// each 2x2 block in raster order decides the stored U and V.
pub fn encode_into(frame: &Frame, buf: &mut [u8]) -> Result<()> {
    let layout = Layout::new(frame.width(), frame.height())?;
    if buf.len() != layout.size {
        return Err(Error::format(format!(
            "encode buffer is {} bytes, expected {} for {}x{}",
            buf.len(),
            layout.size,
            frame.width(),
            frame.height()
        )));
    }

    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let pixel = frame.pixel(x, y)?;
            let (xs, ys) = (x as usize, y as usize);
            let (u, v) = layout.chroma_indices(xs, ys)?;
            buf[layout.luma(xs, ys)] = pixel.y;
            buf[u] = pixel.u;
            buf[v] = pixel.v;
        }
    }
    Ok(())
}

pub fn encode(frame: &Frame) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; frame_size(frame.width(), frame.height())?];
    encode_into(frame, &mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    /// A frame whose 2x2 blocks share chroma, so encoding loses nothing.
    fn block_uniform_frame(width: u32, height: u32) -> Frame {
        let mut frame = Frame::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let block = (y / 2) * (width / 2) + x / 2;
                let pixel = Yuv::new(
                    (y * width + x) as u8,
                    (100 + block) as u8,
                    (200 + block) as u8,
                );
                frame.set_pixel(x, y, pixel).unwrap();
            }
        }
        frame
    }

    #[test]
    fn decode_reads_planes() {
        let buf = [0x10, 0x20, 0x30, 0x40, 0x80, 0x81];
        let frame = decode(&buf, 2, 2).unwrap();
        assert_eq!(frame.pixel(0, 0).unwrap(), Yuv::new(0x10, 0x80, 0x81));
        assert_eq!(frame.pixel(1, 0).unwrap(), Yuv::new(0x20, 0x80, 0x81));
        assert_eq!(frame.pixel(0, 1).unwrap(), Yuv::new(0x30, 0x80, 0x81));
        assert_eq!(frame.pixel(1, 1).unwrap(), Yuv::new(0x40, 0x80, 0x81));
    }

    #[test]
    fn oversized_dimensions_are_format_error() {
        let err = frame_size(u32::MAX, u32::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(frame_size(4, 4).unwrap(), 24);
        assert_eq!(frame_size(3, 3).unwrap(), 13);
    }

    #[test]
    fn decode_rejects_wrong_size() {
        let err = decode(&[0u8; 5], 2, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn encode_then_decode_is_lossless_for_uniform_blocks() {
        let frame = block_uniform_frame(6, 4);
        let buf = encode(&frame).unwrap();
        assert_eq!(buf.len(), frame_size(6, 4).unwrap());
        assert_eq!(decode(&buf, 6, 4).unwrap(), frame);
    }

    #[test]
    fn encode_keeps_last_pixel_of_each_block() {
        let mut frame = Frame::new(2, 2);
        frame.set_pixel(0, 0, Yuv::new(1, 10, 20)).unwrap();
        frame.set_pixel(1, 0, Yuv::new(2, 11, 21)).unwrap();
        frame.set_pixel(0, 1, Yuv::new(3, 12, 22)).unwrap();
        frame.set_pixel(1, 1, Yuv::new(4, 13, 23)).unwrap();
        assert_eq!(encode(&frame).unwrap(), vec![1, 2, 3, 4, 13, 23]);
    }

    #[test]
    fn chroma_plane_layout_for_4x4() {
        let frame = block_uniform_frame(4, 4);
        let buf = encode(&frame).unwrap();
        assert_eq!(&buf[16..20], &[100, 101, 102, 103]);
        assert_eq!(&buf[20..24], &[200, 201, 202, 203]);
    }

    #[test]
    fn encode_rejects_wrong_buffer() {
        let frame = Frame::new(2, 2);
        let mut buf = [0u8; 7];
        assert_eq!(
            encode_into(&frame, &mut buf).unwrap_err().kind(),
            ErrorKind::Format
        );
    }

    #[test]
    fn odd_width_uses_truncated_chroma_rows() {
        // W=3, H=2: 6 luma bytes, chroma planes one sample wide.
        let buf = [1, 2, 3, 4, 5, 6, 50, 60, 70];
        let frame = decode(&buf, 3, 2).unwrap();
        assert_eq!(frame.pixel(0, 0).unwrap(), Yuv::new(1, 50, 60));
        assert_eq!(frame.pixel(2, 1).unwrap(), Yuv::new(6, 60, 70));
    }

    #[test]
    fn odd_dimensions_past_buffer_end_fail() {
        let buf = [0u8; 13];
        assert_eq!(decode(&buf, 3, 3).unwrap_err().kind(), ErrorKind::Format);
    }
}
