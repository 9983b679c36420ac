use std::io::{self, BufRead, Read};

use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::video::clip::Clip;
use crate::video::planar;

use super::{COLORSPACE_420MPEG2, FRAME_MARKER, SIGNATURE};

/// Stream parameters parsed from a Y4M header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Y4mHeader {
    pub width: u32,
    pub height: u32,
    /// Framerate as written after `F`, e.g. `30000:1001`. Informational only.
    pub framerate: String,
    pub colorspace: String,
}

/// Tokenizing reader over a buffered Y4M byte stream.
pub struct Y4mReader<R> {
    inner: R,
}

impl<R: BufRead> Y4mReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Parse the signature and the `W`, `H`, `F` and `C` tags.
    ///
    /// Tokens between `F` and the colorspace tag (interlacing, aspect, ...)
    /// are skipped.
    pub fn read_header(&mut self) -> Result<Y4mHeader> {
        let signature = self.expect_token("signature")?;
        if signature != SIGNATURE {
            error!(%signature, "not a YUV4MPEG2 stream");
            return Err(Error::format(format!(
                "expected {SIGNATURE} signature, found {signature:?}"
            )));
        }

        let width = parse_dimension(&self.expect_token("width tag")?, 'W')?;
        let height = parse_dimension(&self.expect_token("height tag")?, 'H')?;

        let rate = self.expect_token("framerate tag")?;
        let Some(framerate) = rate.strip_prefix('F') else {
            return Err(Error::format(format!(
                "expected framerate tag 'F', found {rate:?}"
            )));
        };
        let framerate = framerate.to_string();

        let colorspace = loop {
            let token = self.expect_token("colorspace tag")?;
            if token.starts_with('C') {
                break token;
            }
            debug!(%token, "skipping header tag");
        };
        if colorspace != COLORSPACE_420MPEG2 {
            error!(%colorspace, "unsupported colorspace");
            return Err(Error::UnsupportedColorspace(colorspace));
        }

        info!(width, height, %framerate, %colorspace, "y4m header parsed");
        Ok(Y4mHeader {
            width,
            height,
            framerate,
            colorspace,
        })
    }

    /// Collect the raw planar payload of every frame that follows the header.
    pub fn read_frames(&mut self, header: &Y4mHeader) -> Result<Vec<u8>> {
        let frame_size = planar::frame_size(header.width, header.height)?;

        loop {
            match self.next_token()? {
                Some(token) if token == FRAME_MARKER => break,
                Some(token) => debug!(%token, "skipping token before first frame"),
                None => {
                    warn!("stream ended before the first FRAME marker");
                    return Ok(Vec::new());
                }
            }
        }

        let mut data = Vec::new();
        let mut frame_number = 0usize;
        loop {
            // FRAME parameters are not supported: exactly one separator byte.
            if self.next_byte()?.is_none() {
                return Err(Error::format(format!(
                    "stream ended after FRAME marker {frame_number}"
                )));
            }

            // The header size is untrusted: the buffer only grows by bytes actually read.
            let got = (&mut self.inner)
                .take(frame_size as u64)
                .read_to_end(&mut data)
                .map_err(Error::Read)?;
            if got < frame_size {
                error!(
                    frame_number,
                    read_bytes = got,
                    expected_bytes = frame_size,
                    "stream ended mid-frame"
                );
                return Err(Error::format(format!(
                    "frame {frame_number} truncated: read {got} of {frame_size} bytes"
                )));
            }
            debug!(frame_number, "read frame payload");
            frame_number += 1;

            match self.next_token()? {
                None => break,
                Some(token) if token == FRAME_MARKER => {}
                Some(token) => {
                    return Err(Error::format(format!(
                        "expected {FRAME_MARKER} after frame {}, found {token:?}",
                        frame_number - 1
                    )));
                }
            }
        }

        info!(frames = frame_number, bytes = data.len(), "y4m payload read");
        Ok(data)
    }

    fn expect_token(&mut self, what: &str) -> Result<String> {
        self.next_token()?
            .ok_or_else(|| Error::format(format!("stream ended before {what}")))
    }

    /// Next whitespace-delimited token, or `None` at end of stream.
    fn next_token(&mut self) -> Result<Option<String>> {
        while let Some(b) = self.peek_byte()? {
            if !b.is_ascii_whitespace() {
                break;
            }
            self.inner.consume(1);
        }

        let mut token = Vec::new();
        while let Some(b) = self.peek_byte()? {
            if b.is_ascii_whitespace() {
                break;
            }
            token.push(b);
            self.inner.consume(1);
        }

        if token.is_empty() {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&token).into_owned()))
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let b = self.peek_byte()?;
        if b.is_some() {
            self.inner.consume(1);
        }
        Ok(b)
    }

    fn peek_byte(&mut self) -> Result<Option<u8>> {
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Read(e)),
            }
        }
    }
}

fn parse_dimension(token: &str, tag: char) -> Result<u32> {
    let Some(digits) = token.strip_prefix(tag) else {
        return Err(Error::format(format!(
            "expected '{tag}' tag, found {token:?}"
        )));
    };
    match digits.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::format(format!(
            "'{tag}' tag needs a positive integer, found {token:?}"
        ))),
    }
}

/// Parse a whole Y4M stream and decode its frames on `pool`.
pub fn read_clip<R: BufRead>(reader: R, pool: &rayon::ThreadPool) -> Result<(Y4mHeader, Clip)> {
    let mut reader = Y4mReader::new(reader);
    let header = reader.read_header()?;
    let data = reader.read_frames(&header)?;
    let clip = Clip::from_planar(&data, header.width, header.height, pool)?;
    Ok((header, clip))
}
