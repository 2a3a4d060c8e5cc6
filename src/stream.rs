//! Signed-byte view over a finished SVG document.
//!
//! Consumers on the other side of the stream work with signed 8-bit values, so
//! every byte `b` is delivered as `b - 256` when `b > 127`. The unsigned bytes
//! are still available through [`std::io::Read`].

use crate::error::{PlotError, PlotResult};
use crate::plot::types::{VectorImage, SVG_MIME_TYPE};
use std::io;

/// Result of a read that can run out of data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome<T> {
    Data(T),
    /// No bytes were left. Once returned, every later read returns it too.
    EndOfStream,
}

/// A source of signed bytes.
pub trait SignedByteInput {
    /// Next byte, or end of stream.
    fn read_byte(&mut self) -> ReadOutcome<i8>;

    /// Fill as much of `buf` as possible and return the count.
    ///
    /// An empty `buf` returns `Data(0)` without touching the stream, unless the
    /// stream is already exhausted.
    fn read_into(&mut self, buf: &mut [i8]) -> ReadOutcome<usize>;

    /// Fill at most `len` values of `buf` starting at `offset`.
    ///
    /// The range is validated before any byte is consumed.
    fn read_into_range(
        &mut self,
        buf: &mut [i8],
        offset: usize,
        len: usize,
    ) -> PlotResult<ReadOutcome<usize>>;
}

/// `b > 127 ? b - 256 : b`
#[inline]
pub fn to_signed(b: u8) -> i8 {
    b as i8
}

/// Sequential reader over an image's bytes.
#[derive(Debug, Clone)]
pub struct SvgByteStream {
    bytes: Vec<u8>,
    pos: usize,
    exhausted: bool,
}

impl SvgByteStream {
    pub fn new(image: VectorImage) -> Self {
        Self {
            bytes: image.into_bytes(),
            pos: 0,
            exhausted: false,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes not yet read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// True once a read has reported [`ReadOutcome::EndOfStream`].
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn mime_type(&self) -> &'static str {
        SVG_MIME_TYPE
    }

    /// Copy up to `dst.len()` unread bytes, or mark the stream exhausted.
    fn take(&mut self, dst: &mut [i8]) -> ReadOutcome<usize> {
        if self.exhausted || self.pos >= self.bytes.len() {
            self.exhausted = true;
            return ReadOutcome::EndOfStream;
        }
        let n = dst.len().min(self.remaining());
        for (d, &b) in dst.iter_mut().zip(&self.bytes[self.pos..self.pos + n]) {
            *d = to_signed(b);
        }
        self.pos += n;
        ReadOutcome::Data(n)
    }
}

impl From<VectorImage> for SvgByteStream {
    fn from(image: VectorImage) -> Self {
        Self::new(image)
    }
}

impl SignedByteInput for SvgByteStream {
    fn read_byte(&mut self) -> ReadOutcome<i8> {
        let mut one = [0i8; 1];
        match self.take(&mut one) {
            ReadOutcome::Data(_) => ReadOutcome::Data(one[0]),
            ReadOutcome::EndOfStream => ReadOutcome::EndOfStream,
        }
    }

    fn read_into(&mut self, buf: &mut [i8]) -> ReadOutcome<usize> {
        if buf.is_empty() && !self.exhausted {
            return ReadOutcome::Data(0);
        }
        self.take(buf)
    }

    fn read_into_range(
        &mut self,
        buf: &mut [i8],
        offset: usize,
        len: usize,
    ) -> PlotResult<ReadOutcome<usize>> {
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= buf.len())
            .ok_or_else(|| {
                PlotError::invalid_argument(format!(
                    "range {}+{} out of bounds for buffer of length {}",
                    offset,
                    len,
                    buf.len()
                ))
            })?;
        Ok(self.read_into(&mut buf[offset..end]))
    }
}

impl io::Read for SvgByteStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let n = buf.len().min(self.remaining());
        buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
        self.pos += n;
        if n == 0 {
            self.exhausted = true;
        }
        Ok(n)
    }
}
