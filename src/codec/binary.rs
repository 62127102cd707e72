//! Fixed little-endian binary layout
//!
//! ```text
//! i32 palette_count
//! palette_count × { u8 r, u8 g, u8 b, f32 x, f32 y }
//! i32 pixel_count
//! pixel_count × { f32 x, f32 y }
//! ```
//!
//! No header, magic or version: the byte layout is the whole contract.
//! Negative counts read as zero elements; bytes after the pixel section are
//! ignored.

use std::io::{Read, Write};

use super::CodecError;
use crate::models::{ColorVertex, Container, Pixel, Rgb};

/// Bytes per palette entry: three channels and two f32 coordinates.
pub const VERTEX_SIZE: usize = 3 + 4 + 4;
/// Bytes per pixel: two f32 coordinates.
pub const PIXEL_SIZE: usize = 4 + 4;

fn encode_count(len: usize) -> Result<[u8; 4], CodecError> {
    let count = i32::try_from(len).map_err(|_| CodecError::TooLarge(len))?;
    Ok(count.to_le_bytes())
}

/// Encode a container to its binary form.
pub fn encode_binary(container: &Container) -> Result<Vec<u8>, CodecError> {
    let size = 4 + container.palette.len() * VERTEX_SIZE + 4 + container.pixels.len() * PIXEL_SIZE;
    let mut buf = Vec::with_capacity(size);

    buf.extend_from_slice(&encode_count(container.palette.len())?);
    for vertex in &container.palette {
        buf.extend_from_slice(&vertex.color.channels());
        buf.extend_from_slice(&vertex.position.0.to_le_bytes());
        buf.extend_from_slice(&vertex.position.1.to_le_bytes());
    }

    buf.extend_from_slice(&encode_count(container.pixels.len())?);
    for pixel in &container.pixels {
        buf.extend_from_slice(&pixel.x.to_le_bytes());
        buf.extend_from_slice(&pixel.y.to_le_bytes());
    }

    Ok(buf)
}

/// Forward-only cursor over a byte slice that reports overruns by section.
struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take<const N: usize>(&mut self, section: &'static str) -> Result<[u8; N], CodecError> {
        let available = self.remaining();
        if available < N {
            return Err(CodecError::DecodeOverrun {
                section,
                offset: self.pos,
                needed: N,
                available,
            });
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    /// A declared element count; negative counts mean "none".
    fn count(&mut self, section: &'static str) -> Result<usize, CodecError> {
        let raw = i32::from_le_bytes(self.take::<4>(section)?);
        Ok(usize::try_from(raw).unwrap_or(0))
    }

    fn f32(&mut self, section: &'static str) -> Result<f32, CodecError> {
        Ok(f32::from_le_bytes(self.take::<4>(section)?))
    }
}

/// Decode a container from its binary form.
///
/// A stream shorter than its declared counts fails with
/// [`CodecError::DecodeOverrun`]; no partial container is returned.
pub fn decode_binary(bytes: &[u8]) -> Result<Container, CodecError> {
    let mut reader = ByteReader::new(bytes);

    let palette_count = reader.count("palette count")?;
    // Don't trust the declared count for allocation
    let mut palette = Vec::with_capacity(palette_count.min(reader.remaining() / VERTEX_SIZE));
    for _ in 0..palette_count {
        let [r, g, b] = reader.take::<3>("palette entry")?;
        let x = reader.f32("palette entry")?;
        let y = reader.f32("palette entry")?;
        palette.push(ColorVertex::new(Rgb::new(r, g, b), x, y));
    }

    let pixel_count = reader.count("pixel count")?;
    let mut pixels = Vec::with_capacity(pixel_count.min(reader.remaining() / PIXEL_SIZE));
    for _ in 0..pixel_count {
        let x = reader.f32("pixel")?;
        let y = reader.f32("pixel")?;
        pixels.push(Pixel::new(x, y));
    }

    Ok(Container::from_parts(palette, pixels))
}

/// Write the binary form of `container` to `writer`.
pub fn write_binary<W: Write>(writer: &mut W, container: &Container) -> Result<(), CodecError> {
    writer.write_all(&encode_binary(container)?)?;
    writer.flush()?;
    Ok(())
}

/// Read a whole binary container from `reader`.
pub fn read_binary<R: Read>(reader: &mut R) -> Result<Container, CodecError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode_binary(&bytes)
}
