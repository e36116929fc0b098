//! PNG encoding for canvas pixel data.
//!
//! Every image is written as 8-bit RGBA (color type 6) with straight alpha,
//! whatever was drawn, so the output layout never depends on content.
//!
//! Output is written to any `io::Write`, so failures of the destination
//! surface as `io::Error`.

use flate2::{write::ZlibEncoder, Compression};
use std::io::{self, Write};

/// PNG file signature
const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

pub const COLOR_TYPE_RGBA: u8 = 6;

/// Encode straight (non-premultiplied) RGBA pixels as PNG.
///
/// `pixels` must hold exactly `width * height * 4` bytes.
pub fn encode_rgba<W: Write>(writer: &mut W, pixels: &[u8], width: u32, height: u32) -> io::Result<()> {
    if width == 0 || height == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "PNG dimensions must be non-zero",
        ));
    }
    let stride = width as usize * 4;
    let expected = stride * height as usize;
    if pixels.len() != expected {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("expected {} pixel bytes, got {}", expected, pixels.len()),
        ));
    }

    writer.write_all(&SIGNATURE)?;
    write_chunk(writer, b"IHDR", &ihdr(width, height, COLOR_TYPE_RGBA))?;
    let idat = deflate_scanlines(pixels, stride)?;
    write_chunk(writer, b"IDAT", &idat)?;
    write_chunk(writer, b"IEND", &[])
}

fn ihdr(width: u32, height: u32, color_type: u8) -> [u8; 13] {
    let mut data = [0u8; 13];
    data[0..4].copy_from_slice(&width.to_be_bytes());
    data[4..8].copy_from_slice(&height.to_be_bytes());
    data[8] = 8; // bit depth
    data[9] = color_type;
    // compression, filter and interlace methods stay 0
    data
}

/// Prefix every scanline with filter type 0 and zlib-compress the result.
fn deflate_scanlines(data: &[u8], stride: usize) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 4), Compression::fast());
    for row in data.chunks_exact(stride) {
        encoder.write_all(&[0])?;
        encoder.write_all(row)?;
    }
    encoder.finish()
}

fn write_chunk<W: Write>(writer: &mut W, kind: &[u8; 4], data: &[u8]) -> io::Result<()> {
    writer.write_all(&(data.len() as u32).to_be_bytes())?;
    writer.write_all(kind)?;
    writer.write_all(data)?;

    let mut crc = crc32fast::Hasher::new();
    crc.update(kind);
    crc.update(data);
    writer.write_all(&crc.finalize().to_be_bytes())
}
