/// 24-bit uncompressed BMP decoding and texture sampling
use std::fs;
use std::path::Path;

use log::info;
use nom::{
    bytes::complete::{tag, take},
    number::complete::{le_i32, le_u16, le_u32},
    sequence::{preceded, tuple},
    IResult,
};

use crate::algebra::Vec2;
use crate::error::{LoadError, TextureError};

/// Fields of the BMP file and info headers that decoding needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BmpHeader {
    data_offset: u32,
    header_size: u32,
    width: i32,
    height: i32,
    bits_per_pixel: u16,
    compression: u32,
}

fn bmp_header(input: &[u8]) -> IResult<&[u8], BmpHeader> {
    // magic, file size, reserved
    let (input, _) = tuple((tag(&b"BM"[..]), take(8usize)))(input)?;
    let (input, (data_offset, header_size, width, height)) =
        tuple((le_u32, le_u32, le_i32, le_i32))(input)?;
    let (input, (bits_per_pixel, compression)) = preceded(le_u16, tuple((le_u16, le_u32)))(input)?;

    Ok((
        input,
        BmpHeader {
            data_offset,
            header_size,
            width,
            height,
            bits_per_pixel,
            compression,
        },
    ))
}

/// An RGB image whose row 0 is the bottom of the picture, so `v = 0`
/// samples the bottom edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl Texture {
    pub fn new(width: usize, height: usize, pixels: Vec<[u8; 3]>) -> Option<Self> {
        (width > 0 && height > 0 && pixels.len() == width * height).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode an uncompressed 24-bit BMP, swapping the stored BGR to RGB
    pub fn from_bmp(data: &[u8]) -> Result<Self, TextureError> {
        let (_, header) = bmp_header(data).map_err(|_| {
            if data.starts_with(b"BM") {
                TextureError::Truncated
            } else {
                TextureError::NotBitmap
            }
        })?;
        if header.header_size < 40 || header.bits_per_pixel != 24 || header.compression != 0 {
            return Err(TextureError::Unsupported {
                bits_per_pixel: header.bits_per_pixel,
                compression: header.compression,
            });
        }

        let width = usize::try_from(header.width).map_err(|_| TextureError::NotBitmap)?;
        let height = usize::try_from(header.height.unsigned_abs()).map_err(|_| TextureError::NotBitmap)?;
        if width == 0 || height == 0 {
            return Err(TextureError::NotBitmap);
        }
        let top_down = header.height < 0;

        // Rows are padded to a multiple of four bytes
        let row_len = (width * 3 + 3) & !3;
        let start = usize::try_from(header.data_offset).map_err(|_| TextureError::Truncated)?;
        let end = row_len
            .checked_mul(height)
            .and_then(|len| len.checked_add(start))
            .ok_or(TextureError::Truncated)?;
        let raw = data.get(start..end).ok_or(TextureError::Truncated)?;

        let mut pixels = Vec::with_capacity(width * height);
        for row in 0..height {
            let stored = if top_down { height - 1 - row } else { row };
            let bytes = &raw[stored * row_len..stored * row_len + width * 3];
            pixels.extend(bytes.chunks_exact(3).map(|bgr| [bgr[2], bgr[1], bgr[0]]));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at column `x`, row `y` counted from the bottom
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Nearest-neighbour lookup with repeat wrapping on both axes
    pub fn sample(&self, uv: Vec2) -> [u8; 3] {
        let wrap = |t: f32, size: usize| {
            let t = t - t.floor();
            ((t * size as f32) as usize).min(size - 1)
        };
        let x = wrap(uv.x, self.width);
        let y = wrap(uv.y, self.height);
        self.pixels[y * self.width + x]
    }
}

/// Read and decode a BMP texture from disk
pub fn load_bmp(path: impl AsRef<Path>) -> Result<Texture, LoadError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| LoadError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let texture = Texture::from_bmp(&data)?;
    info!(
        "loaded texture {}: {}x{}",
        path.display(),
        texture.width,
        texture.height
    );
    Ok(texture)
}
