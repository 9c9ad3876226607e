/// Error types for mesh and texture loading
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Any failure while loading a mesh or texture from disk
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// A malformed record in a geometry file
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("`{keyword}` record expects {expected} fields, found {found}")]
    FieldCount {
        keyword: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("`{keyword}` record has a non-numeric field in {text:?}")]
    InvalidNumber { keyword: &'static str, text: String },
    #[error("malformed face record {text:?}")]
    InvalidFace { text: String },
    #[error("face has {count} vertices, at least 3 are required")]
    DegenerateFace { count: usize },
    #[error("index 0 is not valid, indices start at 1")]
    ZeroIndex,
    #[error("relative index {index} reaches before the first {pool} (only {len} defined)")]
    RelativeIndexUnderflow { pool: Pool, index: i64, len: usize },
}

/// The attribute pool a face-vertex reference points into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Position,
    TexCoord,
    Normal,
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pool::Position => "position",
            Pool::TexCoord => "texture coordinate",
            Pool::Normal => "normal",
        })
    }
}

/// A face-vertex reference pointing past the end of its pool
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("face reference {reference}: {pool} index {index} out of range ({len} defined)")]
pub struct IndexError {
    /// Position of the offending reference in the face-reference stream
    pub reference: usize,
    pub pool: Pool,
    /// 0-based index that was requested
    pub index: usize,
    pub len: usize,
}

/// A bitmap that cannot be decoded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextureError {
    #[error("not a BMP file")]
    NotBitmap,
    #[error("BMP data is truncated")]
    Truncated,
    #[error("unsupported BMP: {bits_per_pixel} bits per pixel, compression {compression}")]
    Unsupported {
        bits_per_pixel: u16,
        compression: u32,
    },
}
