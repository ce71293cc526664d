//! `.npy` header definition.
//!
//! Layout:
//! - Bytes 0-5: magic `\x93NUMPY`
//! - Byte 6-7: format version (major, minor)
//! - Header length: u16 LE for version 1.x, u32 LE for 2.x and 3.x
//! - Header: a Python dict literal with `descr`, `fortran_order` and `shape`,
//!   space-padded so the data starts on a 64-byte boundary, ending in `\n`

use std::io::Read;

use crate::error::{Result, RoomSdfIoError};

/// Magic bytes for the `.npy` format.
pub const NPY_MAGIC: [u8; 6] = *b"\x93NUMPY";

/// Alignment of the array data section.
pub const HEADER_ALIGN: usize = 64;

/// Byte order of multi-byte elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least significant byte first (`<`).
    Little,
    /// Most significant byte first (`>`).
    Big,
}

impl ByteOrder {
    /// Byte order of the running machine (`=` in a descr).
    pub const NATIVE: ByteOrder = if cfg!(target_endian = "big") {
        ByteOrder::Big
    } else {
        ByteOrder::Little
    };
}

/// Scalar category of an element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// `b`
    Bool,
    /// `i`
    Int,
    /// `u`
    UInt,
    /// `f`
    Float,
}

/// Element type of an array, as encoded in the `descr` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dtype {
    /// Scalar category.
    pub kind: ScalarKind,
    /// Bytes per element.
    pub size: usize,
    /// Byte order (irrelevant for one-byte types).
    pub order: ByteOrder,
}

impl Dtype {
    /// Create a dtype.
    pub const fn new(kind: ScalarKind, size: usize, order: ByteOrder) -> Self {
        Self { kind, size, order }
    }

    /// Parse a simple `descr` such as `<f4`, `>i8` or `|u1`.
    ///
    /// # Errors
    /// Returns `UnsupportedDtype` for structured, complex, string or odd-sized types.
    pub fn parse(descr: &str) -> Result<Self> {
        let unsupported = || RoomSdfIoError::UnsupportedDtype {
            descr: descr.to_string(),
        };

        let mut chars = descr.chars().peekable();
        let order = match chars.peek() {
            Some('<') | Some('|') => {
                chars.next();
                ByteOrder::Little
            }
            Some('>') => {
                chars.next();
                ByteOrder::Big
            }
            Some('=') => {
                chars.next();
                ByteOrder::NATIVE
            }
            _ => ByteOrder::NATIVE,
        };

        let kind = match chars.next() {
            Some('b') => ScalarKind::Bool,
            Some('i') => ScalarKind::Int,
            Some('u') => ScalarKind::UInt,
            Some('f') => ScalarKind::Float,
            _ => return Err(unsupported()),
        };

        let size: usize = chars.collect::<String>().parse().map_err(|_| unsupported())?;
        let supported = match kind {
            ScalarKind::Bool => size == 1,
            ScalarKind::Int | ScalarKind::UInt => matches!(size, 1 | 2 | 4 | 8),
            ScalarKind::Float => matches!(size, 4 | 8),
        };
        if !supported {
            return Err(unsupported());
        }

        Ok(Self { kind, size, order })
    }

    /// The `descr` string for this dtype.
    pub fn descr(&self) -> String {
        let order = if self.size == 1 {
            '|'
        } else {
            match self.order {
                ByteOrder::Little => '<',
                ByteOrder::Big => '>',
            }
        };
        let kind = match self.kind {
            ScalarKind::Bool => 'b',
            ScalarKind::Int => 'i',
            ScalarKind::UInt => 'u',
            ScalarKind::Float => 'f',
        };
        format!("{}{}{}", order, kind, self.size)
    }
}

/// Parsed `.npy` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpyHeader {
    /// Element type.
    pub dtype: Dtype,
    /// True when the data is stored first-axis-fastest.
    pub fortran_order: bool,
    /// Array shape.
    pub shape: Vec<usize>,
}

impl NpyHeader {
    /// Create a header for a C-ordered array.
    pub fn new(dtype: Dtype, shape: Vec<usize>) -> Self {
        Self {
            dtype,
            fortran_order: false,
            shape,
        }
    }

    /// Number of elements described by the shape, or `None` on overflow.
    pub fn element_count(&self) -> Option<usize> {
        self.shape
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }

    /// The header dict literal, without padding.
    pub fn dict_literal(&self) -> String {
        let shape = match self.shape.len() {
            1 => format!("({},)", self.shape[0]),
            _ => {
                let dims: Vec<String> = self.shape.iter().map(|d| d.to_string()).collect();
                format!("({})", dims.join(", "))
            }
        };
        format!(
            "{{'descr': '{}', 'fortran_order': {}, 'shape': {}, }}",
            self.dtype.descr(),
            if self.fortran_order { "True" } else { "False" },
            shape
        )
    }

    /// Serialize the full preamble (magic, version, length, padded dict).
    ///
    /// Uses version 1.0 unless the header is too long for a u16 length.
    pub fn to_bytes(&self) -> Vec<u8> {
        let dict = self.dict_literal();

        // magic + version + u16 length
        let mut prefix_len = NPY_MAGIC.len() + 2 + 2;
        let mut version = 1u8;
        let unpadded = prefix_len + dict.len() + 1;
        let mut total = unpadded.div_ceil(HEADER_ALIGN) * HEADER_ALIGN;
        if total - prefix_len > u16::MAX as usize {
            version = 2;
            prefix_len += 2;
            total = (prefix_len + dict.len() + 1).div_ceil(HEADER_ALIGN) * HEADER_ALIGN;
        }
        let header_len = total - prefix_len;

        let mut bytes = Vec::with_capacity(total);
        bytes.extend_from_slice(&NPY_MAGIC);
        bytes.push(version);
        bytes.push(0);
        if version == 1 {
            bytes.extend_from_slice(&(header_len as u16).to_le_bytes());
        } else {
            bytes.extend_from_slice(&(header_len as u32).to_le_bytes());
        }
        bytes.extend_from_slice(dict.as_bytes());
        bytes.resize(total - 1, b' ');
        bytes.push(b'\n');
        bytes
    }

    /// Parse the header dict literal.
    pub fn parse(text: &str) -> Result<Self> {
        let descr_value = value_after(text, "descr")?;
        let descr = quoted(descr_value).ok_or_else(|| match descr_value.chars().next() {
            Some('[') => RoomSdfIoError::UnsupportedDtype {
                descr: "structured".to_string(),
            },
            _ => RoomSdfIoError::format("descr is not a string"),
        })?;
        let dtype = Dtype::parse(descr)?;

        let fortran_value = value_after(text, "fortran_order")?;
        let fortran_order = if fortran_value.starts_with("True") {
            true
        } else if fortran_value.starts_with("False") {
            false
        } else {
            return Err(RoomSdfIoError::format("fortran_order is not a bool"));
        };

        let shape_value = value_after(text, "shape")?;
        let inner = shape_value
            .strip_prefix('(')
            .and_then(|rest| rest.split_once(')'))
            .map(|(inner, _)| inner)
            .ok_or_else(|| RoomSdfIoError::format("shape is not a tuple"))?;
        let shape = inner
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.trim_end_matches('L')
                    .parse::<usize>()
                    .map_err(|_| RoomSdfIoError::format(format!("bad shape entry '{}'", s)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            dtype,
            fortran_order,
            shape,
        })
    }

    /// Read and parse the preamble, leaving the reader at the start of the data.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut preamble = [0u8; 8];
        reader.read_exact(&mut preamble)?;
        if preamble[0..6] != NPY_MAGIC {
            return Err(RoomSdfIoError::format("invalid magic bytes (expected \\x93NUMPY)"));
        }

        let header_len = match preamble[6] {
            1 => {
                let mut len = [0u8; 2];
                reader.read_exact(&mut len)?;
                u16::from_le_bytes(len) as usize
            }
            2 | 3 => {
                let mut len = [0u8; 4];
                reader.read_exact(&mut len)?;
                u32::from_le_bytes(len) as usize
            }
            major => {
                return Err(RoomSdfIoError::format(format!(
                    "unsupported format version {}.{}",
                    major, preamble[7]
                )))
            }
        };

        let mut header = vec![0u8; header_len];
        reader.read_exact(&mut header)?;
        let text = std::str::from_utf8(&header)
            .map_err(|_| RoomSdfIoError::format("header is not valid text"))?;
        Self::parse(text)
    }
}

/// Slice of `text` following `'key':`, with leading whitespace removed.
fn value_after<'a>(text: &'a str, key: &str) -> Result<&'a str> {
    for quote in ['\'', '"'] {
        let needle = format!("{quote}{key}{quote}");
        if let Some(pos) = text.find(&needle) {
            let rest = text[pos + needle.len()..].trim_start();
            if let Some(rest) = rest.strip_prefix(':') {
                return Ok(rest.trim_start());
            }
        }
    }
    Err(RoomSdfIoError::format(format!("header has no '{}' entry", key)))
}

/// Contents of a leading quoted string.
fn quoted(text: &str) -> Option<&str> {
    let quote = text.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let rest = &text[1..];
    rest.find(quote).map(|end| &rest[..end])
}
