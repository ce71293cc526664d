//! `.npy` array read/write for 3D grids.
//!
//! Arrays are read from any supported numeric dtype and converted to the
//! requested element type (`as`-cast semantics). Arrays are always written
//! little endian, C order, in the element type's native dtype.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use roomsdf_core::DenseGrid;

use super::header::{ByteOrder, Dtype, NpyHeader, ScalarKind};
use crate::error::{Result, RoomSdfIoError};

/// A decoded element before conversion to the target type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    /// Boolean element.
    Bool(bool),
    /// Signed integer element.
    Int(i64),
    /// Unsigned integer element.
    UInt(u64),
    /// Floating point element.
    Float(f64),
}

/// Element types that can be stored in a `.npy` grid.
pub trait NpyElement: Copy {
    /// Dtype used when writing.
    const DTYPE: Dtype;

    /// Convert a decoded element.
    fn from_scalar(value: Scalar) -> Self;

    /// Decode from raw bytes of exactly this type. `bytes.len()` must equal `DTYPE.size`.
    fn from_bytes(bytes: &[u8], order: ByteOrder) -> Self;

    /// Append the little-endian bytes of this value.
    fn extend_le(self, out: &mut Vec<u8>);
}

macro_rules! impl_npy_element {
    ($ty:ty, $kind:expr) => {
        impl NpyElement for $ty {
            const DTYPE: Dtype =
                Dtype::new($kind, std::mem::size_of::<$ty>(), ByteOrder::Little);

            #[inline]
            fn from_scalar(value: Scalar) -> Self {
                match value {
                    Scalar::Bool(b) => b as u8 as $ty,
                    Scalar::Int(v) => v as $ty,
                    Scalar::UInt(v) => v as $ty,
                    Scalar::Float(v) => v as $ty,
                }
            }

            #[inline]
            fn from_bytes(bytes: &[u8], order: ByteOrder) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$ty>()];
                buf.copy_from_slice(bytes);
                match order {
                    ByteOrder::Little => <$ty>::from_le_bytes(buf),
                    ByteOrder::Big => <$ty>::from_be_bytes(buf),
                }
            }

            #[inline]
            fn extend_le(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }
        }
    };
}

impl_npy_element!(f32, ScalarKind::Float);
impl_npy_element!(f64, ScalarKind::Float);
impl_npy_element!(i32, ScalarKind::Int);
impl_npy_element!(i64, ScalarKind::Int);
impl_npy_element!(u8, ScalarKind::UInt);

/// Decode one element. `bytes.len()` must equal `dtype.size`.
fn decode_scalar(bytes: &[u8], dtype: Dtype) -> Scalar {
    macro_rules! read {
        ($ty:ty) => {{
            let mut buf = [0u8; std::mem::size_of::<$ty>()];
            buf.copy_from_slice(bytes);
            match dtype.order {
                ByteOrder::Little => <$ty>::from_le_bytes(buf),
                ByteOrder::Big => <$ty>::from_be_bytes(buf),
            }
        }};
    }

    match (dtype.kind, dtype.size) {
        (ScalarKind::Bool, _) => Scalar::Bool(bytes[0] != 0),
        (ScalarKind::Int, 1) => Scalar::Int(read!(i8) as i64),
        (ScalarKind::Int, 2) => Scalar::Int(read!(i16) as i64),
        (ScalarKind::Int, 4) => Scalar::Int(read!(i32) as i64),
        (ScalarKind::Int, _) => Scalar::Int(read!(i64)),
        (ScalarKind::UInt, 1) => Scalar::UInt(bytes[0] as u64),
        (ScalarKind::UInt, 2) => Scalar::UInt(read!(u16) as u64),
        (ScalarKind::UInt, 4) => Scalar::UInt(read!(u32) as u64),
        (ScalarKind::UInt, _) => Scalar::UInt(read!(u64)),
        (ScalarKind::Float, 4) => Scalar::Float(read!(f32) as f64),
        (ScalarKind::Float, _) => Scalar::Float(read!(f64)),
    }
}

/// Read a 3D array from a reader in `.npy` format.
///
/// # Errors
/// Returns `NotThreeDimensional` for arrays of other rank, `UnsupportedDtype`
/// for non-numeric element types and `InvalidFormat` for bad or truncated files.
pub fn read_array<T: NpyElement, R: Read>(reader: &mut R) -> Result<DenseGrid<T>> {
    let header = NpyHeader::read_from(reader)?;
    let shape: [usize; 3] = header
        .shape
        .as_slice()
        .try_into()
        .map_err(|_| RoomSdfIoError::NotThreeDimensional {
            shape: header.shape.clone(),
        })?;

    let count = header
        .element_count()
        .ok_or_else(|| RoomSdfIoError::format("shape overflows usize"))?;
    let byte_len = count
        .checked_mul(header.dtype.size)
        .ok_or_else(|| RoomSdfIoError::format("shape overflows usize"))?;

    // Sized by the data present, not by the shape the header claims.
    let mut bytes = Vec::new();
    reader
        .by_ref()
        .take(byte_len as u64)
        .read_to_end(&mut bytes)?;
    if bytes.len() != byte_len {
        return Err(RoomSdfIoError::format(format!(
            "array data is truncated (expected {} bytes, found {})",
            byte_len,
            bytes.len()
        )));
    }

    // Matching types skip the widening conversion so values stay bit-identical.
    let dtype = header.dtype;
    let exact = dtype.kind == T::DTYPE.kind && dtype.size == T::DTYPE.size;
    let values: Vec<T> = bytes
        .chunks_exact(dtype.size)
        .map(|b| {
            if exact {
                T::from_bytes(b, dtype.order)
            } else {
                T::from_scalar(decode_scalar(b, dtype))
            }
        })
        .collect();

    if header.fortran_order {
        let [sx, sy, _] = shape;
        return Ok(DenseGrid::from_fn(shape, |[x, y, z]| {
            values[x + sx * (y + sy * z)]
        }));
    }

    Ok(DenseGrid::from_vec(shape, values)?)
}

/// Write a 3D grid to a writer in `.npy` format.
pub fn write_array<T: NpyElement, W: Write>(grid: &DenseGrid<T>, writer: &mut W) -> Result<()> {
    let header = NpyHeader::new(T::DTYPE, grid.shape().to_vec());
    writer.write_all(&header.to_bytes())?;

    let mut bytes = Vec::with_capacity(grid.len() * T::DTYPE.size);
    for &value in grid.as_slice() {
        value.extend_le(&mut bytes);
    }
    writer.write_all(&bytes)?;
    Ok(())
}

/// Load a 3D array from a `.npy` file.
pub fn load_from_file<T: NpyElement, P: AsRef<Path>>(path: P) -> Result<DenseGrid<T>> {
    let mut reader = BufReader::new(File::open(path)?);
    read_array(&mut reader)
}

/// Save a 3D grid to a `.npy` file, replacing any existing file.
pub fn save_to_file<T: NpyElement, P: AsRef<Path>>(grid: &DenseGrid<T>, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_array(grid, &mut writer)?;
    writer.flush()?;
    Ok(())
}
