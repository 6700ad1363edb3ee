//! Element type tags shared by both sides of the boundary.
//!
//! `DType` is the runtime tag carried by an
//! [`ArrayDescriptor`](crate::descriptor::ArrayDescriptor);
//! [`Element`] ties each Rust scalar type to its tag at compile time.

mod complex;
mod element;

pub use complex::{Complex64, Complex128};
pub use element::Element;

use std::fmt;

/// Element type of an array.
///
/// Discriminants are stable; the C API passes them through as integer codes.
/// - Floats: 0-9
/// - Signed ints: 10-19
/// - Unsigned ints: 20-29
/// - Complex: 40-49
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DType {
    /// 64-bit floating point
    F64 = 0,
    /// 32-bit floating point
    F32 = 1,

    /// 64-bit signed integer
    I64 = 10,
    /// 32-bit signed integer
    I32 = 11,
    /// 16-bit signed integer
    I16 = 12,
    /// 8-bit signed integer
    I8 = 13,

    /// 64-bit unsigned integer
    U64 = 20,
    /// 32-bit unsigned integer
    U32 = 21,
    /// 16-bit unsigned integer
    U16 = 22,
    /// 8-bit unsigned integer
    U8 = 23,

    /// Complex number made of two f32
    Complex64 = 40,
    /// Complex number made of two f64
    Complex128 = 41,
}

impl DType {
    /// Size of one element in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::Complex128 => 16,
            Self::F64 | Self::I64 | Self::U64 | Self::Complex64 => 8,
            Self::F32 | Self::I32 | Self::U32 => 4,
            Self::I16 | Self::U16 => 2,
            Self::I8 | Self::U8 => 1,
        }
    }

    /// Required alignment of one element in bytes.
    #[inline]
    pub const fn alignment(self) -> usize {
        match self {
            Self::Complex128 => 8,
            Self::Complex64 => 4,
            other => other.size_in_bytes(),
        }
    }

    /// Stable integer code.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a dtype from its integer code.
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::F64,
            1 => Self::F32,
            10 => Self::I64,
            11 => Self::I32,
            12 => Self::I16,
            13 => Self::I8,
            20 => Self::U64,
            21 => Self::U32,
            22 => Self::U16,
            23 => Self::U8,
            40 => Self::Complex64,
            41 => Self::Complex128,
            _ => return None,
        })
    }

    /// Returns true if this is a complex number type.
    #[inline]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex64 | Self::Complex128)
    }

    /// Name used in array signatures (NumPy spelling).
    pub const fn name(self) -> &'static str {
        match self {
            Self::F64 => "float64",
            Self::F32 => "float32",
            Self::I64 => "int64",
            Self::I32 => "int32",
            Self::I16 => "int16",
            Self::I8 => "int8",
            Self::U64 => "uint64",
            Self::U32 => "uint32",
            Self::U16 => "uint16",
            Self::U8 => "uint8",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
