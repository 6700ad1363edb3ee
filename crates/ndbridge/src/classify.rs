//! Compile-time classification of native tensor types.
//!
//! Every native tensor type names its [`TensorKind`], element type and static
//! layout. From those three facts [`ArraySpec`] derives the signature a
//! foreign array must satisfy:
//!
//! ```text
//! TensorKind      shape constraint          Layout        contiguity
//! FixedShape  ──▶ Exact(dims)               RowMajor  ──▶ C
//! RankFixed   ──▶ Rank(n)                   ColumnMajor ▶ F
//! Dynamic     ──▶ Any                       Dynamic   ──▶ Any
//! ```

use crate::descriptor::ArrayDescriptor;
use crate::dtype::{DType, Element};
use crate::error::{CastError, TensorError};
use crate::layout::{Contiguity, Order, StaticLayout};
use crate::shape::ShapeConstraint;
use std::fmt;

/// How much of a tensor's shape is known at compile time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TensorKind {
    /// Every extent is static.
    FixedShape,
    /// Rank is static, extents are not.
    RankFixed,
    /// Neither rank nor extents are static.
    Dynamic,
}

/// A native tensor type that can cross the boundary.
///
/// Implementors own their storage by value. The converter only needs
/// construction, resizing and read/write access to a contiguous buffer.
pub trait NativeTensor: Sized {
    /// Scalar type.
    type Elem: Element;

    /// Static layout marker.
    type Layout: StaticLayout;

    /// Shape knowledge of this type.
    const KIND: TensorKind;

    /// Constraint imposed on a foreign array's shape.
    fn shape_constraint() -> ShapeConstraint;

    /// Default-constructed value.
    fn empty() -> Self;

    /// Resize to `shape`.
    ///
    /// Tensors with a dynamic layout adopt `preferred` as their memory order;
    /// the others ignore it. Fixed-shape tensors only verify the extents.
    fn resize(&mut self, shape: &[usize], preferred: Order) -> Result<(), TensorError>;

    fn shape(&self) -> &[usize];

    /// Strides in elements; empty for rank 0.
    fn strides(&self) -> &[usize];

    /// Memory order of the buffer.
    fn order(&self) -> Order;

    fn data(&self) -> &[Self::Elem];

    fn data_mut(&mut self) -> &mut [Self::Elem];

    fn ndim(&self) -> usize {
        self.shape().len()
    }
}

/// Whether the foreign side may write through the array.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Access {
    ReadOnly,
    Writable,
}

/// Signature a foreign array must satisfy to match a native tensor type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ArraySpec {
    pub dtype: DType,
    pub shape: ShapeConstraint,
    pub contiguity: Contiguity,
    pub access: Access,
}

impl ArraySpec {
    fn derive<T: NativeTensor>(access: Access) -> Self {
        Self {
            dtype: <T::Elem as Element>::DTYPE,
            shape: T::shape_constraint(),
            contiguity: <T::Layout as StaticLayout>::LAYOUT.contiguity(),
            access,
        }
    }

    /// Read-only signature used when importing into `T`.
    pub fn for_import<T: NativeTensor>() -> Self {
        Self::derive::<T>(Access::ReadOnly)
    }

    /// Writable signature used when exporting from `T`.
    pub fn for_export<T: NativeTensor>() -> Self {
        Self::derive::<T>(Access::Writable)
    }

    /// Check every part of the signature against `array`.
    pub fn check(&self, array: &ArrayDescriptor) -> Result<(), CastError> {
        if array.dtype() != self.dtype {
            return Err(CastError::DTypeMismatch {
                expected: self.dtype,
                actual: array.dtype(),
            });
        }
        self.shape.check(array.shape())?;
        if !array.satisfies(self.contiguity) {
            return Err(CastError::NotContiguous {
                required: self.contiguity,
            });
        }
        if self.access == Access::Writable && array.is_readonly() {
            return Err(CastError::ReadOnly);
        }
        Ok(())
    }
}

impl fmt::Display for ArraySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ndarray[dtype={}", self.dtype)?;
        if self.shape != ShapeConstraint::Any {
            write!(f, ", shape={}", self.shape)?;
        }
        if self.contiguity != Contiguity::Any {
            write!(f, ", order='{}'", self.contiguity)?;
        }
        if self.access == Access::ReadOnly {
            f.write_str(", writable=False")?;
        }
        f.write_str("]")
    }
}

/// Type name shown for `T` at the boundary.
pub fn signature<T: NativeTensor>() -> String {
    ArraySpec::for_export::<T>().to_string()
}
