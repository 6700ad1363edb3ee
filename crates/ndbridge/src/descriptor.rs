//! Foreign array descriptor.
//!
//! An [`ArrayDescriptor`] is the host runtime's view of an array: a data
//! pointer, element type, extents, optional strides and an optional owner.
//! It never owns the memory directly; whatever keeps the memory alive is the
//! [`Owner`]. Without an owner the pointer is only borrowed.

use crate::dtype::{DType, Element};
use crate::error::{CastError, TensorError};
use crate::layout::{Contiguity, Order};
use crate::owner::Owner;
use crate::shape::Dims;
use crate::strides::{Offsets, compute_strides, is_contiguous};
use smallvec::SmallVec;
use std::ptr;

/// Signed strides in elements.
pub type Strides = SmallVec<[isize; 4]>;

/// Host-side description of a multidimensional array.
#[derive(Debug, Clone)]
pub struct ArrayDescriptor {
    data: *mut u8,
    dtype: DType,
    shape: Dims,
    strides: Option<Strides>,
    owner: Option<Owner>,
    readonly: bool,
}

// SAFETY: the descriptor is a view; the memory it points at is kept alive by
// `owner` (or by the caller of `from_raw_parts`) and every payload the crate
// puts behind an owner is `Send + Sync`.
unsafe impl Send for ArrayDescriptor {}
unsafe impl Sync for ArrayDescriptor {}

/// 16-byte aligned chunk so that copies are aligned for every dtype.
#[repr(C, align(16))]
#[derive(Copy, Clone)]
struct Chunk([u8; 16]);

impl ArrayDescriptor {
    /// Describe existing memory.
    ///
    /// `strides` of `None` means C-contiguous. For rank 0 the strides are
    /// ignored and never read.
    ///
    /// # Safety
    ///
    /// Every element reachable through `shape` and `strides` from `data` must
    /// be a valid, initialized `dtype` value for as long as the descriptor or
    /// any clone of it is alive. If `owner` is `Some`, it must keep the memory
    /// alive; otherwise the caller does. `data` may only be null when the
    /// array has no elements.
    pub unsafe fn from_raw_parts(
        data: *mut u8,
        dtype: DType,
        shape: &[usize],
        strides: Option<&[isize]>,
        owner: Option<Owner>,
    ) -> Self {
        let strides = match strides {
            Some(s) if !shape.is_empty() => {
                debug_assert_eq!(s.len(), shape.len());
                Some(Strides::from_slice(s))
            }
            _ => None,
        };
        Self {
            data,
            dtype,
            shape: Dims::from_slice(shape),
            strides,
            owner,
            readonly: false,
        }
    }

    /// A C-contiguous array that owns `data`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ShapeMismatch` if data length doesn't match shape.
    pub fn from_vec<T: Element>(data: Vec<T>, shape: &[usize]) -> Result<Self, TensorError> {
        crate::tensor::check_len(shape, data.len())?;
        let mut boxed = Box::new(data);
        let ptr = boxed.as_mut_ptr() as *mut u8;
        let owner = Owner::capsule(boxed);
        // SAFETY: the capsule owns the vector, and moving the box does not move
        // the vector's heap buffer.
        Ok(unsafe { Self::from_raw_parts(ptr, T::DTYPE, shape, None, Some(owner)) })
    }

    /// Replace the owner.
    pub fn with_owner(mut self, owner: Option<Owner>) -> Self {
        self.owner = owner;
        self
    }

    /// Mark the array read-only (or writable).
    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    #[inline]
    pub fn data_ptr(&self) -> *const u8 {
        self.data
    }

    /// Mutable data pointer. Writing through it requires the array to be
    /// writable and not aliased by a reader.
    #[inline]
    pub fn data_mut_ptr(&self) -> *mut u8 {
        self.data
    }

    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }

    #[inline]
    pub fn itemsize(&self) -> usize {
        self.dtype.size_in_bytes()
    }

    #[inline]
    pub fn nbytes(&self) -> usize {
        self.size() * self.itemsize()
    }

    /// Strides as given by the producer; `None` for implied C order and for rank 0.
    #[inline]
    pub fn explicit_strides(&self) -> Option<&[isize]> {
        self.strides.as_deref()
    }

    /// Strides in elements, deriving C-contiguous ones when none were given.
    pub fn strides(&self) -> Strides {
        match &self.strides {
            Some(s) => s.clone(),
            None => compute_strides(&self.shape, Order::RowMajor)
                .into_iter()
                .map(|s| s as isize)
                .collect(),
        }
    }

    #[inline]
    pub fn owner(&self) -> Option<&Owner> {
        self.owner.as_ref()
    }

    #[inline]
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Whether the elements are contiguous in `order`.
    pub fn is_contiguous(&self, order: Order) -> bool {
        match (&self.strides, order) {
            (None, Order::RowMajor) => true,
            _ => is_contiguous(&self.shape, &self.strides(), order),
        }
    }

    /// The order this array is contiguous in, C preferred.
    pub fn contiguous_order(&self) -> Option<Order> {
        [Order::RowMajor, Order::ColumnMajor]
            .into_iter()
            .find(|&order| self.is_contiguous(order))
    }

    /// Whether the array belongs to the contiguity class.
    pub fn satisfies(&self, contiguity: Contiguity) -> bool {
        match contiguity.order() {
            Some(order) => self.is_contiguous(order),
            None => true,
        }
    }

    /// Raw bytes of a contiguous array.
    pub fn contiguous_bytes(&self) -> Option<&[u8]> {
        self.contiguous_order()?;
        if self.size() == 0 {
            return Some(&[][..]);
        }
        // SAFETY: the array is contiguous, so its elements occupy exactly
        // `nbytes` bytes from `data`, valid per the constructor's contract.
        Some(unsafe { std::slice::from_raw_parts(self.data, self.nbytes()) })
    }

    /// Copy every element into `dst`, which is filled in logical `order`.
    ///
    /// Contiguous sources in the same order are copied in one block; anything
    /// else is gathered element by element.
    pub fn copy_into<T: Element>(&self, dst: &mut [T], order: Order) -> Result<(), CastError> {
        if T::DTYPE != self.dtype {
            return Err(CastError::DTypeMismatch {
                expected: T::DTYPE,
                actual: self.dtype,
            });
        }
        if dst.len() != self.size() {
            return Err(TensorError::ShapeMismatch {
                expected: self.size(),
                actual: dst.len(),
            }
            .into());
        }
        if dst.is_empty() {
            return Ok(());
        }

        if self.is_contiguous(order) {
            // SAFETY: both ranges hold `nbytes` bytes and cannot overlap since
            // `dst` is an exclusive borrow.
            unsafe {
                ptr::copy_nonoverlapping(self.data, dst.as_mut_ptr() as *mut u8, self.nbytes());
            }
            return Ok(());
        }

        let strides = self.strides();
        let base = self.data as *const T;
        for (slot, offset) in dst.iter_mut().zip(Offsets::new(&self.shape, &strides, order)) {
            // SAFETY: `offset` addresses an element of the array.
            *slot = unsafe { ptr::read_unaligned(base.offset(offset)) };
        }
        Ok(())
    }

    /// Copy the elements into a new vector in logical `order`.
    pub fn to_vec<T: Element>(&self, order: Order) -> Result<Vec<T>, CastError> {
        let mut out = vec![T::default(); self.size()];
        self.copy_into(&mut out, order)?;
        Ok(out)
    }

    /// Deep copy into a fresh, writable buffer contiguous in `order`.
    ///
    /// The copy owns its memory through a new owner.
    pub fn to_contiguous(&self, order: Order) -> ArrayDescriptor {
        let itemsize = self.itemsize();
        let nbytes = self.nbytes();
        let mut buffer = Box::new(vec![Chunk([0; 16]); nbytes.div_ceil(16)]);
        let dst = buffer.as_mut_ptr() as *mut u8;

        if nbytes > 0 {
            if self.is_contiguous(order) {
                // SAFETY: `buffer` holds at least `nbytes` bytes.
                unsafe { ptr::copy_nonoverlapping(self.data, dst, nbytes) };
            } else {
                let strides = self.strides();
                for (i, offset) in Offsets::new(&self.shape, &strides, order).enumerate() {
                    // SAFETY: `offset` addresses an element of the source and
                    // `i < size`, so the destination slot is in bounds.
                    unsafe {
                        let src = self.data.offset(offset * itemsize as isize);
                        ptr::copy_nonoverlapping(src, dst.add(i * itemsize), itemsize);
                    }
                }
            }
        }

        let strides: Strides = compute_strides(&self.shape, order)
            .into_iter()
            .map(|s| s as isize)
            .collect();
        let owner = Owner::capsule(buffer);
        // SAFETY: the capsule owns the buffer and moving the box does not move
        // the vector's heap allocation.
        unsafe {
            Self::from_raw_parts(
                dst,
                self.dtype,
                &self.shape,
                Some(strides.as_slice()),
                Some(owner),
            )
        }
    }
}
