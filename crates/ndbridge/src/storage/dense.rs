//! Dense storage for tensor data.

use crate::dtype::Element;

/// Dense storage - contiguous owned array of elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense<ElT: Element> {
    data: Vec<ElT>,
}

impl<ElT: Element> Dense<ElT> {
    /// Create dense storage with given length, zero-initialized.
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![ElT::default(); len],
        }
    }

    /// Create dense storage from existing vector (takes ownership).
    pub fn from_vec(data: Vec<ElT>) -> Self {
        Self { data }
    }

    /// Change the length, zero-filling new elements.
    ///
    /// Existing elements are kept but their meaning under a new shape is
    /// unspecified; callers overwrite the whole buffer afterwards.
    pub fn resize(&mut self, len: usize) {
        self.data.resize(len, ElT::default());
    }

    /// Length of storage.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if storage is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get immutable slice of data.
    #[inline]
    pub fn as_slice(&self) -> &[ElT] {
        &self.data
    }

    /// Get mutable slice of data.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [ElT] {
        &mut self.data
    }

    /// Get raw pointer (for FFI).
    #[inline]
    pub fn as_ptr(&self) -> *const ElT {
        self.data.as_ptr()
    }

    /// Consume the storage and return the underlying vector.
    #[inline]
    pub fn into_vec(self) -> Vec<ElT> {
        self.data
    }
}

impl<ElT: Element> std::ops::Index<usize> for Dense<ElT> {
    type Output = ElT;

    #[inline]
    fn index(&self, i: usize) -> &ElT {
        &self.data[i]
    }
}

impl<ElT: Element> std::ops::IndexMut<usize> for Dense<ElT> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut ElT {
        &mut self.data[i]
    }
}
