//! C API for ndbridge
//!
//! This crate exposes the array bridge to C callers. Foreign arrays come in
//! as borrowed [`ndb_array_view`]s and are imported into `ndb_tensor_f64`
//! handles; tensors go out as `ndb_array` handles whose lifetime follows the
//! requested return policy.
//!
//! All extern "C" functions are inherently unsafe as they work with raw pointers
//! from foreign code. The `#[unsafe(no_mangle)]` attribute marks the entire
//! function signature as unsafe at the FFI boundary.

#![allow(clippy::not_unsafe_ptr_arg_deref)]
#![allow(non_camel_case_types)]

use libc::{c_double, c_int, c_void, size_t, ssize_t};
use ndbridge::host::{BindingContext, CastFlags, HostArray, HostValue, LocalHost};
use ndbridge::{
    ArrayDescriptor, CastError, DType, DynTensor, ReturnPolicy, export, export_mut, import,
};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::ptr;

// Status codes
pub type StatusCode = c_int;

pub const NDB_SUCCESS: StatusCode = 0;
pub const NDB_INVALID_ARGUMENT: StatusCode = -1;
pub const NDB_SHAPE_MISMATCH: StatusCode = -2;
pub const NDB_DTYPE_MISMATCH: StatusCode = -3;
pub const NDB_RANK_MISMATCH: StatusCode = -4;
pub const NDB_NOT_CONTIGUOUS: StatusCode = -5;
pub const NDB_READ_ONLY: StatusCode = -6;
pub const NDB_INTERNAL_ERROR: StatusCode = -7;

// Return policies
pub type PolicyCode = c_int;

pub const NDB_POLICY_AUTOMATIC: PolicyCode = 0;
pub const NDB_POLICY_AUTOMATIC_REFERENCE: PolicyCode = 1;
pub const NDB_POLICY_TAKE: PolicyCode = 2;
pub const NDB_POLICY_COPY: PolicyCode = 3;
pub const NDB_POLICY_MOVE: PolicyCode = 4;
pub const NDB_POLICY_REFERENCE: PolicyCode = 5;
pub const NDB_POLICY_REFERENCE_INTERNAL: PolicyCode = 6;
pub const NDB_POLICY_NONE: PolicyCode = 7;

fn policy_from_code(code: PolicyCode) -> Option<ReturnPolicy> {
    Some(match code {
        NDB_POLICY_AUTOMATIC => ReturnPolicy::Automatic,
        NDB_POLICY_AUTOMATIC_REFERENCE => ReturnPolicy::AutomaticReference,
        NDB_POLICY_TAKE => ReturnPolicy::Take,
        NDB_POLICY_COPY => ReturnPolicy::Copy,
        NDB_POLICY_MOVE => ReturnPolicy::Move,
        NDB_POLICY_REFERENCE => ReturnPolicy::Reference,
        NDB_POLICY_REFERENCE_INTERNAL => ReturnPolicy::ReferenceInternal,
        NDB_POLICY_NONE => ReturnPolicy::None,
        _ => return None,
    })
}

fn status_of(err: &CastError) -> StatusCode {
    match err {
        CastError::NotAnArray => NDB_INVALID_ARGUMENT,
        CastError::DTypeMismatch { .. } => NDB_DTYPE_MISMATCH,
        CastError::RankMismatch { .. } => NDB_RANK_MISMATCH,
        CastError::ShapeMismatch { .. } | CastError::Tensor(_) => NDB_SHAPE_MISMATCH,
        CastError::NotContiguous { .. } => NDB_NOT_CONTIGUOUS,
        CastError::ReadOnly => NDB_READ_ONLY,
    }
}

/// Borrowed description of a foreign array.
///
/// `strides` are in elements and may be null for a C-contiguous array.
/// `dtype` is a `DType` code.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct ndb_array_view {
    pub data: *mut c_void,
    pub dtype: u8,
    pub ndim: size_t,
    pub shape: *const size_t,
    pub strides: *const ssize_t,
}

impl Default for ndb_array_view {
    fn default() -> Self {
        Self {
            data: ptr::null_mut(),
            dtype: 0,
            ndim: 0,
            shape: ptr::null(),
            strides: ptr::null(),
        }
    }
}

/// Opaque tensor type for f64 (row-major, any rank)
#[repr(C)]
pub struct ndb_tensor_f64 {
    _private: *mut c_void,
}

impl ndb_tensor_f64 {
    fn from_tensor(tensor: DynTensor<f64>) -> Self {
        let boxed = Box::new(tensor);
        Self {
            _private: Box::into_raw(boxed) as *mut c_void,
        }
    }

    fn inner(&self) -> &DynTensor<f64> {
        unsafe { &*(self._private as *const DynTensor<f64>) }
    }

    fn inner_mut(&mut self) -> &mut DynTensor<f64> {
        unsafe { &mut *(self._private as *mut DynTensor<f64>) }
    }

    fn into_tensor(mut self) -> DynTensor<f64> {
        let inner = std::mem::replace(&mut self._private, ptr::null_mut());
        unsafe { *Box::from_raw(inner as *mut DynTensor<f64>) }
    }
}

impl Drop for ndb_tensor_f64 {
    fn drop(&mut self) {
        if !self._private.is_null() {
            unsafe {
                let _ = Box::from_raw(self._private as *mut DynTensor<f64>);
            }
        }
    }
}

/// Opaque exported array
#[repr(C)]
pub struct ndb_array {
    _private: *mut c_void,
}

impl ndb_array {
    fn from_host(array: HostArray) -> Self {
        Self {
            _private: Box::into_raw(Box::new(array)) as *mut c_void,
        }
    }

    fn inner(&self) -> &ArrayDescriptor {
        unsafe { (*(self._private as *const HostArray)).descriptor() }
    }
}

impl Drop for ndb_array {
    fn drop(&mut self) {
        if !self._private.is_null() {
            unsafe {
                let _ = Box::from_raw(self._private as *mut HostArray);
            }
        }
    }
}

fn write_status(status: *mut StatusCode, code: StatusCode) {
    unsafe {
        *status = code;
    }
}

// ============================================================================
// Tensor creation functions
// ============================================================================

/// Create a new tensor filled with zeros.
///
/// # Arguments
/// * `shape` - Pointer to array of dimensions
/// * `ndim` - Number of dimensions
/// * `status` - Pointer to receive status code
///
/// # Returns
/// Pointer to new tensor, or null on error
#[unsafe(no_mangle)]
pub extern "C" fn ndb_tensor_f64_zeros(
    shape: *const size_t,
    ndim: size_t,
    status: *mut StatusCode,
) -> *mut ndb_tensor_f64 {
    if status.is_null() {
        return ptr::null_mut();
    }

    if shape.is_null() && ndim > 0 {
        write_status(status, NDB_INVALID_ARGUMENT);
        return ptr::null_mut();
    }

    let result = catch_unwind(|| {
        let shape_slice: &[usize] = if ndim == 0 {
            &[]
        } else {
            unsafe { std::slice::from_raw_parts(shape, ndim) }
        };

        let tensor = DynTensor::<f64>::zeros(shape_slice);
        Box::into_raw(Box::new(ndb_tensor_f64::from_tensor(tensor)))
    });

    match result {
        Ok(ptr) => {
            write_status(status, NDB_SUCCESS);
            ptr
        }
        Err(_) => {
            write_status(status, NDB_INTERNAL_ERROR);
            ptr::null_mut()
        }
    }
}

/// Create a new tensor from data.
///
/// # Arguments
/// * `data` - Pointer to data array (row-major order)
/// * `len` - Length of data array
/// * `shape` - Pointer to array of dimensions
/// * `ndim` - Number of dimensions
/// * `status` - Pointer to receive status code
///
/// # Returns
/// Pointer to new tensor, or null on error
#[unsafe(no_mangle)]
pub extern "C" fn ndb_tensor_f64_from_data(
    data: *const c_double,
    len: size_t,
    shape: *const size_t,
    ndim: size_t,
    status: *mut StatusCode,
) -> *mut ndb_tensor_f64 {
    if status.is_null() {
        return ptr::null_mut();
    }

    if data.is_null() || (shape.is_null() && ndim > 0) {
        write_status(status, NDB_INVALID_ARGUMENT);
        return ptr::null_mut();
    }

    let result = catch_unwind(|| {
        let data_slice = unsafe { std::slice::from_raw_parts(data, len) };
        let shape_slice: &[usize] = if ndim == 0 {
            &[]
        } else {
            unsafe { std::slice::from_raw_parts(shape, ndim) }
        };

        match DynTensor::<f64>::from_vec(data_slice.to_vec(), shape_slice) {
            Ok(tensor) => {
                let ptr = Box::into_raw(Box::new(ndb_tensor_f64::from_tensor(tensor)));
                (ptr, NDB_SUCCESS)
            }
            Err(_) => (ptr::null_mut(), NDB_SHAPE_MISMATCH),
        }
    });

    match result {
        Ok((ptr, code)) => {
            write_status(status, code);
            ptr
        }
        Err(_) => {
            write_status(status, NDB_INTERNAL_ERROR);
            ptr::null_mut()
        }
    }
}

/// Release (free) a tensor.
#[unsafe(no_mangle)]
pub extern "C" fn ndb_tensor_f64_release(tensor: *mut ndb_tensor_f64) {
    if !tensor.is_null() {
        unsafe {
            let _ = Box::from_raw(tensor);
        }
    }
}

// ============================================================================
// Tensor query functions
// ============================================================================

/// Get the number of dimensions.
#[unsafe(no_mangle)]
pub extern "C" fn ndb_tensor_f64_ndim(tensor: *const ndb_tensor_f64) -> size_t {
    if tensor.is_null() {
        return 0;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe { (*tensor).inner().ndim() }));

    result.unwrap_or(0)
}

/// Get the total number of elements.
#[unsafe(no_mangle)]
pub extern "C" fn ndb_tensor_f64_len(tensor: *const ndb_tensor_f64) -> size_t {
    if tensor.is_null() {
        return 0;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe { (*tensor).inner().len() }));

    result.unwrap_or(0)
}

/// Get the shape (dimensions).
///
/// # Arguments
/// * `tensor` - Tensor pointer
/// * `out` - Output array for shape (must have space for ndim elements)
///
/// # Returns
/// Status code
#[unsafe(no_mangle)]
pub extern "C" fn ndb_tensor_f64_shape(
    tensor: *const ndb_tensor_f64,
    out: *mut size_t,
) -> StatusCode {
    if tensor.is_null() || out.is_null() {
        return NDB_INVALID_ARGUMENT;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        for (i, &dim) in (*tensor).inner().shape().iter().enumerate() {
            *out.add(i) = dim;
        }
        NDB_SUCCESS
    }));

    result.unwrap_or(NDB_INTERNAL_ERROR)
}

/// Get pointer to underlying data (read-only).
///
/// # Safety
/// The returned pointer is only valid while the tensor exists.
#[unsafe(no_mangle)]
pub extern "C" fn ndb_tensor_f64_data(tensor: *const ndb_tensor_f64) -> *const c_double {
    if tensor.is_null() {
        return ptr::null();
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        (*tensor).inner().data().as_ptr()
    }));

    result.unwrap_or(ptr::null())
}

// ============================================================================
// Conversion functions
// ============================================================================

/// Import a foreign array into a new tensor.
///
/// The view is only read during the call; the tensor owns a copy. Views that
/// are not C-contiguous are gathered.
///
/// # Arguments
/// * `view` - Borrowed array description
/// * `status` - Pointer to receive status code
///
/// # Returns
/// Pointer to new tensor, or null on error
#[unsafe(no_mangle)]
pub extern "C" fn ndb_tensor_f64_import(
    view: *const ndb_array_view,
    status: *mut StatusCode,
) -> *mut ndb_tensor_f64 {
    if status.is_null() {
        return ptr::null_mut();
    }

    if view.is_null() {
        write_status(status, NDB_INVALID_ARGUMENT);
        return ptr::null_mut();
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        let view = &*view;
        if view.shape.is_null() && view.ndim > 0 {
            return (ptr::null_mut(), NDB_INVALID_ARGUMENT);
        }
        let Some(dtype) = DType::from_code(view.dtype) else {
            return (ptr::null_mut(), NDB_INVALID_ARGUMENT);
        };

        let shape: &[usize] = if view.ndim == 0 {
            &[]
        } else {
            std::slice::from_raw_parts(view.shape, view.ndim)
        };
        if view.data.is_null() && shape.iter().product::<usize>() > 0 {
            return (ptr::null_mut(), NDB_INVALID_ARGUMENT);
        }
        let strides = (!view.strides.is_null() && view.ndim > 0)
            .then(|| std::slice::from_raw_parts(view.strides, view.ndim));

        // Borrowed for the duration of the call only.
        let data = view.data as *mut u8;
        let array = ArrayDescriptor::from_raw_parts(data, dtype, shape, strides, None)
            .with_readonly(true);
        let value: HostValue = HostArray::new(array).into();

        match import::<DynTensor<f64>, _>(&LocalHost, &value, CastFlags::convert()) {
            Ok(tensor) => (
                Box::into_raw(Box::new(ndb_tensor_f64::from_tensor(tensor))),
                NDB_SUCCESS,
            ),
            Err(err) => (ptr::null_mut(), status_of(&err)),
        }
    }));

    match result {
        Ok((ptr, code)) => {
            write_status(status, code);
            ptr
        }
        Err(_) => {
            write_status(status, NDB_INTERNAL_ERROR);
            ptr::null_mut()
        }
    }
}

/// Export a tensor as an array.
///
/// Policies:
/// * `NDB_POLICY_AUTOMATIC`, `NDB_POLICY_MOVE`, `NDB_POLICY_TAKE` - the array
///   takes over the tensor's buffer. The tensor handle is consumed and must
///   not be used or released afterwards.
/// * `NDB_POLICY_COPY` - the array owns a copy; the handle stays valid.
/// * `NDB_POLICY_REFERENCE`, `NDB_POLICY_AUTOMATIC_REFERENCE`,
///   `NDB_POLICY_REFERENCE_INTERNAL` - a writable array aliasing the tensor.
///   The tensor must outlive the array and must only be accessed through it
///   meanwhile.
/// * `NDB_POLICY_NONE` - no array is created; returns null with success.
///
/// # Returns
/// Pointer to new array, or null
#[unsafe(no_mangle)]
pub extern "C" fn ndb_tensor_f64_export(
    tensor: *mut ndb_tensor_f64,
    policy: PolicyCode,
    status: *mut StatusCode,
) -> *mut ndb_array {
    if status.is_null() {
        return ptr::null_mut();
    }

    let Some(policy) = policy_from_code(policy) else {
        write_status(status, NDB_INVALID_ARGUMENT);
        return ptr::null_mut();
    };
    if tensor.is_null() {
        write_status(status, NDB_INVALID_ARGUMENT);
        return ptr::null_mut();
    }

    let result = catch_unwind(AssertUnwindSafe(|| {
        let ctx = BindingContext::new();
        let value = match policy.resolve() {
            ReturnPolicy::Move | ReturnPolicy::Take => {
                let handle = unsafe { Box::from_raw(tensor) };
                export(&LocalHost, (*handle).into_tensor(), policy, &ctx)
            }
            // SAFETY: aliasing lifetime is the caller's contract (see above).
            _ => unsafe { export_mut(&LocalHost, (*tensor).inner_mut(), policy, &ctx) },
        };
        match value {
            HostValue::Array(array) => Box::into_raw(Box::new(ndb_array::from_host(array))),
            _ => ptr::null_mut(),
        }
    }));

    match result {
        Ok(ptr) => {
            write_status(status, NDB_SUCCESS);
            ptr
        }
        Err(_) => {
            write_status(status, NDB_INTERNAL_ERROR);
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Array functions
// ============================================================================

/// Release (free) an array.
///
/// The memory behind the array is freed once nothing else keeps it alive.
#[unsafe(no_mangle)]
pub extern "C" fn ndb_array_release(array: *mut ndb_array) {
    if !array.is_null() {
        unsafe {
            let _ = Box::from_raw(array);
        }
    }
}

/// Get the number of dimensions.
#[unsafe(no_mangle)]
pub extern "C" fn ndb_array_ndim(array: *const ndb_array) -> size_t {
    if array.is_null() {
        return 0;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe { (*array).inner().ndim() }));

    result.unwrap_or(0)
}

/// Get the element type code.
#[unsafe(no_mangle)]
pub extern "C" fn ndb_array_dtype(array: *const ndb_array) -> u8 {
    if array.is_null() {
        return 0;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe { (*array).inner().dtype().code() }));

    result.unwrap_or(0)
}

/// Get the shape (dimensions).
#[unsafe(no_mangle)]
pub extern "C" fn ndb_array_shape(array: *const ndb_array, out: *mut size_t) -> StatusCode {
    if array.is_null() || out.is_null() {
        return NDB_INVALID_ARGUMENT;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        for (i, &dim) in (*array).inner().shape().iter().enumerate() {
            *out.add(i) = dim;
        }
        NDB_SUCCESS
    }));

    result.unwrap_or(NDB_INTERNAL_ERROR)
}

/// Get the strides in elements, derived when the array has none of its own.
#[unsafe(no_mangle)]
pub extern "C" fn ndb_array_strides(array: *const ndb_array, out: *mut ssize_t) -> StatusCode {
    if array.is_null() || out.is_null() {
        return NDB_INVALID_ARGUMENT;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        for (i, &stride) in (*array).inner().strides().iter().enumerate() {
            *out.add(i) = stride;
        }
        NDB_SUCCESS
    }));

    result.unwrap_or(NDB_INTERNAL_ERROR)
}

/// Get pointer to the array's data.
///
/// # Safety
/// The returned pointer is only valid while the array exists. Writing through
/// it requires `ndb_array_is_writable`.
#[unsafe(no_mangle)]
pub extern "C" fn ndb_array_data(array: *const ndb_array) -> *mut c_void {
    if array.is_null() {
        return ptr::null_mut();
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        (*array).inner().data_mut_ptr() as *mut c_void
    }));

    result.unwrap_or(ptr::null_mut())
}

/// Whether the array may be written through.
#[unsafe(no_mangle)]
pub extern "C" fn ndb_array_is_writable(array: *const ndb_array) -> c_int {
    if array.is_null() {
        return 0;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        c_int::from(!(*array).inner().is_readonly())
    }));

    result.unwrap_or(0)
}

/// Describe the array as a view.
///
/// `strides` is null when the array has no explicit strides. All pointers
/// stay valid while the array exists.
#[unsafe(no_mangle)]
pub extern "C" fn ndb_array_get_view(
    array: *const ndb_array,
    out: *mut ndb_array_view,
) -> StatusCode {
    if array.is_null() || out.is_null() {
        return NDB_INVALID_ARGUMENT;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        let inner = (*array).inner();
        *out = ndb_array_view {
            data: inner.data_mut_ptr() as *mut c_void,
            dtype: inner.dtype().code(),
            ndim: inner.ndim(),
            shape: inner.shape().as_ptr(),
            strides: inner.explicit_strides().map_or(ptr::null(), <[isize]>::as_ptr),
        };
        NDB_SUCCESS
    }));

    result.unwrap_or(NDB_INTERNAL_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_data(data: &[f64], shape: &[usize]) -> *mut ndb_tensor_f64 {
        let mut status: StatusCode = -999;
        let tensor = ndb_tensor_f64_from_data(
            data.as_ptr(),
            data.len(),
            shape.as_ptr(),
            shape.len(),
            &mut status,
        );
        assert_eq!(status, NDB_SUCCESS);
        tensor
    }

    fn array_values(array: *const ndb_array) -> Vec<f64> {
        let mut view = ndb_array_view::default();
        assert_eq!(ndb_array_get_view(array, &mut view), NDB_SUCCESS);
        let mut status: StatusCode = -999;
        let tensor = ndb_tensor_f64_import(&view, &mut status);
        assert_eq!(status, NDB_SUCCESS);
        let len = ndb_tensor_f64_len(tensor);
        let values =
            unsafe { std::slice::from_raw_parts(ndb_tensor_f64_data(tensor), len) }.to_vec();
        ndb_tensor_f64_release(tensor);
        values
    }

    #[test]
    fn test_tensor_zeros() {
        let shape = [2usize, 3usize];
        let mut status: StatusCode = -999;

        let tensor = ndb_tensor_f64_zeros(shape.as_ptr(), 2, &mut status);
        assert_eq!(status, NDB_SUCCESS);
        assert!(!tensor.is_null());

        assert_eq!(ndb_tensor_f64_ndim(tensor), 2);
        assert_eq!(ndb_tensor_f64_len(tensor), 6);

        let mut out_shape = [0usize; 2];
        assert_eq!(ndb_tensor_f64_shape(tensor, out_shape.as_mut_ptr()), NDB_SUCCESS);
        assert_eq!(out_shape, [2, 3]);

        ndb_tensor_f64_release(tensor);
    }

    #[test]
    fn test_tensor_from_data_shape_mismatch() {
        let data = [1.0, 2.0, 3.0f64];
        let shape = [2usize, 2usize];
        let mut status: StatusCode = -999;

        let tensor =
            ndb_tensor_f64_from_data(data.as_ptr(), data.len(), shape.as_ptr(), 2, &mut status);
        assert_eq!(status, NDB_SHAPE_MISMATCH);
        assert!(tensor.is_null());
    }

    #[test]
    fn test_import_column_major_view() {
        // [[1, 2, 3], [4, 5, 6]] stored column by column
        let data = [1.0, 4.0, 2.0, 5.0, 3.0, 6.0f64];
        let shape = [2usize, 3];
        let strides = [1isize, 2];
        let view = ndb_array_view {
            data: data.as_ptr() as *mut c_void,
            dtype: DType::F64.code(),
            ndim: 2,
            shape: shape.as_ptr(),
            strides: strides.as_ptr(),
        };
        let mut status: StatusCode = -999;

        let tensor = ndb_tensor_f64_import(&view, &mut status);
        assert_eq!(status, NDB_SUCCESS);
        let values = unsafe { std::slice::from_raw_parts(ndb_tensor_f64_data(tensor), 6) };
        assert_eq!(values, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        ndb_tensor_f64_release(tensor);
    }

    #[test]
    fn test_import_dtype_mismatch() {
        let data = [1i32, 2, 3];
        let shape = [3usize];
        let view = ndb_array_view {
            data: data.as_ptr() as *mut c_void,
            dtype: DType::I32.code(),
            ndim: 1,
            shape: shape.as_ptr(),
            strides: ptr::null(),
        };
        let mut status: StatusCode = -999;

        assert!(ndb_tensor_f64_import(&view, &mut status).is_null());
        assert_eq!(status, NDB_DTYPE_MISMATCH);

        let view = ndb_array_view { dtype: 255, ..view };
        assert!(ndb_tensor_f64_import(&view, &mut status).is_null());
        assert_eq!(status, NDB_INVALID_ARGUMENT);
    }

    #[test]
    fn test_export_copy_keeps_handle() {
        let tensor = from_data(&[1.0, 2.0, 3.0, 4.0], &[2, 2]);
        let mut status: StatusCode = -999;

        let array = ndb_tensor_f64_export(tensor, NDB_POLICY_COPY, &mut status);
        assert_eq!(status, NDB_SUCCESS);
        assert_ne!(ndb_array_data(array) as *const c_double, ndb_tensor_f64_data(tensor));
        assert_eq!(ndb_array_is_writable(array), 1);
        assert_eq!(ndb_array_dtype(array), DType::F64.code());

        ndb_tensor_f64_release(tensor);
        assert_eq!(array_values(array), vec![1.0, 2.0, 3.0, 4.0]);
        ndb_array_release(array);
    }

    #[test]
    fn test_export_move_consumes_handle() {
        let tensor = from_data(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[3, 2]);
        let data = ndb_tensor_f64_data(tensor);
        let mut status: StatusCode = -999;

        let array = ndb_tensor_f64_export(tensor, NDB_POLICY_MOVE, &mut status);
        assert_eq!(status, NDB_SUCCESS);
        assert_eq!(ndb_array_data(array) as *const c_double, data);

        let mut shape = [0usize; 2];
        let mut strides = [0isize; 2];
        assert_eq!(ndb_array_shape(array, shape.as_mut_ptr()), NDB_SUCCESS);
        assert_eq!(ndb_array_strides(array, strides.as_mut_ptr()), NDB_SUCCESS);
        assert_eq!(shape, [3, 2]);
        assert_eq!(strides, [2, 1]);

        assert_eq!(array_values(array), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        ndb_array_release(array);
    }

    #[test]
    fn test_export_reference_aliases() {
        let tensor = from_data(&[7.0, 8.0], &[2]);
        let mut status: StatusCode = -999;

        let array = ndb_tensor_f64_export(tensor, NDB_POLICY_REFERENCE, &mut status);
        assert_eq!(status, NDB_SUCCESS);
        assert_eq!(ndb_array_data(array) as *const c_double, ndb_tensor_f64_data(tensor));
        assert_eq!(ndb_array_is_writable(array), 1);

        unsafe { *(ndb_array_data(array) as *mut c_double) = 70.0 };
        ndb_array_release(array);

        let values = unsafe { std::slice::from_raw_parts(ndb_tensor_f64_data(tensor), 2) };
        assert_eq!(values, &[70.0, 8.0]);
        ndb_tensor_f64_release(tensor);
    }

    #[test]
    fn test_export_scalar_has_no_strides() {
        let tensor = from_data(&[2.5], &[]);
        let mut status: StatusCode = -999;

        let array = ndb_tensor_f64_export(tensor, NDB_POLICY_AUTOMATIC, &mut status);
        assert_eq!(status, NDB_SUCCESS);
        assert_eq!(ndb_array_ndim(array), 0);

        let mut view = ndb_array_view::default();
        assert_eq!(ndb_array_get_view(array, &mut view), NDB_SUCCESS);
        assert!(view.strides.is_null());
        assert_eq!(array_values(array), vec![2.5]);
        ndb_array_release(array);
    }

    #[test]
    fn test_export_none_and_invalid_policy() {
        let tensor = from_data(&[1.0], &[1]);
        let mut status: StatusCode = -999;

        assert!(ndb_tensor_f64_export(tensor, NDB_POLICY_NONE, &mut status).is_null());
        assert_eq!(status, NDB_SUCCESS);

        assert!(ndb_tensor_f64_export(tensor, 42, &mut status).is_null());
        assert_eq!(status, NDB_INVALID_ARGUMENT);

        ndb_tensor_f64_release(tensor);
    }
}
