//! In-process host runtime.

use super::{BindingContext, CastFlags, Host};
use crate::classify::{Access, ArraySpec};
use crate::descriptor::ArrayDescriptor;
use crate::dtype::{DType, Element};
use crate::error::{CastError, TensorError};
use crate::layout::Order;
use crate::owner::Owner;
use crate::policy::ReturnPolicy;
use std::sync::Arc;

/// Reference-counted host array object.
#[derive(Clone, Debug)]
pub struct HostArray(Arc<ArrayDescriptor>);

impl HostArray {
    pub fn new(array: ArrayDescriptor) -> Self {
        Self(Arc::new(array))
    }

    /// A C-contiguous array owning `data`.
    pub fn from_vec<T: Element>(data: Vec<T>, shape: &[usize]) -> Result<Self, TensorError> {
        Ok(Self::new(ArrayDescriptor::from_vec(data, shape)?))
    }

    /// The same memory, marked read-only.
    pub fn readonly(&self) -> Self {
        Self::new((*self.0).clone().with_readonly(true))
    }

    #[inline]
    pub fn descriptor(&self) -> &ArrayDescriptor {
        &self.0
    }

    #[inline]
    pub fn dtype(&self) -> DType {
        self.0.dtype()
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        !self.0.is_readonly()
    }

    /// What keeps the array's memory alive, if anything.
    #[inline]
    pub fn base(&self) -> Option<&Owner> {
        self.0.owner()
    }

    /// Elements in row-major order.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>, CastError> {
        self.0.to_vec(Order::RowMajor)
    }

    /// Whether both handles are the same host object.
    pub fn ptr_eq(a: &HostArray, b: &HostArray) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

/// Values of the local host.
#[derive(Clone, Debug, Default)]
pub enum HostValue {
    #[default]
    None,
    Int(i64),
    Float(f64),
    Array(HostArray),
}

impl HostValue {
    pub fn as_array(&self) -> Option<&HostArray> {
        match self {
            HostValue::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, HostValue::None)
    }
}

impl From<HostArray> for HostValue {
    fn from(array: HostArray) -> Self {
        HostValue::Array(array)
    }
}

/// In-process host runtime.
#[derive(Copy, Clone, Debug, Default)]
pub struct LocalHost;

impl LocalHost {
    fn copy(array: &ArrayDescriptor) -> HostValue {
        let order = array.contiguous_order().unwrap_or_default();
        tracing::trace!(shape = ?array.shape(), ?order, "copying array into host memory");
        HostValue::Array(HostArray::new(array.to_contiguous(order)))
    }
}

impl Host for LocalHost {
    type Value = HostValue;

    fn array_from_value(
        &self,
        src: &HostValue,
        spec: &ArraySpec,
        flags: CastFlags,
    ) -> Result<ArrayDescriptor, CastError> {
        let array = src.as_array().ok_or(CastError::NotAnArray)?.descriptor();

        if array.dtype() != spec.dtype {
            return Err(CastError::DTypeMismatch {
                expected: spec.dtype,
                actual: array.dtype(),
            });
        }
        spec.shape.check(array.shape())?;
        if spec.access == Access::Writable && array.is_readonly() {
            return Err(CastError::ReadOnly);
        }
        let readonly = array.is_readonly() || spec.access == Access::ReadOnly;

        if array.satisfies(spec.contiguity) {
            return Ok(array.clone().with_readonly(readonly));
        }
        match spec.contiguity.order() {
            Some(order) if flags.convert => {
                tracing::trace!(shape = ?array.shape(), ?order, "making contiguous copy");
                Ok(array.to_contiguous(order).with_readonly(readonly))
            }
            _ => Err(CastError::NotContiguous {
                required: spec.contiguity,
            }),
        }
    }

    fn value_from_array(
        &self,
        array: ArrayDescriptor,
        policy: ReturnPolicy,
        _ctx: &BindingContext,
    ) -> HostValue {
        match policy {
            ReturnPolicy::None => HostValue::None,
            ReturnPolicy::Copy => Self::copy(&array),
            // Nothing would keep the memory alive.
            ReturnPolicy::Automatic | ReturnPolicy::AutomaticReference | ReturnPolicy::Move
                if array.owner().is_none() =>
            {
                Self::copy(&array)
            }
            _ => HostValue::Array(HostArray::new(array)),
        }
    }
}
