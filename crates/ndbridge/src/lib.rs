//! ndbridge - conversion between host-runtime arrays and native tensors
//!
//! A host runtime (an interpreter, a C caller, ...) hands out arrays as
//! [`ArrayDescriptor`]s: a raw pointer, element type, extents, strides and a
//! counted owner. Application code works with native tensors that know some
//! of their shape at compile time. This crate converts between the two.
//!
//! # Architecture
//!
//! ```text
//! Level 1: conversion (caster module)
//!     → import (always copies), export / export_ref (copy, move, alias)
//!
//! Level 2: classification (classify module)
//!     → TensorKind, ArraySpec derived from the tensor type
//!
//! Level 3: both sides of the boundary
//!     → descriptor + owner (host side), tensor + storage (native side)
//!     → host::Host, the two primitives a runtime provides
//! ```
//!
//! # Example
//!
//! ```
//! use ndbridge::host::{BindingContext, CastFlags, HostArray, HostValue, LocalHost};
//! use ndbridge::shape::Shape2;
//! use ndbridge::{FixedTensor, ReturnPolicy, export, import};
//!
//! let array = HostArray::from_vec(vec![1.0f64, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
//! let value = HostValue::from(array);
//!
//! // Host array -> fixed-shape tensor (copied).
//! let t: FixedTensor<f64, Shape2<2, 2>> =
//!     import(&LocalHost, &value, CastFlags::strict()).unwrap();
//! assert_eq!(t.get(&[1, 1]), Some(&4.0));
//!
//! // Tensor -> host array (moved under a new owner, no copy).
//! let back = export(&LocalHost, t, ReturnPolicy::Automatic, &BindingContext::new());
//! assert_eq!(back.as_array().unwrap().to_vec::<f64>().unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
//! ```

pub mod caster;
pub mod classify;
pub mod descriptor;
pub mod dtype;
pub mod error;
pub mod host;
pub mod layout;
pub mod owner;
pub mod policy;
pub mod shape;
pub mod storage;
pub mod strides;
pub mod tensor;

pub use caster::{describe, export, export_mut, export_ref, import};
pub use classify::{Access, ArraySpec, NativeTensor, TensorKind, signature};
pub use descriptor::ArrayDescriptor;
pub use dtype::{Complex64, Complex128, DType, Element};
pub use error::{CastError, TensorError};
pub use layout::{AnyLayout, ColumnMajor, Contiguity, Layout, Order, RowMajor};
pub use owner::{Capsule, Owner};
pub use policy::ReturnPolicy;
pub use tensor::{DynTensor, FixedTensor, Tensor};
