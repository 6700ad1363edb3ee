//! The two primitives the converter needs from a host runtime.
//!
//! The converter never touches the host object model directly. It asks the
//! host to view a value as an array ([`Host::array_from_value`]) and to wrap
//! an array into a value ([`Host::value_from_array`]). [`LocalHost`] is an
//! in-process host used by tests and by embedders without a runtime of their
//! own.

mod local;

pub use local::{HostArray, HostValue, LocalHost};

use crate::classify::ArraySpec;
use crate::descriptor::ArrayDescriptor;
use crate::error::CastError;
use crate::owner::Owner;
use crate::policy::ReturnPolicy;

/// Options forwarded to the host when interpreting a value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CastFlags {
    /// Allow the host to produce a converted copy (e.g. a contiguous one)
    /// when the value does not match the signature as is.
    pub convert: bool,
}

impl CastFlags {
    /// Accept values only as they are.
    pub const fn strict() -> Self {
        Self { convert: false }
    }

    /// Allow implicit conversion by the host.
    pub const fn convert() -> Self {
        Self { convert: true }
    }
}

/// Per-call context for an export.
#[derive(Clone, Debug, Default)]
pub struct BindingContext {
    parent: Option<Owner>,
}

impl BindingContext {
    /// Context with no parent object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for exporting a member of `parent`.
    pub fn with_parent(parent: Owner) -> Self {
        Self {
            parent: Some(parent),
        }
    }

    /// The object being accessed, if the export produces one of its members.
    pub fn parent(&self) -> Option<&Owner> {
        self.parent.as_ref()
    }
}

/// A host runtime.
pub trait Host {
    /// Opaque host value.
    type Value;

    /// View `src` as an array matching `spec`.
    ///
    /// The host may coerce the value when `flags.convert` is set. The returned
    /// descriptor must keep its memory alive (through its owner) at least
    /// until it is dropped.
    fn array_from_value(
        &self,
        src: &Self::Value,
        spec: &ArraySpec,
        flags: CastFlags,
    ) -> Result<ArrayDescriptor, CastError>;

    /// Wrap `array` into a host value under `policy`.
    fn value_from_array(
        &self,
        array: ArrayDescriptor,
        policy: ReturnPolicy,
        ctx: &BindingContext,
    ) -> Self::Value;
}
