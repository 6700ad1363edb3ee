//! Ownership policies for values returned to the host.

/// How the memory behind an exported array is kept alive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReturnPolicy {
    /// Resolved to [`ReturnPolicy::Move`].
    #[default]
    Automatic,
    /// Resolved to [`ReturnPolicy::Reference`].
    AutomaticReference,
    /// The host takes over the memory as is.
    Take,
    /// Deep copy into a host-owned buffer.
    Copy,
    /// Relocate the tensor under a new owner; the array aliases it.
    Move,
    /// Alias the tensor with no owner. The caller keeps the tensor alive.
    Reference,
    /// Alias the tensor and keep the parent object alive.
    ReferenceInternal,
    /// Only return an existing host object; never create one.
    None,
}

impl ReturnPolicy {
    /// Replace the automatic policies by what they stand for.
    pub fn resolve(self) -> Self {
        match self {
            ReturnPolicy::Automatic => ReturnPolicy::Move,
            ReturnPolicy::AutomaticReference => ReturnPolicy::Reference,
            other => other,
        }
    }

    /// Whether the exported array would point into the source tensor.
    pub fn aliases(self) -> bool {
        matches!(
            self.resolve(),
            ReturnPolicy::Take | ReturnPolicy::Reference | ReturnPolicy::ReferenceInternal
        )
    }
}
