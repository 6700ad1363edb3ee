//! Owner handles that keep foreign-visible memory alive.
//!
//! An [`Owner`] is a counted reference to an opaque object. Cloning it adds a
//! reference; the object is destroyed when the last reference is dropped.
//! [`Capsule`] is the deleter-bearing object used when the converter itself
//! creates the owner (move export, deep copies).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque pointer plus the function that destroys it.
///
/// The deleter runs exactly once, when the capsule is dropped.
pub struct Capsule {
    ptr: *mut (),
    deleter: unsafe fn(*mut ()),
}

// SAFETY: capsules are only built from `Send + Sync` payloads (see
// `Capsule::from_box`) or by callers who promise the same through `new`.
unsafe impl Send for Capsule {}
unsafe impl Sync for Capsule {}

impl Capsule {
    /// Wrap a raw pointer and its deleter.
    ///
    /// # Safety
    ///
    /// `deleter(ptr)` must be sound to call exactly once from any thread, and
    /// nothing else may free `ptr`.
    pub unsafe fn new(ptr: *mut (), deleter: unsafe fn(*mut ())) -> Self {
        Self { ptr, deleter }
    }

    /// Take ownership of a boxed value; dropping the capsule drops the value.
    pub fn from_box<T: Send + Sync + 'static>(value: Box<T>) -> Self {
        unsafe fn drop_box<T>(ptr: *mut ()) {
            // SAFETY: `ptr` came from `Box::into_raw` in `from_box::<T>`.
            drop(unsafe { Box::from_raw(ptr as *mut T) });
        }
        Self {
            ptr: Box::into_raw(value) as *mut (),
            deleter: drop_box::<T>,
        }
    }

    /// The wrapped pointer.
    pub fn as_ptr(&self) -> *mut () {
        self.ptr
    }
}

impl Drop for Capsule {
    fn drop(&mut self) {
        // SAFETY: guaranteed by the constructors; drop runs once.
        unsafe { (self.deleter)(self.ptr) }
    }
}

impl fmt::Debug for Capsule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capsule").field("ptr", &self.ptr).finish()
    }
}

/// Counted reference to whatever keeps an array's memory alive.
#[derive(Clone)]
pub struct Owner(Arc<dyn Any + Send + Sync>);

impl Owner {
    /// Start counting references to `object`.
    pub fn new<O: Any + Send + Sync>(object: O) -> Self {
        Self(Arc::new(object))
    }

    /// Make `value` the sole responsibility of a new owner.
    pub fn capsule<T: Send + Sync + 'static>(value: Box<T>) -> Self {
        Self::new(Capsule::from_box(value))
    }

    /// Another reference to the same object.
    pub fn borrow(&self) -> Self {
        self.clone()
    }

    /// Number of live references, this one included.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Whether both handles refer to the same object.
    pub fn ptr_eq(a: &Owner, b: &Owner) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Access the owned object if it has type `O`.
    pub fn downcast_ref<O: Any>(&self) -> Option<&O> {
        self.0.downcast_ref::<O>()
    }
}

impl fmt::Debug for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Owner")
            .field("ptr", &Arc::as_ptr(&self.0).cast::<()>())
            .field("refs", &self.ref_count())
            .finish()
    }
}
