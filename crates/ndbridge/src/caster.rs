//! Conversion between host values and native tensors.
//!
//! ```text
//! import:  host value ──array_from_value──▶ ArrayDescriptor ──copy──▶ tensor
//! export:  tensor ──describe──▶ ArrayDescriptor ──value_from_array──▶ host value
//! ```
//!
//! Import always copies. Export picks between copying, moving the tensor under
//! a new owner, and aliasing it, depending on the [`ReturnPolicy`].

use crate::classify::{ArraySpec, NativeTensor};
use crate::descriptor::{ArrayDescriptor, Strides};
use crate::dtype::Element;
use crate::error::CastError;
use crate::host::{BindingContext, CastFlags, Host};
use crate::owner::Owner;
use crate::policy::ReturnPolicy;
use tracing::debug;

/// Convert a host value into a new `T`.
///
/// Failure means "this conversion does not apply"; callers may go on to try
/// another one. The tensor never aliases host memory.
///
/// # Examples
///
/// ```
/// use ndbridge::host::{CastFlags, HostArray, HostValue, LocalHost};
/// use ndbridge::{Tensor, import};
///
/// let array = HostArray::from_vec(vec![1.0f64, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
/// let value = HostValue::from(array);
/// let t: Tensor<f64, 2> = import(&LocalHost, &value, CastFlags::strict()).unwrap();
/// assert_eq!(t.get([1, 0]), Some(&3.0));
///
/// // Wrong rank: not applicable.
/// assert!(import::<Tensor<f64, 3>, _>(&LocalHost, &value, CastFlags::strict()).is_err());
/// ```
pub fn import<T, H>(host: &H, src: &H::Value, flags: CastFlags) -> Result<T, CastError>
where
    T: NativeTensor,
    H: Host,
{
    let spec = ArraySpec::for_import::<T>();
    let array = host
        .array_from_value(src, &spec, flags)
        .and_then(|array| spec.check(&array).map(|()| array))
        .inspect_err(|err| debug!(signature = %spec, %err, "import not applicable"))?;

    let mut value = T::empty();
    // Fixed-shape tensors only verify the extents here.
    value
        .resize(array.shape(), array.contiguous_order().unwrap_or_default())
        .inspect_err(|err| debug!(signature = %spec, %err, "import not applicable"))?;

    let order = value.order();
    array.copy_into(value.data_mut(), order)?;
    Ok(value)
}

/// Describe `tensor`'s memory as an array.
///
/// Strides are omitted for rank 0.
///
/// # Safety
///
/// The descriptor aliases `tensor`'s buffer. Unless `owner` keeps the tensor
/// alive, the caller must keep it alive, unmoved and unmodified while the
/// descriptor (or anything built from it) is in use.
pub unsafe fn describe<T: NativeTensor>(tensor: &T, owner: Option<Owner>) -> ArrayDescriptor {
    // SAFETY: forwarded to the caller.
    unsafe { describe_ptr(tensor, tensor.data().as_ptr() as *mut u8, owner) }
}

unsafe fn describe_ptr<T: NativeTensor>(
    tensor: &T,
    data: *mut u8,
    owner: Option<Owner>,
) -> ArrayDescriptor {
    let strides: Strides = tensor.strides().iter().map(|&s| s as isize).collect();
    let strides = (tensor.ndim() > 0).then_some(strides.as_slice());
    // SAFETY: `data` points at `tensor`'s buffer, whose shape and strides are
    // the ones given; lifetime is the caller's contract.
    unsafe {
        ArrayDescriptor::from_raw_parts(
            data,
            <T::Elem as Element>::DTYPE,
            tensor.shape(),
            strides,
            owner,
        )
    }
}

/// Convert `tensor` into a host value, consuming it.
///
/// Policies resolve as follows ([`ReturnPolicy::resolve`] first):
/// - `Copy`: the host copies the buffer; `tensor` is dropped afterwards.
/// - `None`: handed to the host unchanged.
/// - `Move` and every aliasing policy: `tensor` moves to the heap under a new
///   owner and the array aliases it. An owned value has nothing else to
///   alias, so `Reference`, `ReferenceInternal` and `Take` behave as `Move`.
///
/// Never fails.
///
/// # Examples
///
/// ```
/// use ndbridge::host::{BindingContext, LocalHost};
/// use ndbridge::{DynTensor, ReturnPolicy, export};
///
/// let t: DynTensor<i32> = DynTensor::from_vec(vec![1, 2, 3], &[3]).unwrap();
/// let ptr = t.data().as_ptr();
/// let value = export(&LocalHost, t, ReturnPolicy::Automatic, &BindingContext::new());
/// let array = value.as_array().unwrap();
/// assert_eq!(array.descriptor().data_ptr(), ptr as *const u8); // zero-copy
/// assert_eq!(array.to_vec::<i32>().unwrap(), vec![1, 2, 3]);
/// ```
pub fn export<T, H>(host: &H, tensor: T, policy: ReturnPolicy, ctx: &BindingContext) -> H::Value
where
    T: NativeTensor + Send + Sync + 'static,
    H: Host,
{
    let resolved = policy.resolve();
    match resolved {
        ReturnPolicy::Copy | ReturnPolicy::None => {
            // SAFETY: the host is done with the array before `tensor` drops.
            let array = unsafe { describe(&tensor, None) };
            host.value_from_array(array, resolved, ctx)
        }
        _ => {
            if resolved.aliases() {
                debug!(?policy, "owned tensor cannot be aliased, moving it");
            }
            export_moved(host, tensor, ctx)
        }
    }
}

/// Convert a borrowed tensor into a host value.
///
/// - `Move` (and `Automatic`): a clone moves to the heap under a new owner.
/// - `ReferenceInternal` with a parent in `ctx`: the array aliases `tensor`
///   and its owner is a new reference to the parent.
/// - `Reference`, `AutomaticReference`, `Take`, and `ReferenceInternal`
///   without a parent: the array aliases `tensor` with no owner at all.
/// - `Copy`, `None`: handed to the host unchanged.
///
/// Aliasing arrays are read-only since they come from a shared borrow.
///
/// # Safety
///
/// For the aliasing policies nothing ties the array's lifetime to `tensor`.
/// The caller must keep `tensor` alive and unmodified for as long as the host
/// value exists. With a parent, `tensor` must live inside the parent object.
pub unsafe fn export_ref<T, H>(
    host: &H,
    tensor: &T,
    policy: ReturnPolicy,
    ctx: &BindingContext,
) -> H::Value
where
    T: NativeTensor + Clone + Send + Sync + 'static,
    H: Host,
{
    let resolved = policy.resolve();
    match (resolved, ctx.parent()) {
        (ReturnPolicy::Move, _) => export_moved(host, tensor.clone(), ctx),
        (ReturnPolicy::ReferenceInternal, Some(parent)) => {
            // SAFETY: the parent owns `tensor` (caller contract) and the
            // array holds a reference to the parent.
            let array = unsafe { describe(tensor, Some(parent.borrow())) }.with_readonly(true);
            host.value_from_array(array, ReturnPolicy::Reference, ctx)
        }
        (other, _) => {
            // SAFETY: caller contract.
            let array = unsafe { describe(tensor, None) }.with_readonly(!matches!(
                other,
                ReturnPolicy::Copy | ReturnPolicy::None
            ));
            host.value_from_array(array, other, ctx)
        }
    }
}

/// Convert a mutably borrowed tensor into a host value.
///
/// Same as [`export_ref`], except that:
/// - `Move` (and `Automatic`) moves `tensor` out, leaving an empty tensor in
///   its place, instead of cloning it.
/// - Aliasing arrays are writable, so writes through them reach `tensor`.
///
/// # Safety
///
/// For the aliasing policies the caller must keep `tensor` alive and must not
/// access it any other way while the host value exists. With a parent,
/// `tensor` must live inside the parent object.
pub unsafe fn export_mut<T, H>(
    host: &H,
    tensor: &mut T,
    policy: ReturnPolicy,
    ctx: &BindingContext,
) -> H::Value
where
    T: NativeTensor + Send + Sync + 'static,
    H: Host,
{
    let resolved = policy.resolve();
    if resolved == ReturnPolicy::Move {
        return export_moved(host, std::mem::replace(tensor, T::empty()), ctx);
    }

    let data = tensor.data_mut().as_mut_ptr() as *mut u8;
    match (resolved, ctx.parent()) {
        (ReturnPolicy::ReferenceInternal, Some(parent)) => {
            // SAFETY: the parent owns `tensor` (caller contract) and the
            // array holds a reference to the parent.
            let array = unsafe { describe_ptr(tensor, data, Some(parent.borrow())) };
            host.value_from_array(array, ReturnPolicy::Reference, ctx)
        }
        (other, _) => {
            // SAFETY: caller contract.
            let array = unsafe { describe_ptr(tensor, data, None) };
            host.value_from_array(array, other, ctx)
        }
    }
}

fn export_moved<T, H>(host: &H, tensor: T, ctx: &BindingContext) -> H::Value
where
    T: NativeTensor + Send + Sync + 'static,
    H: Host,
{
    let mut boxed = Box::new(tensor);
    let data = boxed.data_mut().as_mut_ptr() as *mut u8;
    // SAFETY: the capsule becomes the tensor's sole owner and the array holds
    // it. Moving the box into the capsule does not move the tensor's buffer.
    let array = unsafe { describe_ptr(&*boxed, data, None) };
    let owner = Owner::capsule(boxed);
    host.value_from_array(array.with_owner(Some(owner)), ReturnPolicy::Reference, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostArray, HostValue, LocalHost};
    use crate::layout::{AnyLayout, ColumnMajor, Order};
    use crate::shape::{Shape0, Shape2};
    use crate::tensor::{DynTensor, FixedTensor, Tensor};

    fn host_2x3() -> HostValue {
        HostArray::from_vec(vec![1i32, 2, 3, 4, 5, 6], &[2, 3]).unwrap().into()
    }

    #[test]
    fn test_import_dynamic() {
        let t: DynTensor<i32> = import(&LocalHost, &host_2x3(), CastFlags::strict()).unwrap();
        assert_eq!(t.shape(), &[2, 3]);
        assert_eq!(t.data(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_import_copies() {
        let value = host_2x3();
        let t: DynTensor<i32> = import(&LocalHost, &value, CastFlags::strict()).unwrap();
        assert_ne!(
            t.data().as_ptr() as *const u8,
            value.as_array().unwrap().descriptor().data_ptr()
        );
        // The borrowed view is released once import returns.
        assert_eq!(value.as_array().unwrap().base().unwrap().ref_count(), 1);
    }

    #[test]
    fn test_import_fixed_shape() {
        let t: FixedTensor<i32, Shape2<2, 3>> =
            import(&LocalHost, &host_2x3(), CastFlags::strict()).unwrap();
        assert_eq!(t.get(&[1, 2]), Some(&6));

        let r = import::<FixedTensor<i32, Shape2<3, 2>>, _>(
            &LocalHost,
            &host_2x3(),
            CastFlags::convert(),
        );
        assert_eq!(
            r.unwrap_err(),
            CastError::ShapeMismatch {
                expected: vec![3, 2],
                actual: vec![2, 3],
            }
        );
    }

    #[test]
    fn test_import_column_major_needs_convert() {
        let r =
            import::<Tensor<i32, 2, ColumnMajor>, _>(&LocalHost, &host_2x3(), CastFlags::strict());
        assert!(matches!(r, Err(CastError::NotContiguous { .. })));

        let t: Tensor<i32, 2, ColumnMajor> =
            import(&LocalHost, &host_2x3(), CastFlags::convert()).unwrap();
        assert_eq!(t.data(), &[1, 4, 2, 5, 3, 6]);
        assert_eq!(t.get([0, 2]), Some(&3));
    }

    #[test]
    fn test_import_any_layout_adopts_source_order() {
        let t: DynTensor<i32, AnyLayout> =
            import(&LocalHost, &host_2x3(), CastFlags::strict()).unwrap();
        assert_eq!(t.order(), Order::RowMajor);
        assert_eq!(t.data(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_import_scalar() {
        let value: HostValue = HostArray::from_vec(vec![2.5f64], &[]).unwrap().into();
        let t: FixedTensor<f64, Shape0> = import(&LocalHost, &value, CastFlags::strict()).unwrap();
        assert_eq!(t.get(&[]), Some(&2.5));
    }

    #[test]
    fn test_describe_scalar_omits_strides() {
        let t: DynTensor<f32> = DynTensor::default();
        // SAFETY: `t` outlives the descriptor.
        let array = unsafe { describe(&t, None) };
        assert_eq!(array.ndim(), 0);
        assert!(array.explicit_strides().is_none());
        assert_eq!(array.size(), 1);
    }

    #[test]
    fn test_export_move_is_zero_copy() {
        let t: Tensor<f64, 1> = Tensor::from_vec(vec![1.0, 2.0], [2]).unwrap();
        let ptr = t.data().as_ptr() as *const u8;
        let value = export(&LocalHost, t, ReturnPolicy::Move, &BindingContext::new());
        let array = value.as_array().unwrap();
        assert_eq!(array.descriptor().data_ptr(), ptr);
        assert!(array.is_writable());
        assert_eq!(array.base().unwrap().ref_count(), 1);
    }

    #[test]
    fn test_export_copy_allocates() {
        let t: DynTensor<u8> = DynTensor::from_vec(vec![1, 2, 3], &[3]).unwrap();
        let ptr = t.data().as_ptr() as *const u8;
        let value = export(&LocalHost, t, ReturnPolicy::Copy, &BindingContext::new());
        let array = value.as_array().unwrap();
        assert_ne!(array.descriptor().data_ptr(), ptr);
        assert_eq!(array.to_vec::<u8>().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_export_owned_reference_moves() {
        let t: DynTensor<i64> = DynTensor::from_vec(vec![4, 5], &[2]).unwrap();
        let ptr = t.data().as_ptr() as *const u8;
        let value = export(&LocalHost, t, ReturnPolicy::Reference, &BindingContext::new());
        let array = value.as_array().unwrap();
        assert_eq!(array.descriptor().data_ptr(), ptr);
        assert!(array.base().is_some());
    }

    #[test]
    fn test_export_ref_reference_has_no_owner() {
        let t: DynTensor<i64> = DynTensor::from_vec(vec![4, 5], &[2]).unwrap();
        // SAFETY: `t` outlives `value`.
        let ctx = BindingContext::new();
        let value = unsafe { export_ref(&LocalHost, &t, ReturnPolicy::Reference, &ctx) };
        let array = value.as_array().unwrap();
        assert_eq!(array.descriptor().data_ptr(), t.data().as_ptr() as *const u8);
        assert!(array.base().is_none());
        assert!(!array.is_writable());
    }

    #[test]
    fn test_export_ref_move_clones() {
        let t: DynTensor<i64> = DynTensor::from_vec(vec![4, 5], &[2]).unwrap();
        // SAFETY: `Move` does not alias.
        let ctx = BindingContext::new();
        let value = unsafe { export_ref(&LocalHost, &t, ReturnPolicy::Automatic, &ctx) };
        let array = value.as_array().unwrap();
        assert_ne!(array.descriptor().data_ptr(), t.data().as_ptr() as *const u8);
        assert_eq!(array.to_vec::<i64>().unwrap(), vec![4, 5]);
    }

    #[test]
    fn test_export_none_policy() {
        let t: DynTensor<f64> = DynTensor::zeros(&[2]);
        let value = export(&LocalHost, t, ReturnPolicy::None, &BindingContext::new());
        assert!(value.is_none());
    }

    #[test]
    fn test_export_mut_reference_is_writable() {
        let mut t: Tensor<i32, 1> = Tensor::from_vec(vec![1, 2, 3], [3]).unwrap();
        let ctx = BindingContext::new();
        // SAFETY: `t` is only touched again after `value` is gone.
        let value = unsafe { export_mut(&LocalHost, &mut t, ReturnPolicy::Reference, &ctx) };
        let array = value.as_array().unwrap();
        assert!(array.is_writable());
        assert!(array.base().is_none());
        ArraySpec::for_export::<Tensor<i32, 1>>().check(array.descriptor()).unwrap();

        // SAFETY: the array aliases `t`, which is alive and otherwise unused.
        unsafe { *(array.descriptor().data_mut_ptr() as *mut i32).add(1) = 20 };
        drop(value);
        assert_eq!(t.data(), &[1, 20, 3]);
    }

    #[test]
    fn test_export_mut_move_leaves_empty() {
        let mut t: DynTensor<u16> = DynTensor::from_vec(vec![7, 8], &[2]).unwrap();
        let ptr = t.data().as_ptr() as *const u8;
        // SAFETY: `Move` does not alias.
        let value = unsafe {
            export_mut(&LocalHost, &mut t, ReturnPolicy::Automatic, &BindingContext::new())
        };
        let array = value.as_array().unwrap();
        assert_eq!(array.descriptor().data_ptr(), ptr);
        assert_eq!(array.to_vec::<u16>().unwrap(), vec![7, 8]);
        assert!(t.shape().is_empty());
    }
}
