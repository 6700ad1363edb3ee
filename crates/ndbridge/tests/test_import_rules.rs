//! Which foreign arrays each tensor variant accepts.
//!
//! # Coverage
//!
//! - exact extents for fixed-shape tensors
//! - rank enforcement for rank-fixed tensors
//! - dtype, readonly, and non-array sources
//! - a failed import leaves the source untouched

use ndbridge::host::{CastFlags, HostArray, HostValue, LocalHost};
use ndbridge::shape::{Shape1, Shape2};
use ndbridge::{CastError, ColumnMajor, DynTensor, FixedTensor, Tensor, import};

fn matrix_2x3() -> HostValue {
    HostArray::from_vec(vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap().into()
}

/// Fixed-shape tensors reject every other shape, even with conversion.
#[test]
fn test_fixed_shape_rejects_other_extents() {
    let value = matrix_2x3();
    for flags in [CastFlags::strict(), CastFlags::convert()] {
        assert!(import::<FixedTensor<f64, Shape2<2, 3>>, _>(&LocalHost, &value, flags).is_ok());

        assert_eq!(
            import::<FixedTensor<f64, Shape2<3, 2>>, _>(&LocalHost, &value, flags).unwrap_err(),
            CastError::ShapeMismatch {
                expected: vec![3, 2],
                actual: vec![2, 3],
            }
        );
        assert_eq!(
            import::<FixedTensor<f64, Shape1<6>>, _>(&LocalHost, &value, flags).unwrap_err(),
            CastError::RankMismatch {
                expected: 1,
                actual: 2,
            }
        );
    }
}

/// Rank-fixed tensors accept any extents of the right rank.
#[test]
fn test_rank_enforced() {
    for shape in [[0usize, 5], [1, 1], [4, 2]] {
        let len: usize = shape.iter().product();
        let value: HostValue = HostArray::from_vec(vec![0u32; len], &shape).unwrap().into();
        let t: Tensor<u32, 2> = import(&LocalHost, &value, CastFlags::strict()).unwrap();
        assert_eq!(t.shape(), &shape);

        assert_eq!(
            import::<Tensor<u32, 3>, _>(&LocalHost, &value, CastFlags::convert()).unwrap_err(),
            CastError::RankMismatch {
                expected: 3,
                actual: 2,
            }
        );
    }
}

/// Dynamic tensors take any rank.
#[test]
fn test_dynamic_accepts_any_rank() {
    for shape in [&[][..], &[3][..], &[1, 2, 1][..], &[2, 1, 1, 2][..]] {
        let len: usize = shape.iter().product();
        let data: Vec<i8> = (0..len as i8).collect();
        let value: HostValue = HostArray::from_vec(data.clone(), shape).unwrap().into();
        let t: DynTensor<i8> = import(&LocalHost, &value, CastFlags::strict()).unwrap();
        assert_eq!(t.shape(), shape);
        assert_eq!(t.data(), data.as_slice());
    }
}

/// Element types are never converted.
#[test]
fn test_dtype_mismatch() {
    let err =
        import::<DynTensor<f32>, _>(&LocalHost, &matrix_2x3(), CastFlags::convert()).unwrap_err();
    assert!(matches!(err, CastError::DTypeMismatch { .. }));
}

/// Non-array values are not applicable.
#[test]
fn test_not_an_array() {
    for value in [HostValue::None, HostValue::Int(3), HostValue::Float(1.0)] {
        let err =
            import::<DynTensor<f64>, _>(&LocalHost, &value, CastFlags::convert()).unwrap_err();
        assert_eq!(err, CastError::NotAnArray);
    }
}

/// Imports only read, so read-only arrays are accepted.
#[test]
fn test_readonly_source() {
    let value: HostValue = match matrix_2x3() {
        HostValue::Array(array) => array.readonly().into(),
        _ => unreachable!(),
    };
    let t: Tensor<f64, 2, ColumnMajor> = import(&LocalHost, &value, CastFlags::convert()).unwrap();
    assert_eq!(t.data(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
}

/// A rejected import leaves the host array as it was.
#[test]
fn test_failed_import_leaves_source() {
    let value = matrix_2x3();
    let before = value.as_array().unwrap().base().unwrap().ref_count();
    let r = import::<Tensor<f64, 2, ColumnMajor>, _>(&LocalHost, &value, CastFlags::strict());
    assert!(r.is_err());

    let array = value.as_array().unwrap();
    assert_eq!(array.base().unwrap().ref_count(), before);
    assert!(array.is_writable());
    assert_eq!(array.to_vec::<f64>().unwrap(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}
