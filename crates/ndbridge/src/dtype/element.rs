//! Element trait mapping Rust scalar types to [`DType`].

use super::{Complex64, Complex128, DType};
use bytemuck::Pod;
use std::fmt::Debug;

/// Trait for types that can be elements of an array on either side of the boundary.
///
/// `Pod` guarantees that an element is plain bytes, so buffers can be copied
/// with `memcpy` and compared byte-for-byte.
pub trait Element: Pod + Debug + Default + PartialEq + Send + Sync + 'static {
    /// The corresponding runtime tag.
    const DTYPE: DType;
}

macro_rules! impl_element {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$dtype;
            }
        )*
    };
}

impl_element! {
    f64 => F64,
    f32 => F32,
    i64 => I64,
    i32 => I32,
    i16 => I16,
    i8 => I8,
    u64 => U64,
    u32 => U32,
    u16 => U16,
    u8 => U8,
    Complex64 => Complex64,
    Complex128 => Complex128,
}
