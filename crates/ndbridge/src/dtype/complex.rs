//! Complex scalar types.
//!
//! Laid out as `[re, im]` so that buffers match the host runtime's complex arrays.

use bytemuck::{Pod, Zeroable};

/// Complex number with f32 components.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Complex64 {
    pub re: f32,
    pub im: f32,
}

/// Complex number with f64 components.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Complex128 {
    pub re: f64,
    pub im: f64,
}

impl Complex64 {
    #[inline]
    pub const fn new(re: f32, im: f32) -> Self {
        Self { re, im }
    }
}

impl Complex128 {
    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

// SAFETY: both are repr(C) pairs of the same float type, so there is no padding
// and every bit pattern is valid.
unsafe impl Zeroable for Complex64 {}
unsafe impl Pod for Complex64 {}
unsafe impl Zeroable for Complex128 {}
unsafe impl Pod for Complex128 {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_layout() {
        let z = [Complex128::new(1.0, 2.0), Complex128::new(3.0, 4.0)];
        let flat: &[f64] = bytemuck::cast_slice(&z);
        assert_eq!(flat, &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_complex_default_is_zero() {
        assert_eq!(Complex64::default(), Complex64::new(0.0, 0.0));
    }
}
