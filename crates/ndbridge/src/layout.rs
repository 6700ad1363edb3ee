//! Memory layout tags.
//!
//! ```text
//! Layout (static, per tensor type)     Contiguity (required of a foreign array)
//! ├── RowMajor     ─────────────────▶  C
//! ├── ColumnMajor  ─────────────────▶  F
//! └── Dynamic      ─────────────────▶  Any (strided allowed)
//! ```

use std::fmt;

/// Concrete element order of a contiguous buffer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Order {
    /// Last index varies fastest (C order).
    #[default]
    RowMajor,
    /// First index varies fastest (Fortran order).
    ColumnMajor,
}

/// Layout a tensor type declares at compile time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Layout {
    RowMajor,
    ColumnMajor,
    /// No static constraint; the tensor picks an order at runtime.
    Dynamic,
}

impl Layout {
    /// Contiguity a foreign array must have to be copied into this layout.
    pub const fn contiguity(self) -> Contiguity {
        match self {
            Layout::RowMajor => Contiguity::C,
            Layout::ColumnMajor => Contiguity::F,
            Layout::Dynamic => Contiguity::Any,
        }
    }
}

/// Contiguity class required of a foreign array.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Contiguity {
    /// Row-major contiguous.
    C,
    /// Column-major contiguous.
    F,
    /// Any strides.
    Any,
}

impl Contiguity {
    /// The order an array must be made contiguous in to satisfy this class.
    pub const fn order(self) -> Option<Order> {
        match self {
            Contiguity::C => Some(Order::RowMajor),
            Contiguity::F => Some(Order::ColumnMajor),
            Contiguity::Any => None,
        }
    }
}

impl fmt::Display for Contiguity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contiguity::C => f.write_str("C"),
            Contiguity::F => f.write_str("F"),
            Contiguity::Any => f.write_str("A"),
        }
    }
}

/// Type-level layout marker.
pub trait StaticLayout: Copy + Default + fmt::Debug + Send + Sync + 'static {
    const LAYOUT: Layout;

    /// Order a tensor with this layout uses when `preferred` is on offer.
    ///
    /// Static layouts ignore the preference.
    fn pick(preferred: Order) -> Order {
        match Self::LAYOUT {
            Layout::RowMajor => Order::RowMajor,
            Layout::ColumnMajor => Order::ColumnMajor,
            Layout::Dynamic => preferred,
        }
    }
}

/// Row-major marker.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RowMajor;

/// Column-major marker.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnMajor;

/// Unconstrained layout marker.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AnyLayout;

impl StaticLayout for RowMajor {
    const LAYOUT: Layout = Layout::RowMajor;
}

impl StaticLayout for ColumnMajor {
    const LAYOUT: Layout = Layout::ColumnMajor;
}

impl StaticLayout for AnyLayout {
    const LAYOUT: Layout = Layout::Dynamic;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguity_from_layout() {
        assert_eq!(Layout::RowMajor.contiguity(), Contiguity::C);
        assert_eq!(Layout::ColumnMajor.contiguity(), Contiguity::F);
        assert_eq!(Layout::Dynamic.contiguity(), Contiguity::Any);
    }

    #[test]
    fn test_pick() {
        assert_eq!(RowMajor::pick(Order::ColumnMajor), Order::RowMajor);
        assert_eq!(ColumnMajor::pick(Order::RowMajor), Order::ColumnMajor);
        assert_eq!(AnyLayout::pick(Order::ColumnMajor), Order::ColumnMajor);
        assert_eq!(AnyLayout::pick(Order::RowMajor), Order::RowMajor);
    }
}
