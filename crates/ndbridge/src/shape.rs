//! Static shapes and the shape constraints derived from them.

use crate::error::CastError;
use smallvec::SmallVec;
use std::fmt;

/// Dynamic shape storage; most arrays have four or fewer dimensions.
pub type Dims = SmallVec<[usize; 4]>;

/// A shape known entirely at compile time.
pub trait FixedShape: Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// Extent of every dimension.
    const DIMS: &'static [usize];

    /// Number of dimensions.
    const RANK: usize = Self::DIMS.len();

    /// Total number of elements.
    fn size() -> usize {
        Self::DIMS.iter().product()
    }
}

/// Shape of a fixed-shape scalar.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Shape0;

/// Fixed shape `(A,)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Shape1<const A: usize>;

/// Fixed shape `(A, B)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Shape2<const A: usize, const B: usize>;

/// Fixed shape `(A, B, C)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Shape3<const A: usize, const B: usize, const C: usize>;

/// Fixed shape `(A, B, C, D)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Shape4<const A: usize, const B: usize, const C: usize, const D: usize>;

impl FixedShape for Shape0 {
    const DIMS: &'static [usize] = &[];
}

impl<const A: usize> FixedShape for Shape1<A> {
    const DIMS: &'static [usize] = &[A];
}

impl<const A: usize, const B: usize> FixedShape for Shape2<A, B> {
    const DIMS: &'static [usize] = &[A, B];
}

impl<const A: usize, const B: usize, const C: usize> FixedShape for Shape3<A, B, C> {
    const DIMS: &'static [usize] = &[A, B, C];
}

impl<const A: usize, const B: usize, const C: usize, const D: usize> FixedShape
    for Shape4<A, B, C, D>
{
    const DIMS: &'static [usize] = &[A, B, C, D];
}

/// What a tensor type demands of a foreign array's shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShapeConstraint {
    /// Every extent is fixed.
    Exact(&'static [usize]),
    /// Only the number of dimensions is fixed.
    Rank(usize),
    /// Anything goes.
    Any,
}

impl ShapeConstraint {
    /// Required number of dimensions, if any.
    pub fn rank(&self) -> Option<usize> {
        match self {
            ShapeConstraint::Exact(dims) => Some(dims.len()),
            ShapeConstraint::Rank(n) => Some(*n),
            ShapeConstraint::Any => None,
        }
    }

    /// Check a foreign array's extents.
    pub fn check(&self, shape: &[usize]) -> Result<(), CastError> {
        if let Some(expected) = self.rank() {
            if shape.len() != expected {
                return Err(CastError::RankMismatch {
                    expected,
                    actual: shape.len(),
                });
            }
        }
        if let ShapeConstraint::Exact(dims) = self {
            if *dims != shape {
                return Err(CastError::ShapeMismatch {
                    expected: dims.to_vec(),
                    actual: shape.to_vec(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for ShapeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims: Vec<String> = match self {
            ShapeConstraint::Exact(dims) => dims.iter().map(ToString::to_string).collect(),
            ShapeConstraint::Rank(n) => vec!["*".to_string(); *n],
            ShapeConstraint::Any => return f.write_str("*"),
        };
        write!(f, "({})", dims.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_shapes() {
        assert_eq!(Shape0::DIMS, &[] as &[usize]);
        assert_eq!(Shape0::RANK, 0);
        assert_eq!(Shape0::size(), 1);
        assert_eq!(Shape3::<2, 3, 4>::DIMS, &[2, 3, 4]);
        assert_eq!(Shape3::<2, 3, 4>::RANK, 3);
        assert_eq!(Shape3::<2, 3, 4>::size(), 24);
        assert_eq!(Shape2::<5, 0>::size(), 0);
    }

    #[test]
    fn test_exact_constraint() {
        let c = ShapeConstraint::Exact(Shape2::<2, 3>::DIMS);
        assert!(c.check(&[2, 3]).is_ok());
        assert_eq!(
            c.check(&[3, 2]),
            Err(CastError::ShapeMismatch {
                expected: vec![2, 3],
                actual: vec![3, 2],
            })
        );
        assert_eq!(
            c.check(&[2, 3, 1]),
            Err(CastError::RankMismatch {
                expected: 2,
                actual: 3,
            })
        );
    }

    #[test]
    fn test_rank_constraint() {
        let c = ShapeConstraint::Rank(2);
        assert!(c.check(&[7, 9]).is_ok());
        assert!(c.check(&[0, 1]).is_ok());
        assert!(matches!(c.check(&[7]), Err(CastError::RankMismatch { .. })));
        assert!(ShapeConstraint::Any.check(&[]).is_ok());
        assert!(ShapeConstraint::Any.check(&[1, 2, 3, 4, 5]).is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(ShapeConstraint::Exact(&[3, 4]).to_string(), "(3, 4)");
        assert_eq!(ShapeConstraint::Rank(3).to_string(), "(*, *, *)");
        assert_eq!(ShapeConstraint::Exact(&[]).to_string(), "()");
        assert_eq!(ShapeConstraint::Any.to_string(), "*");
    }
}
