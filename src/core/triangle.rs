use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Rejected side lengths: non-positive, or failing the strict triangle
/// inequality on some pairing. Degenerate (flat) triangles are rejected too.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("invalid triangle sides: a={a}, b={b}, c={c}")]
pub struct InvalidSidesError {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriangleKind {
    Equilateral,
    Isosceles,
    Scalene,
}

impl fmt::Display for TriangleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriangleKind::Equilateral => write!(f, "equilateral"),
            TriangleKind::Isosceles => write!(f, "isosceles"),
            TriangleKind::Scalene => write!(f, "scalene"),
        }
    }
}

/// A validated triangle. Construction is the only way to get one, so every
/// `Triangle` satisfies the strict triangle inequality with positive sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangle {
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, InvalidSidesError> {
        if a <= 0.0 || b <= 0.0 || c <= 0.0 || a + b <= c || a + c <= b || b + c <= a {
            return Err(InvalidSidesError { a, b, c });
        }
        Ok(Self { a, b, c })
    }

    /// Classification precedence: all sides equal, then exactly two, then
    /// none.
    pub fn kind(&self) -> TriangleKind {
        if self.a == self.b && self.b == self.c {
            TriangleKind::Equilateral
        } else if self.a == self.b || self.a == self.c || self.b == self.c {
            TriangleKind::Isosceles
        } else {
            TriangleKind::Scalene
        }
    }

    pub fn perimeter(&self) -> f64 {
        self.a + self.b + self.c
    }

    pub fn sides(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }
}

/// One-call form of the classifier.
pub fn classify(a: f64, b: f64, c: f64) -> Result<TriangleKind, InvalidSidesError> {
    Triangle::new(a, b, c).map(|t| t.kind())
}

/// Perimeter of validated sides.
pub fn perimeter(a: f64, b: f64, c: f64) -> Result<f64, InvalidSidesError> {
    Triangle::new(a, b, c).map(|t| t.perimeter())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equilateral() {
        let t = Triangle::new(3.0, 3.0, 3.0).unwrap();
        assert_eq!(t.kind(), TriangleKind::Equilateral);
        assert_eq!(t.perimeter(), 9.0);
    }

    #[test]
    fn test_isosceles() {
        let t = Triangle::new(5.0, 5.0, 8.0).unwrap();
        assert_eq!(t.kind(), TriangleKind::Isosceles);
    }

    #[test]
    fn test_isosceles_any_position() {
        assert_eq!(classify(5.0, 8.0, 5.0).unwrap(), TriangleKind::Isosceles);
        assert_eq!(classify(8.0, 5.0, 5.0).unwrap(), TriangleKind::Isosceles);
    }

    #[test]
    fn test_scalene() {
        assert_eq!(classify(6.0, 7.0, 8.0).unwrap(), TriangleKind::Scalene);
    }

    #[test]
    fn test_inequality_violation() {
        assert_eq!(
            classify(1.0, 1.0, 3.0),
            Err(InvalidSidesError {
                a: 1.0,
                b: 1.0,
                c: 3.0
            })
        );
    }

    #[test]
    fn test_degenerate_is_rejected() {
        // 1 + 2 == 3, collinear points.
        assert!(classify(1.0, 2.0, 3.0).is_err());
        assert!(classify(3.0, 1.0, 2.0).is_err());
    }

    #[test]
    fn test_non_positive_sides() {
        assert!(classify(0.0, 1.0, 1.0).is_err());
        assert!(classify(1.0, -1.0, 1.0).is_err());
        assert!(classify(-3.0, -3.0, -3.0).is_err());
    }

    #[test]
    fn test_perimeter_requires_valid_sides() {
        assert!(perimeter(1.0, 1.0, 3.0).is_err());
        assert_eq!(perimeter(6.0, 7.0, 8.0).unwrap(), 21.0);
    }

    #[test]
    fn test_idempotent() {
        let first = classify(5.0, 5.0, 8.0).unwrap();
        let second = classify(5.0, 5.0, 8.0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fractional_sides() {
        assert_eq!(classify(0.5, 0.5, 0.5).unwrap(), TriangleKind::Equilateral);
        assert_eq!(classify(2.5, 3.5, 4.5).unwrap(), TriangleKind::Scalene);
    }
}
