//! Axis-aligned bounds of a layout

use kindred_domain::Position;
use serde::{Deserialize, Serialize};

/// Box enclosing every laid-out position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Smallest coordinate on each axis
    pub min: Position,

    /// Largest coordinate on each axis
    pub max: Position,

    /// Midpoint of `min` and `max`
    pub center: Position,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            min: Position::zeros(),
            max: Position::zeros(),
            center: Position::zeros(),
        }
    }
}

impl BoundingBox {
    /// Bounds of a set of points; all zeros when there are none
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Position>,
    {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Self::default();
        };

        let (min, max) = points.fold((*first, *first), |(min, max), p| (min.inf(p), max.sup(p)));
        Self {
            min,
            max,
            center: (min + max) / 2.0,
        }
    }

    /// Extent along each axis
    pub fn size(&self) -> Position {
        self.max - self.min
    }
}
