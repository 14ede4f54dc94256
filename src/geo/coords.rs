//! Nested coordinate arrays as declared by child features.
//!
//! Children declare coordinates the way GeoJSON writes them: a position is
//! an array of numbers, a line is an array of positions, and so on. The
//! nesting is not checked when building geometries; it only matters when a
//! geometry is converted to typed GeoJSON.

use geo_types::{Coord, LineString, MultiPolygon, Point, Polygon};
use serde::{Deserialize, Serialize};

/// An arbitrarily nested coordinate array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordinateTree {
    /// A single ordinate (longitude, latitude, altitude...)
    Scalar(f64),
    /// An ordered list of nested coordinates
    Nested(Vec<CoordinateTree>),
}

impl Default for CoordinateTree {
    fn default() -> Self {
        CoordinateTree::Nested(Vec::new())
    }
}

impl CoordinateTree {
    /// Number of top-level entries. A scalar has none.
    pub fn len(&self) -> usize {
        match self {
            CoordinateTree::Scalar(_) => 0,
            CoordinateTree::Nested(items) => items.len(),
        }
    }

    /// Returns true if there are no top-level entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Nesting depth: 0 for a scalar, 1 for a position, 2 for a line...
    ///
    /// An empty list counts as depth 1. Ragged trees report their deepest
    /// branch.
    pub fn depth(&self) -> usize {
        match self {
            CoordinateTree::Scalar(_) => 0,
            CoordinateTree::Nested(items) => {
                1 + items.iter().map(CoordinateTree::depth).max().unwrap_or(0)
            }
        }
    }

    fn children(&self) -> Option<&[CoordinateTree]> {
        match self {
            CoordinateTree::Scalar(_) => None,
            CoordinateTree::Nested(items) => Some(items),
        }
    }

    fn scalar(&self) -> Option<f64> {
        match self {
            CoordinateTree::Scalar(v) => Some(*v),
            CoordinateTree::Nested(_) => None,
        }
    }

    /// Reads this tree as a single position (`[x, y, ...]`).
    pub fn to_position(&self) -> Option<Vec<f64>> {
        let items = self.children()?;
        if items.len() < 2 {
            return None;
        }
        items.iter().map(CoordinateTree::scalar).collect()
    }

    /// Reads this tree as a list of positions.
    pub fn to_positions(&self) -> Option<Vec<Vec<f64>>> {
        self.children()?
            .iter()
            .map(CoordinateTree::to_position)
            .collect()
    }

    /// Reads this tree as a list of rings (a polygon).
    pub fn to_rings(&self) -> Option<Vec<Vec<Vec<f64>>>> {
        self.children()?
            .iter()
            .map(CoordinateTree::to_positions)
            .collect()
    }

    /// Reads this tree as a list of polygons.
    pub fn to_polygons(&self) -> Option<Vec<Vec<Vec<Vec<f64>>>>> {
        self.children()?
            .iter()
            .map(CoordinateTree::to_rings)
            .collect()
    }
}

impl From<f64> for CoordinateTree {
    fn from(value: f64) -> Self {
        CoordinateTree::Scalar(value)
    }
}

impl From<[f64; 2]> for CoordinateTree {
    fn from([x, y]: [f64; 2]) -> Self {
        CoordinateTree::Nested(vec![x.into(), y.into()])
    }
}

impl<T: Into<CoordinateTree>> From<Vec<T>> for CoordinateTree {
    fn from(items: Vec<T>) -> Self {
        CoordinateTree::Nested(items.into_iter().map(Into::into).collect())
    }
}

impl From<Coord<f64>> for CoordinateTree {
    fn from(coord: Coord<f64>) -> Self {
        [coord.x, coord.y].into()
    }
}

impl From<Point<f64>> for CoordinateTree {
    fn from(point: Point<f64>) -> Self {
        point.0.into()
    }
}

impl From<&LineString<f64>> for CoordinateTree {
    fn from(line: &LineString<f64>) -> Self {
        CoordinateTree::Nested(line.coords().map(|c| (*c).into()).collect())
    }
}

impl From<&Polygon<f64>> for CoordinateTree {
    fn from(polygon: &Polygon<f64>) -> Self {
        let rings = std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .map(CoordinateTree::from)
            .collect();
        CoordinateTree::Nested(rings)
    }
}

impl From<&MultiPolygon<f64>> for CoordinateTree {
    fn from(polygons: &MultiPolygon<f64>) -> Self {
        CoordinateTree::Nested(polygons.0.iter().map(CoordinateTree::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{coord, line_string, polygon};

    #[test]
    fn test_depth_and_len() {
        let point = CoordinateTree::from([1.0, 2.0]);
        assert_eq!(point.depth(), 1);
        assert_eq!(point.len(), 2);

        let line = CoordinateTree::from(vec![[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]]);
        assert_eq!(line.depth(), 2);
        assert_eq!(line.len(), 3);

        assert_eq!(CoordinateTree::Scalar(4.0).depth(), 0);
        assert_eq!(CoordinateTree::Scalar(4.0).len(), 0);
        assert!(CoordinateTree::default().is_empty());
    }

    #[test]
    fn test_deserializes_from_nested_json() {
        let tree: CoordinateTree = serde_json::from_str("[[[0, 0], [1, 0], [1, 1], [0, 0]]]").unwrap();
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.len(), 1);

        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, "[[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,0.0]]]");
    }

    #[test]
    fn test_strict_extraction() {
        let line = CoordinateTree::from(vec![[0.0, 0.0], [1.0, 1.0]]);
        assert_eq!(
            line.to_positions(),
            Some(vec![vec![0.0, 0.0], vec![1.0, 1.0]])
        );
        assert_eq!(line.to_position(), None);
        assert_eq!(line.to_rings(), None);

        // A bare number list is a position, not a line
        let point = CoordinateTree::from(vec![3.0, 4.0]);
        assert_eq!(point.to_position(), Some(vec![3.0, 4.0]));
        assert_eq!(point.to_positions(), None);
    }

    #[test]
    fn test_from_geo_types() {
        let coord = coord! { x: -93.6, y: 41.6 };
        assert_eq!(CoordinateTree::from(coord), CoordinateTree::from([-93.6, 41.6]));

        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)];
        assert_eq!(CoordinateTree::from(&line).depth(), 2);

        let poly = polygon![
            (x: 0.0, y: 0.0),
            (x: 4.0, y: 0.0),
            (x: 4.0, y: 4.0),
            (x: 0.0, y: 0.0)
        ];
        let tree = CoordinateTree::from(&poly);
        assert_eq!(tree.depth(), 3);
        // Exterior ring only; geo-types closes it
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.to_rings().map(|r| r[0].len()), Some(4));

        let multi = MultiPolygon::new(vec![poly.clone(), poly]);
        let tree = CoordinateTree::from(&multi);
        assert_eq!(tree.depth(), 4);
        assert_eq!(tree.len(), 2);
    }
}
