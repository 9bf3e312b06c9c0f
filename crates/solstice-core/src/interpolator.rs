//! Piecewise-linear lookup over a sorted key table.

/// Sorted `key -> value` control points with linear interpolation between them.
///
/// Keys are kept strictly ascending; setting an existing key overwrites its
/// value. Lookups left of the first key return the first value, lookups right
/// of the last key return the last value, and an empty table yields `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interpolator {
    points: Vec<(f32, f32)>,
}

impl Interpolator {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(key, value)` pairs in any order.
    #[must_use]
    pub fn from_points(points: &[(f32, f32)]) -> Self {
        let mut interpolator = Self::new();
        for &(key, value) in points {
            interpolator.set(key, value);
        }
        interpolator
    }

    /// Insert a control point, replacing the value of an equal key.
    pub fn set(&mut self, key: f32, value: f32) {
        match self
            .points
            .binary_search_by(|(existing, _)| existing.total_cmp(&key))
        {
            Ok(index) => self.points[index].1 = value,
            Err(index) => self.points.insert(index, (key, value)),
        }
    }

    /// Remove all control points.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Number of control points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the table has no control points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Control points in ascending key order.
    pub fn points(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.points.iter().copied()
    }

    /// Interpolated value at `position`.
    #[must_use]
    pub fn value_at(&self, position: f32) -> f32 {
        let mut left: Option<(f32, f32)> = None;

        for &(key, value) in &self.points {
            if key < position {
                left = Some((key, value));
                continue;
            }

            return match left {
                None => value,
                Some((left_key, left_value)) => {
                    let t = (position - left_key) / (key - left_key);
                    left_value + (value - left_value) * t
                },
            };
        }

        left.map_or(0.0, |(_, value)| value)
    }
}
