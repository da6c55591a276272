//! Distance model with one-time aggregate statistics.

use crate::error::{TspError, TspResult};

/// Default multiplier applied to the maximum edge distance to obtain the
/// penalty distance for unconnected city pairs.
pub const DEFAULT_PENALTY_FACTOR: f64 = 2.0;

/// A dense n×n symmetric distance store over a fixed city universe.
///
/// Any non-positive stored value means "no direct edge"; a missing edge is
/// priced at [`default_distance`](Self::default_distance), which sits above
/// every real edge so an optimizer is always pushed away from it. The
/// maximum and average over all present edges are computed once at
/// construction and never change afterward, which makes the model safe to
/// share read-only between any number of tours.
///
/// # Examples
///
/// ```
/// use sparse_tsp::distance::DistanceModel;
///
/// let model = DistanceModel::from_edges(3, &[(0, 1, 10.0), (1, 2, 30.0)]).unwrap();
/// assert_eq!(model.distance(0, 1), 10.0);
/// assert_eq!(model.max_distance(), 30.0);
/// assert_eq!(model.avg_distance(), 20.0);
/// // 0 and 2 are not connected: the penalty distance is substituted.
/// assert_eq!(model.distance(0, 2), 60.0);
/// assert_eq!(model.edge(0, 2), None);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceModel {
    data: Vec<f64>,
    size: usize,
    max_distance: f64,
    avg_distance: f64,
    default_distance: f64,
    penalty_factor: f64,
}

impl DistanceModel {
    /// Builds a model from an explicit n×n row-major grid using the default
    /// penalty factor.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::DimensionMismatch`] if `data.len() != size * size`
    /// and [`TspError::EmptyGraph`] if the grid contains no positive entry.
    pub fn from_matrix(size: usize, data: Vec<f64>) -> TspResult<Self> {
        Self::from_matrix_with_factor(size, data, DEFAULT_PENALTY_FACTOR)
    }

    /// Builds a model from an explicit n×n row-major grid and a penalty
    /// factor.
    ///
    /// The grid is taken as-is: callers are responsible for supplying
    /// symmetric data ([`from_edges`](Self::from_edges) guarantees symmetry
    /// by construction). Statistics are computed from the upper triangle, so
    /// each unordered pair counts once.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::DimensionMismatch`] if `data.len() != size * size`
    /// and [`TspError::EmptyGraph`] if the grid contains no positive entry.
    ///
    /// # Panics
    ///
    /// Panics if `penalty_factor < 1.0`; a smaller factor would price missing
    /// edges below real ones.
    pub fn from_matrix_with_factor(
        size: usize,
        data: Vec<f64>,
        penalty_factor: f64,
    ) -> TspResult<Self> {
        assert!(
            penalty_factor >= 1.0,
            "penalty factor must be at least 1.0, got {penalty_factor}"
        );
        if data.len() != size * size {
            return Err(TspError::DimensionMismatch {
                len: data.len(),
                size,
            });
        }

        let mut max = 0.0_f64;
        let mut sum = 0.0;
        let mut count = 0_usize;
        for i in 0..size {
            for j in (i + 1)..size {
                let d = data[i * size + j];
                if d > 0.0 {
                    max = max.max(d);
                    sum += d;
                    count += 1;
                }
            }
        }
        if count == 0 {
            return Err(TspError::EmptyGraph);
        }

        Ok(Self {
            data,
            size,
            max_distance: max,
            avg_distance: sum / count as f64,
            default_distance: max * penalty_factor,
            penalty_factor,
        })
    }

    /// Builds a model from `(a, b, distance)` triples over a universe of
    /// `size` cities.
    ///
    /// Each edge is stored in both directions. Triples with a non-positive
    /// distance are treated as "no edge" and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::IndexOutOfRange`] if an endpoint is `>= size` and
    /// [`TspError::EmptyGraph`] if no positive edge remains.
    pub fn from_edges(size: usize, edges: &[(usize, usize, f64)]) -> TspResult<Self> {
        let mut data = vec![0.0; size * size];
        for &(a, b, d) in edges {
            for id in [a, b] {
                if id >= size {
                    return Err(TspError::IndexOutOfRange {
                        index: id,
                        len: size,
                    });
                }
            }
            if d > 0.0 {
                data[a * size + b] = d;
                data[b * size + a] = d;
            }
        }
        Self::from_matrix(size, data)
    }

    /// Returns the distance between two cities, substituting the penalty
    /// distance when no direct edge exists.
    ///
    /// # Panics
    ///
    /// Panics if either id is out of range.
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        let d = self.data[a * self.size + b];
        if d > 0.0 {
            d
        } else {
            self.default_distance
        }
    }

    /// Returns the stored distance between two cities if they are directly
    /// connected, `None` otherwise.
    ///
    /// # Panics
    ///
    /// Panics if either id is out of range.
    pub fn edge(&self, a: usize, b: usize) -> Option<f64> {
        let d = self.data[a * self.size + b];
        if d > 0.0 {
            Some(d)
        } else {
            None
        }
    }

    /// Maximum over all present edges.
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Mean over all present edges. Always positive.
    pub fn avg_distance(&self) -> f64 {
        self.avg_distance
    }

    /// Penalty distance substituted for missing edges
    /// (`max_distance * penalty_factor`).
    pub fn default_distance(&self) -> f64 {
        self.default_distance
    }

    /// The multiplier applied to `max_distance` to price missing edges.
    pub fn penalty_factor(&self) -> f64 {
        self.penalty_factor
    }

    /// Number of cities in the universe.
    pub fn city_count(&self) -> usize {
        self.size
    }

    /// Returns `true` if the stored grid is symmetric within the given
    /// tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.data[i * self.size + j] - self.data[j * self.size + i]).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}
