//! Tour representation and evaluation.

use std::fmt;
use std::sync::Arc;

use crate::distance::DistanceModel;
use crate::error::{TspError, TspResult};

/// A candidate TSP solution: an ordered sequence of city identifiers with a
/// cached cost.
///
/// A tour visits each of its cities exactly once in sequence, without
/// reconnecting the last city to the first. It is immutable once built and
/// holds a handle to the [`DistanceModel`] it was evaluated against, so a
/// model rebuilt for a new problem instance can never silently change the
/// statistics behind an existing tour.
///
/// The cost is the mean penalized edge distance, normalized by the model's
/// whole-graph average: `Σ d'(cᵢ₋₁, cᵢ) / (avg * (n-1))` where `d'` is the
/// real distance for a present edge and `max * penalty_factor` for a missing
/// one. Normalization always uses the statistics cached in the model at its
/// construction, never statistics recomputed from this tour's cities.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use sparse_tsp::distance::DistanceModel;
/// use sparse_tsp::tour::Tour;
///
/// let model = Arc::new(DistanceModel::from_edges(3, &[(0, 1, 10.0), (1, 2, 30.0)]).unwrap());
/// let tour = Tour::new(vec![0, 1, 2], model);
/// assert_eq!(tour.order(), &[0, 1, 2]);
/// assert_eq!(tour.sum_of_distances(), 40.0);
/// assert!(tour.is_feasible());
/// // (10 + 30) / (20 * 2)
/// assert_eq!(tour.cost(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Tour {
    order: Vec<usize>,
    cost: f64,
    model: Arc<DistanceModel>,
}

impl Tour {
    /// Creates a tour from an ordering of city ids, computing its cost
    /// eagerly.
    ///
    /// # Panics
    ///
    /// Panics if `order` is empty or contains an id outside the model's city
    /// universe.
    pub fn new(order: Vec<usize>, model: Arc<DistanceModel>) -> Self {
        assert!(!order.is_empty(), "a tour must visit at least one city");
        let cost = evaluate_cost(&order, &model);
        Self { order, cost, model }
    }

    /// Creates a tour from an ordering and an already known cost, skipping
    /// recomputation.
    ///
    /// The caller vouches for `cost`; this is the fast path for offspring
    /// whose cost was derived while breeding.
    ///
    /// # Panics
    ///
    /// Panics if `order` is empty.
    pub fn with_cost(order: Vec<usize>, cost: f64, model: Arc<DistanceModel>) -> Self {
        assert!(!order.is_empty(), "a tour must visit at least one city");
        Self { order, cost, model }
    }

    /// The ordered city identifiers of this tour.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Number of cities visited.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always `false`: a tour visits at least one city.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The distance model this tour was evaluated against.
    pub fn model(&self) -> &Arc<DistanceModel> {
        &self.model
    }

    /// The cached normalized cost. A single-city tour has cost 0.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Returns `true` if every consecutive city pair is directly connected.
    pub fn is_feasible(&self) -> bool {
        self.order
            .windows(2)
            .all(|pair| self.model.edge(pair[0], pair[1]).is_some())
    }

    /// Raw sum of consecutive distances, with the model's penalty distance
    /// substituted for missing edges.
    pub fn sum_of_distances(&self) -> f64 {
        self.order
            .windows(2)
            .map(|pair| self.model.distance(pair[0], pair[1]))
            .sum()
    }

    /// Maximum stored distance over all pairs of cities in this tour, not
    /// just consecutive ones. Zero when no pair is connected.
    pub fn max_pair_distance(&self) -> f64 {
        let mut max = 0.0_f64;
        for (i, &a) in self.order.iter().enumerate() {
            for &b in &self.order[i + 1..] {
                if let Some(d) = self.model.edge(a, b) {
                    max = max.max(d);
                }
            }
        }
        max
    }

    /// Mean stored distance over all connected pairs of cities in this tour.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::EmptyGraph`] when no pair of this tour's cities
    /// is connected, since the mean is undefined.
    pub fn avg_pair_distance(&self) -> TspResult<f64> {
        let mut sum = 0.0;
        let mut count = 0_usize;
        for (i, &a) in self.order.iter().enumerate() {
            for &b in &self.order[i + 1..] {
                if let Some(d) = self.model.edge(a, b) {
                    sum += d;
                    count += 1;
                }
            }
        }
        if count == 0 {
            return Err(TspError::EmptyGraph);
        }
        Ok(sum / count as f64)
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sum of distances: {}, cost: {}, feasible: {}, cities: {:?}",
            self.sum_of_distances(),
            self.cost,
            self.is_feasible(),
            self.order
        )
    }
}

/// Penalized edge distance: the real distance for a present edge, otherwise
/// `max_distance * penalty_factor` from the model's whole-graph statistics.
fn penalized_distance(model: &DistanceModel, a: usize, b: usize) -> f64 {
    model
        .edge(a, b)
        .unwrap_or(model.max_distance() * model.penalty_factor())
}

fn evaluate_cost(order: &[usize], model: &DistanceModel) -> f64 {
    let n = order.len();
    if n < 2 {
        return 0.0;
    }
    let sum: f64 = order
        .windows(2)
        .map(|pair| penalized_distance(model, pair[0], pair[1]))
        .sum();
    sum / (model.avg_distance() * (n - 1) as f64)
}
