//! # sparse-tsp
//!
//! Tour representation and genetic operators for the Traveling Salesman
//! Problem over sparse, partially connected city graphs. Missing edges are
//! priced with a penalty distance derived from the graph's maximum edge, so
//! an optimizer is always steered toward feasible tours.
//!
//! ## Modules
//!
//! - [`distance`] — Distance model with one-time max/avg/penalty statistics
//! - [`tour`] — Tour type (cost, feasibility, pair statistics) and order crossover
//! - [`error`] — Error and result types
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use sparse_tsp::distance::DistanceModel;
//! use sparse_tsp::tour::Tour;
//!
//! // Three cities where only 0-1 and 1-2 are connected.
//! let model = Arc::new(DistanceModel::from_edges(3, &[(0, 1, 10.0), (1, 2, 20.0)]).unwrap());
//!
//! let tour = Tour::new(vec![0, 1, 2], Arc::clone(&model));
//! assert!(tour.is_feasible());
//! assert!(tour.cost() > 0.0);
//!
//! let detour = Tour::new(vec![0, 2, 1], Arc::clone(&model));
//! assert!(!detour.is_feasible());
//! assert!(detour.cost() > tour.cost());
//! ```

pub mod distance;
pub mod error;
pub mod tour;
