//! Tours and the order crossover operator.
//!
//! A [`Tour`] is an ordered sequence of city identifiers evaluated against a
//! shared [`DistanceModel`](crate::distance::DistanceModel). Offspring tours
//! are bred with order crossover (OX), which preserves the permutation
//! invariant: the child visits exactly the cities its parents visit.

mod crossover;
mod tour;

pub use tour::Tour;
