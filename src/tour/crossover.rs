//! Order crossover (OX) for tours.
//!
//! OX copies a contiguous slice from the first parent and fills the remaining
//! positions from the second parent's relative order, skipping cities already
//! copied. The child therefore visits exactly the cities its parents visit.
//!
//! # Reference
//!
//! Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains".

use std::sync::Arc;

use rand::Rng;

use crate::error::{TspError, TspResult};

use super::tour::Tour;

impl Tour {
    /// Breeds one child from `self` and `other` with order crossover.
    ///
    /// A segment `[begin, end]` with `begin < end` is drawn uniformly from
    /// the caller's random source (colliding draws are resampled), copied
    /// from `self`, and the remaining positions are filled left to right from
    /// `other`. Parents of length 1 have no segment to split; the child is a
    /// copy of `self`.
    ///
    /// The explicit `rng` makes the operator reproducible: a fixed seed and
    /// fixed parents yield an identical child on every run.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::IncompatibleParents`] if the parents differ in
    /// length, are bound to different distance models, or do not visit the
    /// same city set.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    /// use sparse_tsp::distance::DistanceModel;
    /// use sparse_tsp::tour::Tour;
    ///
    /// let model = Arc::new(DistanceModel::from_edges(
    ///     4,
    ///     &[(0, 1, 1.0), (1, 2, 2.0), (2, 3, 3.0), (3, 0, 4.0)],
    /// ).unwrap());
    /// let p1 = Tour::new(vec![0, 1, 2, 3], Arc::clone(&model));
    /// let p2 = Tour::new(vec![3, 1, 0, 2], Arc::clone(&model));
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let child = p1.crossover(&p2, &mut rng).unwrap();
    /// let mut cities = child.order().to_vec();
    /// cities.sort();
    /// assert_eq!(cities, vec![0, 1, 2, 3]);
    /// ```
    pub fn crossover<R: Rng>(&self, other: &Tour, rng: &mut R) -> TspResult<Tour> {
        self.check_compatible(other)?;
        let n = self.len();
        if n < 2 {
            return Ok(self.clone());
        }
        let (begin, end) = draw_segment(n, rng);
        self.build_child(other, begin, end)
    }

    /// Breeds one child from an explicit crossover segment `[begin, end]`,
    /// both ends inclusive.
    ///
    /// This is the deterministic entry point behind [`Tour::crossover`]; it
    /// is also useful for replaying a recorded draw. A segment spanning the
    /// whole tour is legal and yields a copy of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::DegenerateInterval`] if `begin >= end`,
    /// [`TspError::IndexOutOfRange`] if `end` is past the tour, and
    /// [`TspError::IncompatibleParents`] as for [`crossover`](Tour::crossover).
    pub fn crossover_between(&self, other: &Tour, begin: usize, end: usize) -> TspResult<Tour> {
        self.check_compatible(other)?;
        if begin >= end {
            return Err(TspError::DegenerateInterval { begin, end });
        }
        if end >= self.len() {
            return Err(TspError::IndexOutOfRange {
                index: end,
                len: self.len(),
            });
        }
        self.build_child(other, begin, end)
    }

    fn check_compatible(&self, other: &Tour) -> TspResult<()> {
        if self.len() != other.len() || !Arc::ptr_eq(self.model(), other.model()) {
            return Err(TspError::IncompatibleParents {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(())
    }

    /// Segment bounds are assumed valid here.
    fn build_child(&self, other: &Tour, begin: usize, end: usize) -> TspResult<Tour> {
        let n = self.len();
        let universe = self.model().city_count();
        let mut order = vec![0; n];
        let mut copied = vec![false; universe];
        let mut in_first = vec![false; universe];

        for &city in self.order() {
            in_first[city] = true;
        }
        for i in begin..=end {
            let city = self.order()[i];
            order[i] = city;
            copied[city] = true;
        }

        // One left-to-right scan of the second parent feeds first the slots
        // before the segment, then the slots after it. Cities the first
        // parent never visits are filtered out, so a mismatched city set
        // leaves the donor short and is reported instead of producing a
        // non-permutation child.
        let mismatch = TspError::IncompatibleParents { left: n, right: n };
        let mut donor = other
            .order()
            .iter()
            .copied()
            .filter(|&c| in_first[c] && !copied[c]);
        for i in (0..begin).chain(end + 1..n) {
            order[i] = donor.next().ok_or(mismatch.clone())?;
        }
        if donor.next().is_some() {
            return Err(mismatch);
        }

        Ok(Tour::new(order, Arc::clone(self.model())))
    }
}

/// Draws `begin < end` uniformly over `[0, n-1]`, resampling colliding
/// draws. Requires `n >= 2`, which makes a valid pair reachable.
fn draw_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    loop {
        let a = rng.random_range(0..n);
        let b = rng.random_range(0..n);
        if a < b {
            return (a, b);
        }
        if b < a {
            return (b, a);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use crate::distance::DistanceModel;

    fn sample_model() -> Arc<DistanceModel> {
        Arc::new(
            DistanceModel::from_edges(
                5,
                &[(1, 3, 15.0), (2, 3, 35.0), (2, 4, 25.0), (3, 4, 30.0)],
            )
            .expect("valid graph"),
        )
    }

    /// Complete graph over `n` cities for permutation-focused tests.
    fn complete_model(n: usize) -> Arc<DistanceModel> {
        let mut edges = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                edges.push((i, j, (i + j + 1) as f64));
            }
        }
        Arc::new(DistanceModel::from_edges(n, &edges).expect("valid graph"))
    }

    #[test]
    fn test_crossover_between_middle_segment() {
        let model = sample_model();
        let p1 = Tour::new(vec![1, 4, 2, 3], Arc::clone(&model));
        let p2 = Tour::new(vec![3, 1, 2, 4], model);

        // Segment [1, 2] copies 4 and 2; the scan of p2 yields 3, then 1.
        let child = p1.crossover_between(&p2, 1, 2).expect("valid parents");
        assert_eq!(child.order(), &[3, 4, 2, 1]);
    }

    #[test]
    fn test_crossover_between_prefix_segment() {
        let model = sample_model();
        let p1 = Tour::new(vec![1, 4, 2, 3], Arc::clone(&model));
        let p2 = Tour::new(vec![3, 1, 2, 4], model);

        let child = p1.crossover_between(&p2, 0, 1).expect("valid parents");
        assert_eq!(child.order(), &[1, 4, 3, 2]);
    }

    #[test]
    fn test_crossover_between_full_span_copies_first_parent() {
        let model = sample_model();
        let p1 = Tour::new(vec![1, 4, 2, 3], Arc::clone(&model));
        let p2 = Tour::new(vec![3, 1, 2, 4], model);

        let child = p1.crossover_between(&p2, 0, 3).expect("valid parents");
        assert_eq!(child.order(), p1.order());
    }

    #[test]
    fn test_crossover_child_cost_matches_eager_evaluation() {
        let model = sample_model();
        let p1 = Tour::new(vec![1, 4, 2, 3], Arc::clone(&model));
        let p2 = Tour::new(vec![3, 1, 2, 4], Arc::clone(&model));

        let child = p1.crossover_between(&p2, 1, 2).expect("valid parents");
        let reference = Tour::new(child.order().to_vec(), model);
        assert_eq!(child.cost(), reference.cost());
    }

    #[test]
    fn test_degenerate_interval_rejected() {
        let model = sample_model();
        let p1 = Tour::new(vec![1, 4, 2, 3], Arc::clone(&model));
        let p2 = Tour::new(vec![3, 1, 2, 4], model);

        assert_eq!(
            p1.crossover_between(&p2, 2, 2).unwrap_err(),
            TspError::DegenerateInterval { begin: 2, end: 2 }
        );
        assert_eq!(
            p1.crossover_between(&p2, 3, 1).unwrap_err(),
            TspError::DegenerateInterval { begin: 3, end: 1 }
        );
    }

    #[test]
    fn test_segment_end_out_of_range() {
        let model = sample_model();
        let p1 = Tour::new(vec![1, 4, 2, 3], Arc::clone(&model));
        let p2 = Tour::new(vec![3, 1, 2, 4], model);

        assert_eq!(
            p1.crossover_between(&p2, 1, 4).unwrap_err(),
            TspError::IndexOutOfRange { index: 4, len: 4 }
        );
    }

    #[test]
    fn test_parents_of_different_length_rejected() {
        let model = sample_model();
        let p1 = Tour::new(vec![1, 4, 2, 3], Arc::clone(&model));
        let p2 = Tour::new(vec![3, 1, 2], Arc::clone(&model));
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            p1.crossover(&p2, &mut rng).unwrap_err(),
            TspError::IncompatibleParents { left: 4, right: 3 }
        );
    }

    #[test]
    fn test_parents_of_different_models_rejected() {
        let p1 = Tour::new(vec![1, 4, 2, 3], sample_model());
        let p2 = Tour::new(vec![3, 1, 2, 4], sample_model());
        let mut rng = StdRng::seed_from_u64(1);

        // Two separately built models are distinct epochs even with equal data.
        assert_eq!(
            p1.crossover(&p2, &mut rng).unwrap_err(),
            TspError::IncompatibleParents { left: 4, right: 4 }
        );
    }

    #[test]
    fn test_parents_over_disjoint_city_sets_rejected() {
        let model = complete_model(6);
        let p1 = Tour::new(vec![0, 1, 2], Arc::clone(&model));
        let p2 = Tour::new(vec![3, 4, 5], model);

        assert!(matches!(
            p1.crossover_between(&p2, 0, 1),
            Err(TspError::IncompatibleParents { .. })
        ));
    }

    #[test]
    fn test_single_city_parents() {
        let model = sample_model();
        let p1 = Tour::new(vec![3], Arc::clone(&model));
        let p2 = Tour::new(vec![3], model);
        let mut rng = StdRng::seed_from_u64(9);

        let child = p1.crossover(&p2, &mut rng).expect("valid parents");
        assert_eq!(child.order(), &[3]);
    }

    #[test]
    fn test_crossover_is_deterministic_under_fixed_seed() {
        let model = sample_model();
        let p1 = Tour::new(vec![1, 4, 2, 3], Arc::clone(&model));
        let p2 = Tour::new(vec![3, 1, 2, 4], model);

        let mut first = StdRng::seed_from_u64(42);
        let mut second = StdRng::seed_from_u64(42);
        let a = p1.crossover(&p2, &mut first).expect("valid parents");
        let b = p1.crossover(&p2, &mut second).expect("valid parents");
        assert_eq!(a.order(), b.order());
        assert_eq!(a.cost(), b.cost());
    }

    #[test]
    fn test_draw_segment_is_ordered() {
        let mut rng = StdRng::seed_from_u64(3);
        for n in 2..20 {
            for _ in 0..50 {
                let (begin, end) = draw_segment(n, &mut rng);
                assert!(begin < end);
                assert!(end < n);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_child_is_permutation_of_parents(
            n in 2usize..12,
            shuffle_seed in any::<u64>(),
            draw_seed in any::<u64>(),
        ) {
            let model = complete_model(n);
            let mut rng = StdRng::seed_from_u64(shuffle_seed);

            let mut first: Vec<usize> = (0..n).collect();
            first.shuffle(&mut rng);
            let mut second: Vec<usize> = (0..n).collect();
            second.shuffle(&mut rng);

            let p1 = Tour::new(first, Arc::clone(&model));
            let p2 = Tour::new(second, model);

            let mut draw_rng = StdRng::seed_from_u64(draw_seed);
            let child = p1.crossover(&p2, &mut draw_rng).expect("valid parents");

            let mut cities = child.order().to_vec();
            cities.sort_unstable();
            let expected: Vec<usize> = (0..n).collect();
            prop_assert_eq!(cities, expected);
        }
    }
}
