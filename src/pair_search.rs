//! C3: scans the upper triangle of the objective to select, per target, a
//! candidate set of haplotype-index pairs over representatives only
//! (`SPEC_FULL.md` §4.3, tie-break policies in §9).

use ndarray::{Array1, Array2};

use crate::config::PairSearchPolicy;
use crate::objective;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidatePair {
    /// Representative-space indices (columns of H-tilde), i <= j.
    pub i: usize,
    pub j: usize,
    pub score: f64,
}

/// Emission order is (j outer, i inner), i <= j, as required for C3/C4's
/// tie-break rule (lower (j,i) lexicographic precedence).
pub fn search_pairs(m: &Array2<f64>, n: &Array1<f64>, policy: PairSearchPolicy) -> Vec<CandidatePair> {
    let d = n.len();
    let mut all = Vec::with_capacity(d * (d + 1) / 2);
    for j in 0..d {
        for i in 0..=j {
            all.push(CandidatePair {
                i,
                j,
                score: objective::score(m, n, i, j),
            });
        }
    }

    match policy {
        PairSearchPolicy::BestOnly => {
            let best = all.iter().map(|c| c.score).fold(f64::INFINITY, f64::min);
            match all.into_iter().find(|c| c.score == best) {
                Some(c) => vec![c],
                None => Vec::new(),
            }
        }
        PairSearchPolicy::AllEqualBest => {
            let best = all.iter().map(|c| c.score).fold(f64::INFINITY, f64::min);
            all.into_iter().filter(|c| c.score == best).collect()
        }
        PairSearchPolicy::BestSoFarTrail => {
            let mut best = f64::INFINITY;
            let mut trail = Vec::new();
            for c in all {
                if c.score <= best {
                    best = best.min(c.score);
                    trail.push(c);
                }
            }
            trail
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m_n() -> (Array2<f64>, Array1<f64>) {
        // Three representatives; construct scores that make pair (0,1) best,
        // (0,0) tie with a later pair, others worse.
        let m = Array2::from_shape_vec((3, 3), vec![4.0, 2.0, 5.0, 2.0, 4.0, 2.0, 5.0, 2.0, 4.0]).unwrap();
        let n = Array1::from_vec(vec![2.0, 2.0, 0.0]);
        (m, n)
    }

    #[test]
    fn best_so_far_trail_is_monotonic_non_worsening() {
        let (m, n) = m_n();
        let trail = search_pairs(&m, &n, PairSearchPolicy::BestSoFarTrail);
        let mut best = f64::INFINITY;
        for c in &trail {
            assert!(c.score <= best);
            best = best.min(c.score);
        }
        assert!(!trail.is_empty());
    }

    #[test]
    fn best_only_keeps_a_single_pair() {
        let (m, n) = m_n();
        let best = search_pairs(&m, &n, PairSearchPolicy::BestOnly);
        assert_eq!(best.len(), 1);
    }

    #[test]
    fn all_equal_best_keeps_every_tie() {
        let m = Array2::from_shape_vec((2, 2), vec![0.0, 0.0, 0.0, 0.0]).unwrap();
        let n = Array1::from_vec(vec![0.0, 0.0]);
        let all_best = search_pairs(&m, &n, PairSearchPolicy::AllEqualBest);
        // pairs (0,0), (0,1), (1,1) all score 0
        assert_eq!(all_best.len(), 3);
    }
}
