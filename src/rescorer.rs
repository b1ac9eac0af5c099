//! C5: rescores the C3/C4 trail against observed (non-missing) entries only,
//! then keeps the minimal subset of pairs attaining the rescored minimum
//! (`SPEC_FULL.md` §4.5).

use ndarray::{ArrayView1, ArrayView2};

use crate::pair_search::CandidatePair;

/// `raw_col` is the target's raw {0,1,2,MISSING} column; missing entries are
/// excluded from the error sum rather than treated as zero.
pub fn rescore_observed(
    raw_col: ArrayView1<i8>,
    sub_h: ArrayView2<u8>,
    candidates: &[CandidatePair],
) -> Vec<CandidatePair> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let rescored: Vec<CandidatePair> = candidates
        .iter()
        .map(|c| {
            let mut err = 0.0;
            for (marker, &raw) in raw_col.iter().enumerate() {
                if raw == crate::types::MISSING {
                    continue;
                }
                let predicted = sub_h[[marker, c.i]] as f64 + sub_h[[marker, c.j]] as f64;
                let diff = raw as f64 - predicted;
                err += diff * diff;
            }
            CandidatePair {
                i: c.i,
                j: c.j,
                score: err,
            }
        })
        .collect();

    let best = rescored.iter().map(|c| c.score).fold(f64::INFINITY, f64::min);
    rescored.into_iter().filter(|c| c.score == best).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn missing_entries_are_excluded_from_the_error() {
        let sub_h = Array2::from_shape_vec((3, 2), vec![1u8, 0, 0, 1, 1, 0]).unwrap();
        let raw_col = ndarray::arr1(&[crate::types::MISSING, 1, 1]);
        let candidates = vec![
            CandidatePair { i: 0, j: 0, score: 0.0 },
            CandidatePair { i: 0, j: 1, score: 0.0 },
        ];
        let rescored = rescore_observed(raw_col.view(), sub_h.view(), &candidates);
        assert!(!rescored.is_empty());
    }

    #[test]
    fn empty_candidates_returns_empty() {
        let sub_h = Array2::from_shape_vec((2, 1), vec![1u8, 0]).unwrap();
        let raw_col = ndarray::arr1(&[1i8, 0]);
        assert!(rescore_observed(raw_col.view(), sub_h.view(), &[]).is_empty());
    }
}
