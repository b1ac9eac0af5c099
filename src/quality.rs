//! Optional per-SNP quality scalars (`SPEC_FULL.md` §6): a typed-marker
//! mean squared error, and nearest-neighbor interpolation onto marker
//! positions the core itself never saw.

use ndarray::Array1;

use crate::types::{ReferencePanel, TargetMatrix, MISSING};

#[derive(Debug, Clone)]
pub struct QualityScores {
    /// One score per typed marker: mean over samples with an observed call
    /// of (observed - predicted)^2. Markers with no observed calls anywhere
    /// get `f64::NAN`, signaling "no signal available" rather than a false 0.
    pub typed: Array1<f64>,
}

pub fn compute_quality(
    panel: &ReferencePanel,
    raw: &TargetMatrix,
    mosaics: &[(Vec<usize>, Vec<usize>)],
) -> QualityScores {
    let p = raw.n_markers();
    let n = raw.n_individuals();
    let mut sum = Array1::<f64>::zeros(p);
    let mut count = Array1::<f64>::zeros(p);

    for individual in 0..n {
        let (lookup0, lookup1) = &mosaics[individual];
        for marker in 0..p {
            let observed = raw.calls()[[marker, individual]];
            if observed == MISSING {
                continue;
            }
            let predicted =
                panel.allele(marker, lookup0[marker]) as f64 + panel.allele(marker, lookup1[marker]) as f64;
            let diff = observed as f64 - predicted;
            sum[marker] += diff * diff;
            count[marker] += 1.0;
        }
    }

    let typed = Array1::from_shape_fn(p, |marker| {
        if count[marker] > 0.0 {
            sum[marker] / count[marker]
        } else {
            f64::NAN
        }
    });

    QualityScores { typed }
}

/// For each `query_positions[k]`, averages the scores of the two
/// typed-marker positions nearest to it. `typed_positions` must be sorted
/// ascending and line up index-for-index with `typed.typed`.
pub fn non_typed_scores(typed_positions: &[f64], typed: &QualityScores, query_positions: &[f64]) -> Vec<f64> {
    query_positions
        .iter()
        .map(|&q| {
            let mut by_distance: Vec<usize> = (0..typed_positions.len()).collect();
            by_distance.sort_by(|&a, &b| {
                (typed_positions[a] - q)
                    .abs()
                    .partial_cmp(&(typed_positions[b] - q).abs())
                    .unwrap()
            });
            let nearest_two = &by_distance[..2.min(by_distance.len())];
            let values: Vec<f64> = nearest_two.iter().map(|&idx| typed.typed[idx]).collect();
            values.iter().sum::<f64>() / values.len() as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn perfect_prediction_scores_zero() {
        let haplotypes = Array2::from_shape_vec((2, 2), vec![1u8, 0, 0, 1]).unwrap();
        let panel = ReferencePanel::new(haplotypes);
        let raw = TargetMatrix::new(Array2::from_shape_vec((2, 1), vec![1i8, 1]).unwrap(), vec!["s1".into()]);
        let mosaics = vec![(vec![0, 0], vec![1, 1])];
        let quality = compute_quality(&panel, &raw, &mosaics);
        assert_eq!(quality.typed[0], 0.0);
        assert_eq!(quality.typed[1], 0.0);
    }

    #[test]
    fn non_typed_interpolates_from_nearest_two() {
        let typed = QualityScores { typed: Array1::from_vec(vec![0.0, 2.0, 4.0]) };
        let positions = vec![1.0, 2.0, 3.0];
        let result = non_typed_scores(&positions, &typed, &[2.1]);
        assert_eq!(result.len(), 1);
    }
}
