//! C2: builds the dense M (haplotype x haplotype) and per-target N row used
//! to score every ordered representative pair (`SPEC_FULL.md` §4.2).

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::types::ReferencePanel;
use crate::windows::Window;

/// Extracts H-tilde: the window's (non-flanked) rows restricted to the
/// representative columns, in representative order.
pub fn extract_sub_panel(panel: &ReferencePanel, window: &Window, representatives: &[usize]) -> Array2<u8> {
    let full = panel
        .haplotypes()
        .slice(ndarray::s![window.start..window.end, ..]);
    let mut sub = Array2::zeros((window.width(), representatives.len()));
    for (out_col, &rep) in representatives.iter().enumerate() {
        sub.column_mut(out_col).assign(&full.column(rep));
    }
    sub
}

/// M[i,j] = ||h_i||^2 + ||h_j||^2 + 2 h_i.h_j for i<j; M[j,j] = 4||h_j||^2.
/// Filled symmetrically so callers can index either order.
pub fn build_m(sub_h: ArrayView2<u8>) -> Array2<f64> {
    let d = sub_h.ncols();
    let col_sq: Vec<f64> = (0..d)
        .map(|c| sub_h.column(c).iter().map(|&v| (v as f64) * (v as f64)).sum())
        .collect();

    let mut m = Array2::zeros((d, d));
    for j in 0..d {
        for i in 0..=j {
            if i == j {
                m[[j, j]] = 4.0 * col_sq[j];
            } else {
                let dot: f64 = sub_h
                    .column(i)
                    .iter()
                    .zip(sub_h.column(j).iter())
                    .map(|(&a, &b)| (a as f64) * (b as f64))
                    .sum();
                let val = col_sq[i] + col_sq[j] + 2.0 * dot;
                m[[i, j]] = val;
                m[[j, i]] = val;
            }
        }
    }
    m
}

/// N[i] = 2 * Xfloat_col . h_i, recomputed each refinement round since
/// Xfloat (unlike M) changes as missing entries get re-imputed.
pub fn n_row(xfloat_col: ArrayView1<f64>, sub_h: ArrayView2<u8>) -> Array1<f64> {
    let d = sub_h.ncols();
    let mut n = Array1::zeros(d);
    for i in 0..d {
        let dot: f64 = xfloat_col
            .iter()
            .zip(sub_h.column(i).iter())
            .map(|(&x, &h)| x * (h as f64))
            .sum();
        n[i] = 2.0 * dot;
    }
    n
}

/// score(k,i,j) = M[i,j] - N[k,i] - N[k,j], the sum-of-squares error of
/// hypothesizing pair (i,j) up to a constant independent of (i,j).
pub fn score(m: &Array2<f64>, n: &Array1<f64>, i: usize, j: usize) -> f64 {
    m[[i, j]] - n[i] - n[j]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn m_diagonal_is_four_times_norm() {
        let sub_h = Array2::from_shape_vec((3, 1), vec![1u8, 1, 0]).unwrap();
        let m = build_m(sub_h.view());
        assert_eq!(m[[0, 0]], 8.0); // norm = 2 (two 1s), 4*2 = 8
    }
}
