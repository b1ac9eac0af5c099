//! C8: given the (possibly differing) haplotype pairs selected for two
//! adjacent windows, decides whether either strand actually switched and,
//! if so, at exactly which marker (`SPEC_FULL.md` §4.8).
//!
//! All breakpoints here are expressed as a 0-based *count of leading
//! markers that keep the old haplotype*, over the joined `raw`/`old`/`new`
//! range of length `L`. `b = 0` means the switch happens immediately at the
//! start of the range; `b = L` means the old haplotype covers the whole
//! range and no switch should be recorded.

use ndarray::ArrayView1;

use crate::types::MISSING;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrandJoin {
    /// The strand's haplotype is unchanged across the join.
    Continues { haplotype: usize },
    /// The strand switches haplotype at the given breakpoint (see module docs).
    Switches {
        from: usize,
        to: usize,
        breakpoint: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinOutcome {
    pub strand0: StrandJoin,
    pub strand1: StrandJoin,
}

fn effective(raw: ArrayView1<i8>, baseline: &[f64]) -> Vec<Option<f64>> {
    raw.iter()
        .zip(baseline.iter())
        .map(|(&r, &b)| if r == MISSING { None } else { Some(r as f64 - b) })
        .collect()
}

fn zero_baseline(len: usize) -> Vec<f64> {
    vec![0.0; len]
}

/// Finds the breakpoint minimizing sum-of-squares error against `effective`,
/// where `effective[p]` already has any fixed-strand contribution removed.
/// Observed-missing positions (`None`) never contribute. Ties favor the
/// lowest breakpoint.
fn search_single_breakpoint(
    effective_target: &[Option<f64>],
    old: ArrayView1<u8>,
    new: ArrayView1<u8>,
) -> (usize, f64) {
    let l = effective_target.len();

    let new_err: Vec<f64> = (0..l)
        .map(|p| match effective_target[p] {
            Some(t) => {
                let d = t - new[p] as f64;
                d * d
            }
            None => 0.0,
        })
        .collect();
    let old_minus_new: Vec<f64> = (0..l)
        .map(|p| match effective_target[p] {
            Some(t) => {
                let d_old = t - old[p] as f64;
                let d_new = t - new[p] as f64;
                d_old * d_old - d_new * d_new
            }
            None => 0.0,
        })
        .collect();

    let total_if_all_new: f64 = new_err.iter().sum();

    let mut prefix = 0.0;
    let mut best_b = 0;
    let mut best_cost = total_if_all_new;
    for b in 0..=l {
        let cost = total_if_all_new + prefix;
        if cost < best_cost {
            best_cost = cost;
            best_b = b;
        }
        if b < l {
            prefix += old_minus_new[b];
        }
    }
    (best_b, best_cost)
}

fn search_double_breakpoint(
    raw: ArrayView1<i8>,
    old_a: ArrayView1<u8>,
    new_a: ArrayView1<u8>,
    old_b: ArrayView1<u8>,
    new_b: ArrayView1<u8>,
) -> (usize, usize, f64) {
    let l = raw.len();
    let zero = zero_baseline(l);
    let base_target = effective(raw, &zero);

    let mut best = (l, l, f64::INFINITY);
    for b1 in 0..=l {
        let contrib_a: Vec<f64> = (0..l).map(|p| if p < b1 { old_a[p] as f64 } else { new_a[p] as f64 }).collect();
        let residual: Vec<Option<f64>> = base_target
            .iter()
            .zip(contrib_a.iter())
            .map(|(t, &a)| t.map(|v| v - a))
            .collect();
        let (b2, cost) = search_single_breakpoint(&residual, old_b, new_b);
        if cost < best.2 {
            best = (b1, b2, cost);
        }
    }
    best
}

/// `raw`, and the four haplotype columns, must all already be sliced to the
/// exact joined marker range shared by the two adjacent windows.
pub fn locate_breakpoint(
    raw: ArrayView1<i8>,
    prev: (usize, usize),
    next: (usize, usize),
    col_prev0: ArrayView1<u8>,
    col_prev1: ArrayView1<u8>,
    col_next0: ArrayView1<u8>,
    col_next1: ArrayView1<u8>,
) -> JoinOutcome {
    let (i, j) = prev;
    let (k, l) = next;

    if i == k && j == l {
        return JoinOutcome {
            strand0: StrandJoin::Continues { haplotype: i },
            strand1: StrandJoin::Continues { haplotype: j },
        };
    }
    if i == l && j == k {
        return JoinOutcome {
            strand0: StrandJoin::Continues { haplotype: i },
            strand1: StrandJoin::Continues { haplotype: j },
        };
    }

    let matches = [i == k, i == l, j == k, j == l];
    if matches.iter().filter(|&&m| m).count() == 1 {
        if i == k {
            let fixed = effective(raw, &col_prev0.iter().map(|&v| v as f64).collect::<Vec<_>>());
            let (b, _) = search_single_breakpoint(&fixed, col_prev1, col_next1);
            return JoinOutcome {
                strand0: StrandJoin::Continues { haplotype: i },
                strand1: StrandJoin::Switches { from: j, to: l, breakpoint: b },
            };
        }
        if i == l {
            let fixed = effective(raw, &col_prev0.iter().map(|&v| v as f64).collect::<Vec<_>>());
            let (b, _) = search_single_breakpoint(&fixed, col_prev1, col_next0);
            return JoinOutcome {
                strand0: StrandJoin::Continues { haplotype: i },
                strand1: StrandJoin::Switches { from: j, to: k, breakpoint: b },
            };
        }
        if j == k {
            let fixed = effective(raw, &col_prev1.iter().map(|&v| v as f64).collect::<Vec<_>>());
            let (b, _) = search_single_breakpoint(&fixed, col_prev0, col_next1);
            return JoinOutcome {
                strand0: StrandJoin::Switches { from: i, to: l, breakpoint: b },
                strand1: StrandJoin::Continues { haplotype: j },
            };
        }
        // j == l
        let fixed = effective(raw, &col_prev1.iter().map(|&v| v as f64).collect::<Vec<_>>());
        let (b, _) = search_single_breakpoint(&fixed, col_prev0, col_next0);
        return JoinOutcome {
            strand0: StrandJoin::Switches { from: i, to: k, breakpoint: b },
            strand1: StrandJoin::Continues { haplotype: j },
        };
    }

    let (b1_direct, b2_direct, cost_direct) =
        search_double_breakpoint(raw, col_prev0, col_next0, col_prev1, col_next1);
    let (b1_crossed, b2_crossed, cost_crossed) =
        search_double_breakpoint(raw, col_prev0, col_next1, col_prev1, col_next0);

    if cost_direct <= cost_crossed {
        JoinOutcome {
            strand0: StrandJoin::Switches { from: i, to: k, breakpoint: b1_direct },
            strand1: StrandJoin::Switches { from: j, to: l, breakpoint: b2_direct },
        }
    } else {
        JoinOutcome {
            strand0: StrandJoin::Switches { from: i, to: l, breakpoint: b1_crossed },
            strand1: StrandJoin::Switches { from: j, to: k, breakpoint: b2_crossed },
        }
    }
}
