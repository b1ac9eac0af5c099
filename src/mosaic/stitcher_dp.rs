//! C7, dynamic-programming variant: a Viterbi-style pass over ordered-pair
//! candidate lists, minimizing total switch cost (`SPEC_FULL.md` §4.7,
//! "Dynamic-programming").

/// 0 if both haplotypes carry over (in either orientation), 1 if exactly one
/// strand carries over, 2 if neither does.
fn switch_cost(prev: (usize, usize), next: (usize, usize)) -> usize {
    let (i, j) = prev;
    let (k, l) = next;
    if (i == k && j == l) || (i == l && j == k) {
        0
    } else if i == k || i == l || j == k || j == l {
        1
    } else {
        2
    }
}

/// `candidates[w]` is window w's list of (haplotype_a, haplotype_b)
/// candidate pairs. Returns the chosen pair per window minimizing the total
/// weighted switch cost across the chain. Ties favor the lowest-indexed
/// candidate, both within a window's list and across predecessor choices.
pub fn run_dp_stitcher(candidates: &[Vec<(usize, usize)>], switch_lambda: f64) -> Vec<(usize, usize)> {
    let n_windows = candidates.len();
    if n_windows == 0 {
        return Vec::new();
    }
    if candidates.iter().any(|c| c.is_empty()) {
        // A window with no candidates cannot be bridged; callers are expected
        // to guarantee at least one candidate per window (C6 never empties a
        // non-empty representative trail).
        return candidates
            .iter()
            .map(|c| *c.first().unwrap_or(&(0, 0)))
            .collect();
    }

    // dp[w][idx] = (best cumulative cost ending at candidates[w][idx], backpointer index in w-1)
    let mut dp: Vec<Vec<(f64, Option<usize>)>> = Vec::with_capacity(n_windows);
    dp.push(candidates[0].iter().map(|_| (0.0, None)).collect());

    for w in 1..n_windows {
        let mut row = Vec::with_capacity(candidates[w].len());
        for (idx, &cand) in candidates[w].iter().enumerate() {
            let mut best_cost = f64::INFINITY;
            let mut best_prev = 0usize;
            for (prev_idx, &prev_cand) in candidates[w - 1].iter().enumerate() {
                let (prev_cost, _) = dp[w - 1][prev_idx];
                let cost = prev_cost + switch_lambda * switch_cost(prev_cand, cand) as f64;
                if cost < best_cost {
                    best_cost = cost;
                    best_prev = prev_idx;
                }
            }
            let _ = idx;
            row.push((best_cost, Some(best_prev)));
        }
        dp.push(row);
    }

    let last = n_windows - 1;
    let mut best_idx = 0usize;
    let mut best_cost = f64::INFINITY;
    for (idx, &(cost, _)) in dp[last].iter().enumerate() {
        if cost < best_cost {
            best_cost = cost;
            best_idx = idx;
        }
    }

    let mut path_idx = vec![0usize; n_windows];
    path_idx[last] = best_idx;
    for w in (1..n_windows).rev() {
        let (_, back) = dp[w][path_idx[w]];
        path_idx[w - 1] = back.unwrap_or(0);
    }

    (0..n_windows).map(|w| candidates[w][path_idx[w]]).collect()
}
