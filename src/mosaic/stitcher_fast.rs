//! C7, fast variant: an intersection-chain sweep over per-window candidate
//! bitsets (`SPEC_FULL.md` §4.7, "Fast intersection-chain").

use bitvec::prelude::*;

fn count_and(a: &BitVec, b: &BitVec) -> usize {
    (0..a.len()).filter(|&i| a[i] && b[i]).count()
}

fn bits_and(a: &BitVec, b: &BitVec) -> BitVec {
    (0..a.len()).map(|i| a[i] && b[i]).collect()
}

fn first_set_bit(bits: &BitVec) -> usize {
    bits.iter_ones().next().expect("run-flush singleton must have exactly one set bit")
}

fn singleton_bitset(len: usize, index: usize) -> BitVec {
    let mut bits = bitvec![0; len];
    bits.set(index, true);
    bits
}

/// Runs the intersection-chain sweep in place over `cand` (one `[strand0,
/// strand1]` bitset pair per window, in window order) and returns the
/// per-window committed haplotype pair once every window has been reduced
/// to a singleton on both strands.
pub fn run_fast_stitcher(mut cand: Vec<[BitVec; 2]>) -> Vec<(usize, usize)> {
    let n_windows = cand.len();
    if n_windows == 0 {
        return Vec::new();
    }

    let len = cand[0][0].len();
    let mut surviving = cand[0].clone();
    let mut run_start = [0usize, 0usize];

    for w in 1..n_windows {
        let a = &surviving[0];
        let b = &surviving[1];
        let c = &cand[w][0];
        let d = &cand[w][1];

        let direct_sum = count_and(a, c) + count_and(b, d);
        let crossed_sum = count_and(a, d) + count_and(b, c);
        if crossed_sum > direct_sum {
            cand[w].swap(0, 1);
        }

        for s in 0..2 {
            let next = bits_and(&surviving[s], &cand[w][s]);
            if next.count_ones() == 0 {
                let committed = singleton_bitset(len, first_set_bit(&surviving[s]));
                for w_prime in run_start[s]..w {
                    cand[w_prime][s] = committed.clone();
                }
                run_start[s] = w;
                surviving[s] = cand[w][s].clone();
            } else {
                surviving[s] = next;
            }
        }
    }

    for s in 0..2 {
        let committed = singleton_bitset(len, first_set_bit(&surviving[s]));
        for w_prime in run_start[s]..n_windows {
            cand[w_prime][s] = committed.clone();
        }
    }

    cand.iter()
        .map(|pair| (first_set_bit(&pair[0]), first_set_bit(&pair[1])))
        .collect()
}
