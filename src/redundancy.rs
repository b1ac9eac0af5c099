//! C6: expands a window's representative-space result back out to full
//! reference-haplotype indices, either as per-strand bitsets (fed to the
//! fast stitcher) or as a capped list of haplotype-pair candidates (fed to
//! the DP stitcher) (`SPEC_FULL.md` §4.6).

use bitvec::prelude::*;
use itertools::iproduct;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::SeedableRng;
use std::collections::HashSet;

use crate::pair_search::CandidatePair;
use crate::unique_haplotypes::UniqueHaplotypeMap;

#[derive(Debug, Clone)]
pub enum CandidateStructure {
    /// One bitset per strand over the full haplotype index space.
    Fast { strand0: BitVec, strand1: BitVec },
    /// A deduplicated, capped list of (haplotype_a, haplotype_b) candidates.
    Dp { pairs: Vec<(usize, usize)> },
}

fn class_members(uniq: &UniqueHaplotypeMap, representative: usize) -> Vec<usize> {
    uniq.class_label
        .iter()
        .enumerate()
        .filter_map(|(col, &rep)| if rep == representative { Some(col) } else { None })
        .collect()
}

/// Expands the chosen representative pair into two full-width bitsets, one
/// per strand. `unique_only` skips expansion and keeps only the
/// representative haplotype itself on each strand.
pub fn expand_fast(
    uniq: &UniqueHaplotypeMap,
    chosen: &CandidatePair,
    representatives: &[usize],
    n_total_haplotypes: usize,
    unique_only: bool,
) -> [BitVec; 2] {
    let rep_i = representatives[chosen.i];
    let rep_j = representatives[chosen.j];

    let mut strand0 = bitvec![0; n_total_haplotypes];
    let mut strand1 = bitvec![0; n_total_haplotypes];

    if unique_only {
        strand0.set(rep_i, true);
        strand1.set(rep_j, true);
    } else {
        for col in class_members(uniq, rep_i) {
            strand0.set(col, true);
        }
        for col in class_members(uniq, rep_j) {
            strand1.set(col, true);
        }
    }

    [strand0, strand1]
}

/// Expands every surviving representative pair into the cartesian product of
/// their equivalence classes, dedups, and uniformly samples down to
/// `max_candidates` if the product overflows it. `rng` should be seeded once
/// per window task (`rng_seed XOR window_index`) so sampling is deterministic
/// yet independent across windows run in parallel.
pub fn expand_dp(
    uniq: &UniqueHaplotypeMap,
    surviving: &[CandidatePair],
    representatives: &[usize],
    max_candidates: usize,
    rng: &mut StdRng,
) -> Vec<(usize, usize)> {
    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    let mut pairs = Vec::new();

    for pair in surviving {
        let rep_i = representatives[pair.i];
        let rep_j = representatives[pair.j];
        let members_i = class_members(uniq, rep_i);
        let members_j = class_members(uniq, rep_j);

        for (a, b) in iproduct!(members_i, members_j) {
            let key = if a <= b { (a, b) } else { (b, a) };
            if seen.insert(key) {
                pairs.push(key);
            }
        }
    }

    if pairs.len() <= max_candidates {
        return pairs;
    }

    let chosen_indices = sample(rng, pairs.len(), max_candidates);
    let mut sampled: Vec<(usize, usize)> = chosen_indices.into_iter().map(|idx| pairs[idx]).collect();
    sampled.sort_unstable();
    sampled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniq_with_classes(class_label: Vec<usize>) -> UniqueHaplotypeMap {
        let representatives: Vec<usize> = class_label
            .iter()
            .copied()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let mut representatives = representatives;
        representatives.sort_unstable();
        UniqueHaplotypeMap {
            window_start: 0,
            window_end: 1,
            class_label,
            representatives,
        }
    }

    #[test]
    fn unique_only_sets_a_single_bit_per_strand() {
        let uniq = uniq_with_classes(vec![0, 0, 2, 2]);
        let chosen = CandidatePair { i: 0, j: 1, score: 0.0 };
        let representatives = vec![0, 2];
        let [s0, s1] = expand_fast(&uniq, &chosen, &representatives, 4, true);
        assert_eq!(s0.count_ones(), 1);
        assert_eq!(s1.count_ones(), 1);
        assert!(s0[0]);
        assert!(s1[2]);
    }

    #[test]
    fn full_expansion_sets_every_class_member() {
        let uniq = uniq_with_classes(vec![0, 0, 2, 2]);
        let chosen = CandidatePair { i: 0, j: 1, score: 0.0 };
        let representatives = vec![0, 2];
        let [s0, s1] = expand_fast(&uniq, &chosen, &representatives, 4, false);
        assert_eq!(s0.count_ones(), 2);
        assert_eq!(s1.count_ones(), 2);
    }

    #[test]
    fn dp_expansion_dedups_and_caps() {
        let uniq = uniq_with_classes(vec![0, 0, 0, 2, 2, 2]);
        let surviving = vec![CandidatePair { i: 0, j: 1, score: 0.0 }];
        let representatives = vec![0, 2];
        let mut rng = StdRng::seed_from_u64(42);
        let pairs = expand_dp(&uniq, &surviving, &representatives, 4, &mut rng);
        assert_eq!(pairs.len(), 4);
        let mut dedup = pairs.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(dedup.len(), pairs.len());
    }
}
