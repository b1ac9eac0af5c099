//! The marker-major matrices the core operates over (`SPEC_FULL.md` §3).

use ndarray::{Array1, Array2};

/// Sentinel for a missing target entry in the raw `i8` genotype encoding.
pub const MISSING: i8 = -1;

/// Target genotypes: markers x individuals, entries in {0,1,2} or `MISSING`.
#[derive(Debug, Clone)]
pub struct TargetMatrix {
    pub(crate) calls: Array2<i8>,
    pub(crate) sample_ids: Vec<String>,
}

impl TargetMatrix {
    pub fn new(calls: Array2<i8>, sample_ids: Vec<String>) -> Self {
        assert_eq!(
            calls.ncols(),
            sample_ids.len(),
            "sample_ids must have one entry per column of calls"
        );
        TargetMatrix { calls, sample_ids }
    }

    pub fn n_markers(&self) -> usize {
        self.calls.nrows()
    }

    pub fn n_individuals(&self) -> usize {
        self.calls.ncols()
    }

    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    pub fn calls(&self) -> &Array2<i8> {
        &self.calls
    }

    pub fn is_missing(&self, marker: usize, individual: usize) -> bool {
        self.calls[[marker, individual]] == MISSING
    }

    /// Per-marker mean dosage across observed individuals (2 x alt-allele
    /// frequency). Markers with no observed calls at all fall back to 1.0,
    /// the midpoint of {0,1,2}.
    pub fn marker_means(&self) -> Array1<f64> {
        let p = self.n_markers();
        let n = self.n_individuals();
        let mut means = Array1::zeros(p);
        for marker in 0..p {
            let mut sum = 0.0;
            let mut count = 0usize;
            for individual in 0..n {
                let v = self.calls[[marker, individual]];
                if v != MISSING {
                    sum += v as f64;
                    count += 1;
                }
            }
            means[marker] = if count > 0 { sum / count as f64 } else { 1.0 };
        }
        means
    }
}

/// Reference haplotypes: markers x haplotypes, entries in {0,1}. The number
/// of haplotypes is twice the number of reference individuals.
#[derive(Debug, Clone)]
pub struct ReferencePanel {
    pub(crate) haplotypes: Array2<u8>,
}

impl ReferencePanel {
    pub fn new(haplotypes: Array2<u8>) -> Self {
        ReferencePanel { haplotypes }
    }

    pub fn n_markers(&self) -> usize {
        self.haplotypes.nrows()
    }

    pub fn n_haplotypes(&self) -> usize {
        self.haplotypes.ncols()
    }

    pub fn haplotypes(&self) -> &Array2<u8> {
        &self.haplotypes
    }

    pub fn allele(&self, marker: usize, haplotype: usize) -> u8 {
        self.haplotypes[[marker, haplotype]]
    }
}
