//! C9: walks each individual's finalized mosaic and fills in missing target
//! entries from the two selected reference columns at every marker
//! (`SPEC_FULL.md` §4.9).

use ndarray::Array2;

use crate::config::ImputeMode;
use crate::mosaic::HaplotypeMosaic;
use crate::types::{ReferencePanel, TargetMatrix, MISSING};

/// Expands a mosaic's segment list into one haplotype index per marker, in a
/// single forward sweep rather than a binary search per marker.
fn build_lookup(mosaic: &HaplotypeMosaic, n_markers: usize) -> Vec<usize> {
    let mut lookup = vec![0usize; n_markers];
    let mut seg_idx = 0usize;
    let mut current = mosaic.segments.first().map(|s| s.haplotype_index).unwrap_or(0);
    for marker in 0..n_markers {
        while seg_idx + 1 < mosaic.segments.len() && mosaic.segments[seg_idx + 1].start_marker <= marker {
            seg_idx += 1;
            current = mosaic.segments[seg_idx].haplotype_index;
        }
        lookup[marker] = current;
    }
    lookup
}

/// Produces X': the target matrix with every missing entry filled from the
/// two strand contributions, and (per `mode`) observed entries either kept
/// or overwritten the same way.
pub fn impute(
    panel: &ReferencePanel,
    raw: &TargetMatrix,
    mosaics: &[(Vec<usize>, Vec<usize>)],
    mode: ImputeMode,
) -> Array2<f64> {
    let p = raw.n_markers();
    let n = raw.n_individuals();
    let mut out = Array2::zeros((p, n));

    for individual in 0..n {
        let (lookup0, lookup1) = &mosaics[individual];
        for marker in 0..p {
            let predicted =
                panel.allele(marker, lookup0[marker]) as f64 + panel.allele(marker, lookup1[marker]) as f64;
            let observed = raw.calls()[[marker, individual]];
            out[[marker, individual]] = if observed == MISSING {
                predicted
            } else {
                match mode {
                    ImputeMode::PreserveObserved => observed as f64,
                    ImputeMode::OverwriteAll => predicted,
                }
            };
        }
    }
    out
}

/// Builds the per-individual `(strand0_lookup, strand1_lookup)` pair from
/// finalized mosaics, ready for [`impute`].
pub fn lookups_from_mosaics(mosaics: &[crate::mosaic::HaplotypeMosaicPair], n_markers: usize) -> Vec<(Vec<usize>, Vec<usize>)> {
    mosaics
        .iter()
        .map(|pair| (build_lookup(&pair.strand0, n_markers), build_lookup(&pair.strand1, n_markers)))
        .collect()
}
