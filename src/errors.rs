//! Error taxonomy for the phasing core.
//!
//! Only configuration-level problems are modeled as hard errors (see
//! `SPEC_FULL.md` §7): everything else the windowed pass or the stitcher
//! can run into (empty intersections, ties, exhausted refinement rounds)
//! is handled by design and never surfaces here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhasingError {
    #[error(
        "target matrix has {target_markers} markers but reference panel has {reference_markers}; \
         marker alignment must be enforced before the core runs"
    )]
    MarkerCountMismatch {
        target_markers: usize,
        reference_markers: usize,
    },

    #[error("reference panel is empty (zero haplotypes)")]
    EmptyReferencePanel,

    #[error("target matrix has zero individuals")]
    EmptyTargetMatrix,

    #[error("window width {width} exceeds marker count {markers}; zero windows would result")]
    ZeroWindows { width: usize, markers: usize },

    #[error("reference panel has an odd haplotype count ({found}); expected an even number (2 x reference individuals)")]
    InconsistentHaplotypeCount { expected: usize, found: usize },

    #[error("provider failed: {0}")]
    Provider(#[from] anyhow::Error),

    #[error("failed to build the requested worker pool: {source}")]
    ThreadPoolInit {
        #[source]
        source: rayon::ThreadPoolBuildError,
    },
}
