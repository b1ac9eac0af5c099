//! Window-based haplotype-pair phasing and imputation engine.
//!
//! Given a panel of fully-phased reference haplotypes and a set of
//! unphased, partially-missing target genotypes observed at the same
//! biallelic markers, reconstructs each target individual's two haplotypes
//! as a mosaic of reference-panel segments and imputes every missing
//! allele from that mosaic. Variant-file I/O, ancestry estimation, and
//! posterior-probability output are explicitly out of scope; see
//! [`provider`] for the boundary callers are expected to implement.

pub mod config;
pub mod engine;
pub mod errors;
pub mod imputer;
pub mod mosaic;
pub mod objective;
pub mod pair_search;
pub mod progress;
pub mod provider;
pub mod quality;
pub mod redundancy;
pub mod refinement;
pub mod rescorer;
pub mod types;
pub mod unique_haplotypes;
pub mod windows;

pub use config::{ImputeMode, PairSearchPolicy, PhasingConfig};
pub use engine::{PhasingEngine, PhasingOutput, StitcherState};
pub use errors::PhasingError;
pub use mosaic::{HaplotypeMosaic, HaplotypeMosaicPair, MosaicSegment};
pub use types::{ReferencePanel, TargetMatrix, MISSING};
