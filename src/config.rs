//! Recognized configuration options (`SPEC_FULL.md` §6) and the tie-break
//! policy toggle described in the design notes (§9).

use serde::{Deserialize, Serialize};

fn default_width() -> usize {
    400
}

fn default_flankwidth() -> usize {
    default_width() / 10
}

fn default_max_candidates() -> usize {
    1000
}

fn default_max_iters() -> usize {
    1
}

fn default_tolfun() -> f64 {
    1e-3
}

fn default_switch_lambda() -> f64 {
    1.0
}

fn default_rng_seed() -> u64 {
    0xC0FFEE
}

/// The three tie-break policies the pair-search kernel (C3) can run under.
/// The source this was distilled from toggles between these via commented-out
/// branches; here they are a first-class strategy parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairSearchPolicy {
    /// Keep only the single best-scoring pair (first occurrence on ties).
    BestOnly,
    /// Keep every pair tying the best score found over the full scan.
    AllEqualBest,
    /// Keep every pair whose score did not exceed the best seen up to that
    /// point in the scan ("best-so-far trail"). Default; feeds C5.
    BestSoFarTrail,
}

impl Default for PairSearchPolicy {
    fn default() -> Self {
        PairSearchPolicy::BestSoFarTrail
    }
}

/// Whether C9 preserves observed target entries or lets the selected pair's
/// dosage overwrite them too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImputeMode {
    PreserveObserved,
    OverwriteAll,
}

impl Default for ImputeMode {
    fn default() -> Self {
        ImputeMode::PreserveObserved
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhasingConfig {
    /// Window size in markers.
    pub width: usize,
    /// Symmetric flanking overlap used only for the C1 equivalence test.
    pub flankwidth: usize,
    /// true selects the fast intersection-chain stitcher (C7); false selects
    /// the dynamic-programming-over-candidate-pairs stitcher.
    pub fast_method: bool,
    /// Skip C6 redundancy expansion; mosaics are chosen among representatives
    /// directly.
    pub unique_only: bool,
    /// Upper bound on the DP variant's per-window candidate-pair list.
    pub max_candidates: usize,
    /// Bound on C4 refinement rounds.
    pub max_iters: usize,
    /// Convergence tolerance for C4's |obj - obj_prev| < tolfun*(|obj_prev|+1) check.
    pub tolfun: f64,
    /// C9 policy: preserve observed genotypes or overwrite with the mosaic's
    /// predicted dosage everywhere.
    pub impute_mode: ImputeMode,
    /// Tie-break/retention policy for C3.
    pub pair_search_policy: PairSearchPolicy,
    /// Linear weighting applied to the DP stitcher's switch cost.
    pub switch_lambda: f64,
    /// Seed for the DP candidate-cap sampler (§9 open question); combined
    /// with a window's index so window tasks stay independent under
    /// parallel execution while remaining reproducible.
    pub rng_seed: u64,
    /// Worker-pool size; 0 defers to `std::thread::available_parallelism`.
    pub n_threads: usize,
    /// Whether `PhasingEngine::run` should also produce an imputed X'.
    pub emit_imputed: bool,
    /// Whether `PhasingEngine::run` should also produce per-SNP quality scalars.
    pub emit_quality: bool,
}

impl Default for PhasingConfig {
    fn default() -> Self {
        PhasingConfig {
            width: default_width(),
            flankwidth: default_flankwidth(),
            fast_method: true,
            unique_only: false,
            max_candidates: default_max_candidates(),
            max_iters: default_max_iters(),
            tolfun: default_tolfun(),
            impute_mode: ImputeMode::default(),
            pair_search_policy: PairSearchPolicy::default(),
            switch_lambda: default_switch_lambda(),
            rng_seed: default_rng_seed(),
            n_threads: 0,
            emit_imputed: true,
            emit_quality: false,
        }
    }
}
