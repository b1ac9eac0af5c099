//! Top-level orchestration: wires C1-C9 together over the two independent
//! parallel axes the design calls for -- windows for C1-C6, individuals for
//! C7-C9 (`SPEC_FULL.md` §5), via a `rayon::prelude::*` fan-out over each
//! axis in turn.

use bitvec::prelude::BitVec;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::config::PhasingConfig;
use crate::errors::PhasingError;
use crate::imputer;
use crate::mosaic::breakpoint::{self, StrandJoin};
use crate::mosaic::{stitcher_dp, stitcher_fast, HaplotypeMosaic, HaplotypeMosaicPair};
use crate::objective;
use crate::progress::{NullProgressSink, ProgressSink};
use crate::quality::{self, QualityScores};
use crate::redundancy::{self, CandidateStructure};
use crate::refinement;
use crate::types::{ReferencePanel, TargetMatrix};
use crate::unique_haplotypes;
use crate::windows::{self, Window};

struct WindowOutput {
    window: Window,
    candidates: Vec<CandidateStructure>,
}

#[derive(Debug, Clone, Copy, Default)]
struct RefinementStats {
    iterations_used: usize,
    converged: bool,
}

/// State that could, in principle, be carried from one chunk into the next
/// so cross-chunk stitching does not start fresh at every boundary. The
/// default entry point (`PhasingEngine::run`) never threads this through;
/// per the design decision on chunk boundaries, a faithful reimplementation
/// replicates the source's per-chunk breakpoint artifact rather than
/// silently repairing it, so `run_chunk` accepts this parameter but
/// currently ignores it.
#[derive(Debug, Clone)]
pub enum StitcherState {
    Fast(Vec<[BitVec; 2]>),
    Dp(Vec<(usize, usize)>),
}

pub struct PhasingOutput {
    pub imputed: Option<Array2<f64>>,
    pub mosaics: Vec<HaplotypeMosaicPair>,
    pub quality: Option<QualityScores>,
}

pub struct PhasingEngine {
    config: PhasingConfig,
    progress: Box<dyn ProgressSink>,
}

impl PhasingEngine {
    pub fn new(config: PhasingConfig) -> Self {
        PhasingEngine {
            config,
            progress: Box::new(NullProgressSink),
        }
    }

    pub fn with_progress(config: PhasingConfig, progress: Box<dyn ProgressSink>) -> Self {
        PhasingEngine { config, progress }
    }

    /// Validates inputs, runs the full C1-C9 pipeline over the entire marker
    /// axis as a single chunk, and returns the finished output. Equivalent
    /// to `run_chunk(panel, raw, None).0`.
    pub fn run(&self, panel: &ReferencePanel, raw: &TargetMatrix) -> Result<PhasingOutput, PhasingError> {
        self.run_chunk(panel, raw, None).map(|(output, _state)| output)
    }

    pub fn run_chunk(
        &self,
        panel: &ReferencePanel,
        raw: &TargetMatrix,
        _carried: Option<StitcherState>,
    ) -> Result<(PhasingOutput, StitcherState), PhasingError> {
        if panel.n_haplotypes() == 0 {
            return Err(PhasingError::EmptyReferencePanel);
        }
        if raw.n_individuals() == 0 {
            return Err(PhasingError::EmptyTargetMatrix);
        }
        if panel.n_haplotypes() % 2 != 0 {
            return Err(PhasingError::InconsistentHaplotypeCount {
                expected: panel.n_haplotypes() + 1,
                found: panel.n_haplotypes(),
            });
        }
        if panel.n_markers() != raw.n_markers() {
            return Err(PhasingError::MarkerCountMismatch {
                target_markers: raw.n_markers(),
                reference_markers: panel.n_markers(),
            });
        }

        let window_list = windows::partition_windows(raw.n_markers(), self.config.width, self.config.flankwidth)?;
        let marker_means = raw.marker_means();
        let n_individuals = raw.n_individuals();

        log::info!(
            "phasing {} individuals over {} windows ({} markers)",
            n_individuals,
            window_list.len(),
            raw.n_markers()
        );

        // A custom-sized pool is only built when the caller asked for one;
        // `n_threads == 0` runs on rayon's global pool, which already defers
        // to `std::thread::available_parallelism`.
        let pool = if self.config.n_threads > 0 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(self.config.n_threads)
                    .build()
                    .map_err(|source| PhasingError::ThreadPoolInit { source })?,
            )
        } else {
            None
        };

        let run_windows = || {
            self.progress.on_phase_start("windows", window_list.len());
            window_list
                .par_iter()
                .map(|&window| {
                    let output = self.process_window(panel, raw, &marker_means, window);
                    self.progress.on_window_done(window.index);
                    output
                })
                .collect::<Vec<WindowOutput>>()
        };
        let window_outputs: Vec<WindowOutput> = match &pool {
            Some(pool) => pool.install(run_windows),
            None => run_windows(),
        };

        let run_individuals = || {
            self.progress.on_phase_start("individuals", n_individuals);
            (0..n_individuals)
                .into_par_iter()
                .map(|individual| {
                    let mosaic = self.stitch_individual(panel, raw, &window_outputs, individual);
                    self.progress.on_individual_done(individual);
                    mosaic
                })
                .collect::<Vec<HaplotypeMosaicPair>>()
        };
        let mosaics: Vec<HaplotypeMosaicPair> = match &pool {
            Some(pool) => pool.install(run_individuals),
            None => run_individuals(),
        };

        let lookups = imputer::lookups_from_mosaics(&mosaics, raw.n_markers());

        let imputed = if self.config.emit_imputed {
            Some(imputer::impute(panel, raw, &lookups, self.config.impute_mode))
        } else {
            None
        };
        let quality = if self.config.emit_quality {
            Some(quality::compute_quality(panel, raw, &lookups))
        } else {
            None
        };

        let carry_state = self.carry_state(&window_outputs, n_individuals);

        Ok((
            PhasingOutput {
                imputed,
                mosaics,
                quality,
            },
            carry_state,
        ))
    }

    fn process_window(
        &self,
        panel: &ReferencePanel,
        raw: &TargetMatrix,
        marker_means: &ndarray::Array1<f64>,
        window: Window,
    ) -> WindowOutput {
        let uniq = unique_haplotypes::build_unique_haplotype_map(panel, &window);
        let sub_h = objective::extract_sub_panel(panel, &window, &uniq.representatives);
        let m = objective::build_m(sub_h.view());
        let mut rng = StdRng::seed_from_u64(self.config.rng_seed ^ window.index as u64);

        let mut candidates = Vec::with_capacity(raw.n_individuals());
        for individual in 0..raw.n_individuals() {
            let raw_col = raw.calls().column(individual).slice(ndarray::s![window.start..window.end]);
            let mean_slice = marker_means.slice(ndarray::s![window.start..window.end]);

            let result = refinement::refine_target(sub_h.view(), &m, raw_col, mean_slice, &self.config);
            let stats = RefinementStats {
                iterations_used: result.iterations_used,
                converged: result.converged,
            };
            log::debug!(
                "window {} individual {}: {} iterations, converged={}",
                window.index,
                individual,
                stats.iterations_used,
                stats.converged
            );

            let structure = if self.config.fast_method {
                let [s0, s1] = redundancy::expand_fast(
                    &uniq,
                    &result.chosen,
                    &uniq.representatives,
                    panel.n_haplotypes(),
                    self.config.unique_only,
                );
                CandidateStructure::Fast { strand0: s0, strand1: s1 }
            } else {
                let pairs = redundancy::expand_dp(
                    &uniq,
                    &result.surviving,
                    &uniq.representatives,
                    self.config.max_candidates,
                    &mut rng,
                );
                CandidateStructure::Dp { pairs }
            };
            candidates.push(structure);
        }

        WindowOutput { window, candidates }
    }

    fn stitch_individual(
        &self,
        panel: &ReferencePanel,
        raw: &TargetMatrix,
        window_outputs: &[WindowOutput],
        individual: usize,
    ) -> HaplotypeMosaicPair {
        if window_outputs.len() == 1 {
            let (i, j) = self.single_window_pair(&window_outputs[0], individual);
            let mut strand0 = HaplotypeMosaic::new();
            strand0.push_segment(0, i);
            let mut strand1 = HaplotypeMosaic::new();
            strand1.push_segment(0, j);
            return HaplotypeMosaicPair { strand0, strand1 };
        }

        let chosen_per_window: Vec<(usize, usize)> = if self.config.fast_method {
            let cand: Vec<[BitVec; 2]> = window_outputs
                .iter()
                .map(|w| match &w.candidates[individual] {
                    CandidateStructure::Fast { strand0, strand1 } => [strand0.clone(), strand1.clone()],
                    CandidateStructure::Dp { .. } => unreachable!("fast_method mismatched with candidate kind"),
                })
                .collect();
            stitcher_fast::run_fast_stitcher(cand)
        } else {
            let cand: Vec<Vec<(usize, usize)>> = window_outputs
                .iter()
                .map(|w| match &w.candidates[individual] {
                    CandidateStructure::Dp { pairs } => pairs.clone(),
                    CandidateStructure::Fast { .. } => unreachable!("fast_method mismatched with candidate kind"),
                })
                .collect();
            stitcher_dp::run_dp_stitcher(&cand, self.config.switch_lambda)
        };

        let mut strand0 = HaplotypeMosaic::new();
        let mut strand1 = HaplotypeMosaic::new();
        let (first_i, first_j) = chosen_per_window[0];
        strand0.push_segment(0, first_i);
        strand1.push_segment(0, first_j);

        let mut current0 = first_i;
        let mut current1 = first_j;

        for w in 1..window_outputs.len() {
            let prev_window = window_outputs[w - 1].window;
            let next_window = window_outputs[w].window;
            let (next_i, next_j) = chosen_per_window[w];

            let join_start = prev_window.start;
            let join_end = next_window.end;
            let raw_slice = raw
                .calls()
                .column(individual)
                .slice(ndarray::s![join_start..join_end])
                .to_owned();
            let col = |hap: usize| panel.haplotypes().slice(ndarray::s![join_start..join_end, hap]).to_owned();

            let outcome = breakpoint::locate_breakpoint(
                raw_slice.view(),
                (current0, current1),
                (next_i, next_j),
                col(current0).view(),
                col(current1).view(),
                col(next_i).view(),
                col(next_j).view(),
            );

            match outcome.strand0 {
                StrandJoin::Continues { .. } => {}
                StrandJoin::Switches { to, breakpoint, .. } => {
                    strand0.push_segment(join_start + breakpoint, to);
                    current0 = to;
                }
            }
            match outcome.strand1 {
                StrandJoin::Continues { .. } => {}
                StrandJoin::Switches { to, breakpoint, .. } => {
                    strand1.push_segment(join_start + breakpoint, to);
                    current1 = to;
                }
            }
        }

        HaplotypeMosaicPair { strand0, strand1 }
    }

    /// Single-window shortcut: no stitching axis exists, so the chosen
    /// representative pair from C4/C5 is expanded straight to a haplotype
    /// pair by first-set-bit (fast) or first candidate (DP).
    fn single_window_pair(&self, window_output: &WindowOutput, individual: usize) -> (usize, usize) {
        match &window_output.candidates[individual] {
            CandidateStructure::Fast { strand0, strand1 } => (
                strand0.iter_ones().next().unwrap_or(0),
                strand1.iter_ones().next().unwrap_or(0),
            ),
            CandidateStructure::Dp { pairs } => pairs.first().copied().unwrap_or((0, 0)),
        }
    }

    fn carry_state(&self, window_outputs: &[WindowOutput], n_individuals: usize) -> StitcherState {
        let last = window_outputs.last();
        match last {
            None => StitcherState::Dp(Vec::new()),
            Some(last) if self.config.fast_method => {
                let mut bitsets = Vec::with_capacity(n_individuals);
                for individual in 0..n_individuals {
                    if let CandidateStructure::Fast { strand0, strand1 } = &last.candidates[individual] {
                        bitsets.push([strand0.clone(), strand1.clone()]);
                    }
                }
                StitcherState::Fast(bitsets)
            }
            Some(last) => {
                let mut pairs = Vec::with_capacity(n_individuals);
                for individual in 0..n_individuals {
                    if let CandidateStructure::Dp { pairs: p } = &last.candidates[individual] {
                        pairs.push(p.first().copied().unwrap_or((0, 0)));
                    }
                }
                StitcherState::Dp(pairs)
            }
        }
    }
}
