//! Cross-window mosaic assembly (C7 + C8): stitches per-window candidate
//! structures into a per-strand sequence of haplotype segments and locates
//! the exact marker at which each switch occurs (`SPEC_FULL.md` §4.7-4.8).

pub mod breakpoint;
pub mod stitcher_dp;
pub mod stitcher_fast;

/// One committed run of a strand: `haplotype_index` applies from
/// `start_marker` up to (but not including) the next segment's
/// `start_marker`, or the end of the marker axis for the last segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicSegment {
    pub start_marker: usize,
    pub haplotype_index: usize,
}

/// A single strand's finalized mosaic. `segments` is kept strictly
/// increasing in `start_marker`; the first segment always starts at 0.
#[derive(Debug, Clone, Default)]
pub struct HaplotypeMosaic {
    pub segments: Vec<MosaicSegment>,
}

impl HaplotypeMosaic {
    pub fn new() -> Self {
        HaplotypeMosaic { segments: Vec::new() }
    }

    /// Appends a segment, skipping it entirely if its haplotype matches the
    /// immediately preceding segment (no breakpoint was actually found).
    pub fn push_segment(&mut self, start_marker: usize, haplotype_index: usize) {
        if let Some(last) = self.segments.last() {
            if last.haplotype_index == haplotype_index {
                return;
            }
        }
        self.segments.push(MosaicSegment {
            start_marker,
            haplotype_index,
        });
    }

    /// The reference haplotype index in effect at `marker`, found by binary
    /// search over segment start positions.
    pub fn haplotype_at(&self, marker: usize) -> Option<usize> {
        if self.segments.is_empty() {
            return None;
        }
        match self.segments.binary_search_by_key(&marker, |s| s.start_marker) {
            Ok(idx) => Some(self.segments[idx].haplotype_index),
            Err(0) => None,
            Err(idx) => Some(self.segments[idx - 1].haplotype_index),
        }
    }
}

/// Two mosaics (strand 0, strand 1) for one individual. The unordered set
/// `{strand0, strand1}` is what carries meaning; the 0/1 labeling is fixed
/// once, arbitrarily, at the first window (first-set-bit convention) and
/// must never be read as maternal/paternal.
#[derive(Debug, Clone, Default)]
pub struct HaplotypeMosaicPair {
    pub strand0: HaplotypeMosaic,
    pub strand1: HaplotypeMosaic,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haplotype_at_finds_the_active_segment() {
        let mut mosaic = HaplotypeMosaic::new();
        mosaic.push_segment(0, 5);
        mosaic.push_segment(4, 7);
        assert_eq!(mosaic.haplotype_at(0), Some(5));
        assert_eq!(mosaic.haplotype_at(3), Some(5));
        assert_eq!(mosaic.haplotype_at(4), Some(7));
        assert_eq!(mosaic.haplotype_at(100), Some(7));
    }

    #[test]
    fn repeated_haplotype_collapses_to_one_segment() {
        let mut mosaic = HaplotypeMosaic::new();
        mosaic.push_segment(0, 2);
        mosaic.push_segment(4, 2);
        assert_eq!(mosaic.segments.len(), 1);
    }
}
