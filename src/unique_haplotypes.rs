//! C1: groups reference columns into equivalence classes by exact equality
//! on a window's (flanked) rows (`SPEC_FULL.md` §4.1).

use indexmap::IndexMap;

use crate::types::ReferencePanel;
use crate::windows::Window;

/// One per window. `class_label[col]` is the representative (lowest) column
/// index among every column identical to `col` on this window's flanked
/// rows; `representatives` is the ascending, deduplicated list of those
/// representative indices.
#[derive(Debug, Clone)]
pub struct UniqueHaplotypeMap {
    pub window_start: usize,
    pub window_end: usize,
    pub class_label: Vec<usize>,
    pub representatives: Vec<usize>,
}

pub fn build_unique_haplotype_map(panel: &ReferencePanel, window: &Window) -> UniqueHaplotypeMap {
    let flanked = panel
        .haplotypes()
        .slice(ndarray::s![window.flank_start..window.flank_end, ..]);
    let d = flanked.ncols();

    let mut class_label = vec![usize::MAX; d];
    // `IndexMap` preserves first-insertion order, which is already ascending
    // by column index since columns are scanned 0..d in order: the
    // representative list falls out without a separate sort.
    let mut first_seen: IndexMap<Vec<u8>, usize> = IndexMap::new();
    for col in 0..d {
        let column: Vec<u8> = flanked.column(col).to_vec();
        let rep = *first_seen.entry(column).or_insert(col);
        class_label[col] = rep;
    }

    let representatives: Vec<usize> = first_seen.values().copied().collect();

    UniqueHaplotypeMap {
        window_start: window.start,
        window_end: window.end,
        class_label,
        representatives,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn panel_from_columns(columns: &[&[u8]]) -> ReferencePanel {
        let p = columns[0].len();
        let d = columns.len();
        let mut arr = Array2::zeros((p, d));
        for (col, values) in columns.iter().enumerate() {
            for (row, &v) in values.iter().enumerate() {
                arr[[row, col]] = v;
            }
        }
        ReferencePanel::new(arr)
    }

    #[test]
    fn identical_columns_share_lowest_representative() {
        let panel = panel_from_columns(&[&[0, 0, 1, 1], &[1, 1, 0, 0], &[0, 0, 1, 1]]);
        let window = Window {
            index: 0,
            start: 0,
            end: 4,
            flank_start: 0,
            flank_end: 4,
        };
        let uniq = build_unique_haplotype_map(&panel, &window);
        assert_eq!(uniq.class_label, vec![0, 1, 0]);
        assert_eq!(uniq.representatives, vec![0, 1]);
    }
}
