#![allow(non_snake_case)]

use hapmosaic::{PhasingConfig, PhasingEngine, ReferencePanel, TargetMatrix};
use ndarray::Array2;

/// Reuses the double-switch fixture (two independent breakpoints, one per
/// strand) purely to check the universal mosaic-shape invariants from
/// SPEC_FULL.md §8: start-markers strictly increasing per strand, the first
/// segment starting at marker 0, and the imputed output reconstructible
/// directly from the mosaic's own haplotype assignment at every marker.
#[test]
fn start_markers_are_strictly_increasing_and_imputed_output_matches_the_mosaic() {
    let local0 = [0u8, 0, 0];
    let local1 = [1u8, 1, 0];
    let local2 = [0u8, 1, 1];
    let local3 = [1u8, 0, 1];

    let mut col0 = Vec::new();
    let mut col1 = Vec::new();
    let mut col2 = Vec::new();
    let mut col3 = Vec::new();
    for _ in 0..2 {
        col0.extend_from_slice(&local0);
        col1.extend_from_slice(&local1);
        col2.extend_from_slice(&local2);
        col3.extend_from_slice(&local3);
    }

    let p = 6;
    let mut h = Array2::zeros((p, 4));
    for row in 0..p {
        h[[row, 0]] = col0[row];
        h[[row, 1]] = col1[row];
        h[[row, 2]] = col2[row];
        h[[row, 3]] = col3[row];
    }
    let panel = ReferencePanel::new(h.clone());

    let mut x = Vec::with_capacity(p);
    for row in 0..3 {
        x.push((col0[row] + col1[row]) as i8);
    }
    for row in 3..6 {
        x.push((col2[row] + col3[row]) as i8);
    }
    let raw = TargetMatrix::new(Array2::from_shape_vec((p, 1), x).unwrap(), vec!["s1".into()]);

    let mut config = PhasingConfig::default();
    config.width = 3;
    config.flankwidth = 0;
    config.emit_imputed = true;
    let engine = PhasingEngine::new(config);
    let output = engine.run(&panel, &raw).unwrap();
    let mosaic = &output.mosaics[0];
    let imputed = output.imputed.unwrap();

    for strand in [&mosaic.strand0, &mosaic.strand1] {
        assert_eq!(strand.segments[0].start_marker, 0);
        for pair in strand.segments.windows(2) {
            assert!(pair[0].start_marker < pair[1].start_marker, "start markers must strictly increase");
        }
    }

    for marker in 0..p {
        let hap0 = mosaic.strand0.haplotype_at(marker).unwrap();
        let hap1 = mosaic.strand1.haplotype_at(marker).unwrap();
        let expected = h[[marker, hap0]] as f64 + h[[marker, hap1]] as f64;
        assert_eq!(imputed[[marker, 0]], expected);
    }
}
