#![allow(non_snake_case)]

use hapmosaic::mosaic::MosaicSegment;
use hapmosaic::{PhasingConfig, PhasingEngine, ReferencePanel, TargetMatrix};
use ndarray::Array2;

fn build_panel_and_target() -> (ReferencePanel, TargetMatrix) {
    let local0 = [0u8, 0, 1];
    let local1 = [1u8, 1, 0];
    let local2 = [0u8, 1, 1];

    let mut col0 = Vec::new();
    let mut col1 = Vec::new();
    let mut col2 = Vec::new();
    for _ in 0..2 {
        col0.extend_from_slice(&local0);
        col1.extend_from_slice(&local1);
        col2.extend_from_slice(&local2);
    }

    let p = 6;
    let mut h = Array2::zeros((p, 3));
    for row in 0..p {
        h[[row, 0]] = col0[row];
        h[[row, 1]] = col1[row];
        h[[row, 2]] = col2[row];
    }
    let panel = ReferencePanel::new(h);

    let mut x = Vec::with_capacity(p);
    for row in 0..3 {
        x.push((col0[row] + col2[row]) as i8);
    }
    for row in 3..6 {
        x.push((col1[row] + col2[row]) as i8);
    }
    let raw = TargetMatrix::new(Array2::from_shape_vec((p, 1), x).unwrap(), vec!["s1".into()]);
    (panel, raw)
}

/// Same switch scenario as the fast-stitcher breakpoint test, but routed
/// through the DP candidate-chain stitcher (C7, `fast_method = false`): with
/// a unique zero-error pair in each window there is only one candidate to
/// chain, so the DP path must recover the identical mosaic.
#[test]
fn dp_stitcher_recovers_the_same_switch_as_the_fast_stitcher() {
    let (panel, raw) = build_panel_and_target();

    let mut config = PhasingConfig::default();
    config.width = 3;
    config.flankwidth = 0;
    config.fast_method = false;
    let engine = PhasingEngine::new(config);
    let output = engine.run(&panel, &raw).unwrap();
    let mosaic = &output.mosaics[0];

    assert_eq!(
        mosaic.strand0.segments,
        vec![
            MosaicSegment { start_marker: 0, haplotype_index: 0 },
            MosaicSegment { start_marker: 3, haplotype_index: 1 },
        ]
    );
    assert_eq!(
        mosaic.strand1.segments,
        vec![MosaicSegment { start_marker: 0, haplotype_index: 2 }]
    );
}

/// `unique_only = true` skips C6 expansion entirely; with no redundant
/// reference columns in this panel every representative is already a
/// singleton class, so the result must match the expanded-candidate run.
#[test]
fn unique_only_matches_full_expansion_when_there_is_no_redundancy() {
    let (panel, raw) = build_panel_and_target();

    let mut config = PhasingConfig::default();
    config.width = 3;
    config.flankwidth = 0;
    config.unique_only = true;
    let engine = PhasingEngine::new(config);
    let output = engine.run(&panel, &raw).unwrap();
    let mosaic = &output.mosaics[0];

    assert_eq!(
        mosaic.strand0.segments,
        vec![
            MosaicSegment { start_marker: 0, haplotype_index: 0 },
            MosaicSegment { start_marker: 3, haplotype_index: 1 },
        ]
    );
    assert_eq!(
        mosaic.strand1.segments,
        vec![MosaicSegment { start_marker: 0, haplotype_index: 2 }]
    );
}
