//! Provider/sink boundary (`SPEC_FULL.md` §6): keeps variant-file I/O out of
//! the core. Callers implement these traits against whatever file format
//! they use (VCF, BGEN, a custom store); the core only ever sees the dense
//! in-memory matrices.

use anyhow::Result;

use crate::types::{ReferencePanel, TargetMatrix};

pub trait GenotypeProvider {
    fn load_targets(&self) -> Result<TargetMatrix>;
}

pub trait ReferenceProvider {
    fn load_reference(&self) -> Result<ReferencePanel>;
}

pub trait PhasedOutputSink {
    fn write_phased(&mut self, output: &ndarray::Array2<f64>, sample_ids: &[String]) -> Result<()>;
}

/// An already-in-memory `GenotypeProvider`/`ReferenceProvider` pair, used by
/// tests and by callers who have already assembled their matrices.
#[derive(Debug, Clone)]
pub struct InMemoryGenotypes(pub TargetMatrix);

impl GenotypeProvider for InMemoryGenotypes {
    fn load_targets(&self) -> Result<TargetMatrix> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryReferencePanel(pub ReferencePanel);

impl ReferenceProvider for InMemoryReferencePanel {
    fn load_reference(&self) -> Result<ReferencePanel> {
        Ok(self.0.clone())
    }
}

/// An in-memory sink that just accumulates the output, for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySink {
    pub output: Option<ndarray::Array2<f64>>,
    pub sample_ids: Vec<String>,
}

impl PhasedOutputSink for InMemorySink {
    fn write_phased(&mut self, output: &ndarray::Array2<f64>, sample_ids: &[String]) -> Result<()> {
        self.output = Some(output.clone());
        self.sample_ids = sample_ids.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn in_memory_provider_round_trips_the_matrix() {
        let calls = Array2::from_shape_vec((2, 1), vec![1i8, 0]).unwrap();
        let target = TargetMatrix::new(calls.clone(), vec!["s1".into()]);
        let provider = InMemoryGenotypes(target);
        let reloaded = provider.load_targets().unwrap();
        assert_eq!(reloaded.calls(), &calls);
    }
}
