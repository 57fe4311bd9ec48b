//! Per-dataset correction pass.
//!
//! read record + weight → build four-vectors → fiducial cut → effective weight
//! → observables → fill every triplet; afterwards save every triplet and
//! average the 1D chi2/ndf values.

use std::path::Path;

use ec_core::{RecordSource, WeightSource};
use ec_hist::{Binning, Hist1D};
use ec_viz::weight_distribution_artifact;
use ec_viz_render::config::VizConfig;
use ec_viz_render::plots::weights;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{RunConfig, WEIGHT_HIST_BINS};
use crate::error::{DatasetError, Result};
use crate::observables::{Observable1D, Observable2D, ObservableSet, reference_1d, reference_2d};
use crate::reader::{KinematicStreamReader, WeightStreamReader};
use crate::triplet::{Triplet1D, Triplet2D, write_figure, write_json};
use crate::weight::{clamp_efficiency, effective_weight};

/// Event tallies of one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassStats {
    /// Record/weight pairs read.
    pub events_read: u64,
    /// Pairs inside the fiducial region (filled into the triplets).
    pub events_accepted: u64,
    /// Accepted events with successful reconstruction.
    pub events_reconstructed: u64,
    /// The weight stream ended before the kinematics stream.
    pub desynchronized: bool,
    /// The pass stopped at the configured maximum event count.
    pub hit_max_events: bool,
}

/// Filled, not yet saved, state of one dataset.
#[derive(Debug)]
pub struct DatasetPass {
    /// One triplet per declared 1D observable, in declaration order.
    pub triplets_1d: Vec<Triplet1D>,
    /// One triplet per declared 2D observable, in declaration order.
    pub triplets_2d: Vec<Triplet2D>,
    /// Clamped efficiency of every accepted event.
    pub efficiencies: Hist1D,
    /// Event tallies.
    pub stats: PassStats,
}

/// Goodness of fit of one 1D observable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservableScore {
    /// Histogram name, e.g. `h1M`.
    pub name: String,
    /// chi2/ndf of corrected against generated; 0 for a degenerate test.
    pub chi2_ndf: f64,
}

/// Summary of one processed dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetReport {
    /// Dataset name.
    pub name: String,
    /// Event tallies of the pass.
    #[serde(flatten)]
    pub stats: PassStats,
    /// Per 1D observable, in declaration order.
    pub chi2_ndf: Vec<ObservableScore>,
    /// Arithmetic mean of `chi2_ndf`, 0 when there are no 1D observables.
    pub mean_chi2_ndf: f64,
}

/// Runs the correction over datasets with one fixed configuration.
#[derive(Debug, Clone)]
pub struct CorrectionPipeline {
    config: RunConfig,
    viz: VizConfig,
    observables_1d: Vec<Observable1D>,
    observables_2d: Vec<Observable2D>,
}

impl CorrectionPipeline {
    /// Pipeline over the reference observables.
    pub fn new(config: RunConfig) -> ec_core::Result<Self> {
        let viz = config.viz_config()?;
        Ok(Self { config, viz, observables_1d: reference_1d(), observables_2d: reference_2d() })
    }

    /// Replace the declared observables.
    pub fn with_observables(mut self, d1: Vec<Observable1D>, d2: Vec<Observable2D>) -> Self {
        self.observables_1d = d1;
        self.observables_2d = d2;
        self
    }

    /// Fresh, empty triplets for every declared observable.
    pub fn new_pass(&self) -> ec_core::Result<DatasetPass> {
        let triplets_1d = self
            .observables_1d
            .iter()
            .map(|o| Triplet1D::new(o.name, o.label, o.axis.binning()?, o.legend))
            .collect::<ec_core::Result<Vec<_>>>()?;
        let triplets_2d = self
            .observables_2d
            .iter()
            .map(|o| {
                let (x, y) = (o.x.binning()?, o.y.binning()?);
                Ok(Triplet2D::new(o.name, o.x_label, o.y_label, x, y))
            })
            .collect::<ec_core::Result<Vec<_>>>()?;
        Ok(DatasetPass {
            triplets_1d,
            triplets_2d,
            efficiencies: Hist1D::new("hx_weights", Binning::uniform(WEIGHT_HIST_BINS, 0.0, 1.0)?),
            stats: PassStats::default(),
        })
    }

    /// Event loop over two aligned streams. A parse error aborts the pass and
    /// drops everything filled so far.
    pub fn accumulate<R, W>(&self, records: &mut R, weights: &mut W) -> ec_core::Result<DatasetPass>
    where
        R: RecordSource + ?Sized,
        W: WeightSource + ?Sized,
    {
        let mut pass = self.new_pass()?;
        let stats = &mut pass.stats;
        loop {
            if stats.events_accepted >= self.config.max_events {
                tracing::info!(max_events = self.config.max_events, "maximum event count reached");
                stats.hit_max_events = true;
                break;
            }
            let Some(record) = records.next_record()? else {
                break;
            };
            let Some(raw) = weights.next_weight()? else {
                tracing::warn!(events = stats.events_read, "weight not found");
                stats.desynchronized = true;
                break;
            };
            stats.events_read += 1;

            let generated = record.generated_pair();
            if !self.config.fiducial.accepts(&generated) {
                continue;
            }
            let weight = effective_weight(raw);
            let gen_obs = ObservableSet::from_pair(&generated);
            let rec_obs = ObservableSet::from_pair(&record.reconstructed_pair());

            for (t, o) in pass.triplets_1d.iter_mut().zip(&self.observables_1d) {
                t.fill(record.reco_ok, (o.value)(&gen_obs), (o.value)(&rec_obs), weight);
            }
            for (t, o) in pass.triplets_2d.iter_mut().zip(&self.observables_2d) {
                t.fill(record.reco_ok, (o.value)(&gen_obs), (o.value)(&rec_obs), weight);
            }
            pass.efficiencies.fill(clamp_efficiency(raw), 1.0);

            stats.events_accepted += 1;
            if record.reco_ok {
                stats.events_reconstructed += 1;
            }
        }
        Ok(pass)
    }

    /// Save every triplet of `pass` into `out_dir` and summarize.
    pub fn finalize(&self, name: &str, pass: DatasetPass, out_dir: &Path) -> Result<DatasetReport> {
        let DatasetPass { triplets_1d, triplets_2d, efficiencies, stats } = pass;

        let art = weight_distribution_artifact(&efficiencies);
        write_json(out_dir, &art.name, &art)?;
        let svg = weights::render(&art, &self.viz)?;
        write_figure(out_dir, &art.name, svg, &self.viz)?;

        let mut scores = Vec::with_capacity(triplets_1d.len());
        for t in triplets_1d {
            let observable = t.name().to_string();
            let chi2_ndf = t.save(out_dir, &self.viz)?;
            scores.push(ObservableScore { name: observable, chi2_ndf });
        }
        for t in triplets_2d {
            t.save(out_dir, &self.viz)?;
        }

        let mean_chi2_ndf = if scores.is_empty() {
            0.0
        } else {
            scores.iter().map(|s| s.chi2_ndf).sum::<f64>() / scores.len() as f64
        };
        tracing::info!(dataset = name, mean_chi2_ndf, "average <chi2/ndf>");
        Ok(DatasetReport { name: name.to_string(), stats, chi2_ndf: scores, mean_chi2_ndf })
    }

    /// Full pass over one dataset named in the configured directories. Both
    /// streams are closed when this returns.
    pub fn run_dataset(&self, name: &str) -> Result<DatasetReport> {
        let kin_path = self.config.kinematics_path(name);
        let weight_path = self.config.weights_path(name);
        let mut records = KinematicStreamReader::open(&kin_path).map_err(|source| {
            DatasetError::Open { role: "kinematics", path: kin_path.clone(), source }
        })?;
        let mut weights = WeightStreamReader::open(&weight_path).map_err(|source| {
            DatasetError::Open { role: "weights", path: weight_path.clone(), source }
        })?;

        tracing::info!(dataset = name, path = %kin_path.display(), "processing dataset");
        let pass = self.accumulate(&mut records, &mut weights)?;
        tracing::info!(
            dataset = name,
            events = pass.stats.events_read,
            accepted = pass.stats.events_accepted,
            reconstructed = pass.stats.events_reconstructed,
            "event loop done"
        );
        self.finalize(name, pass, &self.config.figures_path(name))
    }

    /// Run every dataset independently; one failure does not stop the others.
    /// With `parallel` the datasets go through the global rayon pool; results
    /// keep the input order either way.
    pub fn run_all(&self, names: &[String], parallel: bool) -> Vec<Result<DatasetReport>> {
        let run = |name: &String| {
            let result = self.run_dataset(name);
            if let Err(e) = &result {
                if e.is_open_failure() {
                    tracing::error!(dataset = %name, "{e}; skipping dataset");
                } else {
                    tracing::error!(dataset = %name, "{e}; dataset aborted");
                }
            }
            result
        };
        if parallel { names.par_iter().map(run).collect() } else { names.iter().map(run).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec_core::{EventRecord, ThreeMomentum};

    fn record(pt: f64, reco_ok: bool) -> EventRecord {
        let m = [ThreeMomentum::new(pt, 0.0, 0.0), ThreeMomentum::new(0.0, pt, 0.0)];
        EventRecord { generated: m, reconstructed: m, codes: [211, -211], reco_ok }
    }

    fn pipeline(max_events: u64) -> CorrectionPipeline {
        let config = RunConfig { max_events, ..RunConfig::default() };
        CorrectionPipeline::new(config).unwrap()
    }

    #[test]
    fn max_events_bounds_accepted_events() {
        let p = pipeline(3);
        let mut records = vec![record(0.5, true); 10].into_iter();
        let mut weights = vec![0.5; 10].into_iter();
        let pass = p.accumulate(&mut records, &mut weights).unwrap();
        assert_eq!(pass.stats.events_accepted, 3);
        assert!(pass.stats.hit_max_events);
        assert!(!pass.stats.desynchronized);
    }

    #[test]
    fn rejected_events_still_consume_weights() {
        let p = pipeline(100);
        // The first record fails the fiducial cut but its weight is used up.
        let mut records = vec![record(0.05, true), record(0.5, true)].into_iter();
        let mut weights = vec![0.1, 0.25].into_iter();
        let pass = p.accumulate(&mut records, &mut weights).unwrap();
        assert_eq!(pass.stats.events_read, 2);
        assert_eq!(pass.stats.events_accepted, 1);
        let h1m = &pass.triplets_1d[0];
        assert_eq!(h1m.corrected().total_weight(), 4.0);
        assert_eq!(pass.efficiencies.entries, 1);
    }

    #[test]
    fn empty_streams_give_empty_pass() {
        let p = pipeline(100);
        let mut records = Vec::<EventRecord>::new().into_iter();
        let mut weights = Vec::<f64>::new().into_iter();
        let pass = p.accumulate(&mut records, &mut weights).unwrap();
        assert_eq!(pass.stats, PassStats::default());
        assert_eq!(pass.triplets_1d.len(), 6);
        assert_eq!(pass.triplets_2d.len(), 6);
    }
}
