use std::{
    iter,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use log::{info, warn};
use thiserror::Error;

use crate::{
    dataset::SampleSeries,
    lin_reg::{lin_reg, Regression, RegressionError},
    plot::{PlotRequest, RenderError, Renderer},
};

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("regression failed: {0}")]
    Regression(#[from] RegressionError),
    #[error("plot failed: {source}")]
    Render {
        regression: Regression,
        source: RenderError,
    },
}

impl SeriesError {
    /// The fit, when the failure happened after the regression succeeded.
    pub fn regression(&self) -> Option<Regression> {
        match self {
            SeriesError::Regression(_) => None,
            SeriesError::Render { regression, .. } => Some(*regression),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FittedSeries {
    pub regression: Regression,
    pub plot: PathBuf,
}

#[derive(Debug)]
pub struct SeriesReport {
    pub name: String,
    pub outcome: Result<FittedSeries, SeriesError>,
}

impl SeriesReport {
    pub fn regression(&self) -> Option<Regression> {
        match &self.outcome {
            Ok(fitted) => Some(fitted.regression),
            Err(err) => err.regression(),
        }
    }

    /// `Set: <name>`, then `Linear Regression: y = ..` whenever a fit exists.
    pub fn summary_lines(&self) -> impl Iterator<Item = String> + '_ {
        iter::once(format!("Set: {}", self.name)).chain(
            self.regression()
                .map(|regression| format!("Linear Regression: {}", regression)),
        )
    }
}

#[derive(Debug, Error)]
#[error("{} of {} series failed ({})", .failed.len(), .total, .failed.join(", "))]
pub struct IncompleteAnalysis {
    pub failed: Vec<String>,
    pub total: usize,
}

/// Per-series outcomes, in the order the series were given.
#[derive(Debug, Default)]
pub struct AnalysisReport {
    pub series: Vec<SeriesReport>,
}

impl AnalysisReport {
    pub fn succeeded(&self) -> impl Iterator<Item = (&str, &FittedSeries)> {
        self.series
            .iter()
            .filter_map(|report| Some((report.name.as_str(), report.outcome.as_ref().ok()?)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &SeriesError)> {
        self.series
            .iter()
            .filter_map(|report| Some((report.name.as_str(), report.outcome.as_ref().err()?)))
    }

    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn summary_lines(&self) -> Vec<String> {
        self.series
            .iter()
            .flat_map(|report| report.summary_lines())
            .collect()
    }

    pub fn check(&self) -> Result<(), IncompleteAnalysis> {
        let failed = self.failures().map(|(name, _)| name.to_string()).collect_vec();
        if failed.is_empty() {
            Ok(())
        } else {
            Err(IncompleteAnalysis {
                failed,
                total: self.series.len(),
            })
        }
    }
}

/// Fits and plots each series, writing `set_<name>.png` into `output_dir`.
pub struct Analysis<R> {
    renderer: R,
    output_dir: PathBuf,
}

impl<R: Renderer> Analysis<R> {
    pub fn new(renderer: R, output_dir: impl AsRef<Path>) -> Self {
        Self {
            renderer,
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn run(&self, sets: &[SampleSeries]) -> AnalysisReport {
        let series = sets
            .iter()
            .map(|set| {
                let outcome = self.process(set);
                match &outcome {
                    Ok(fitted) => {
                        info!("set {}: {} -> {:?}", set.name, fitted.regression, fitted.plot)
                    }
                    Err(err) => warn!("set {}: {}", set.name, err),
                }
                SeriesReport {
                    name: set.name.clone(),
                    outcome,
                }
            })
            .collect();
        AnalysisReport { series }
    }

    fn process(&self, set: &SampleSeries) -> Result<FittedSeries, SeriesError> {
        let regression = lin_reg(&set.xs, &set.ys)?;
        let plot = self.output_dir.join(set.file_name());
        self.renderer
            .render(&PlotRequest::for_series(set, Some(regression)), &plot)
            .map_err(|source| SeriesError::Render { regression, source })?;
        Ok(FittedSeries { regression, plot })
    }
}
