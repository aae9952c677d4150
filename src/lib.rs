pub mod analysis;
pub mod config;
pub mod dataset;
pub mod lin_reg;
pub mod log;
pub mod plot;

pub use analysis::{
    Analysis, AnalysisReport, FittedSeries, IncompleteAnalysis, SeriesError, SeriesReport,
};
pub use config::{Config, PlotConfig};
pub use dataset::{quartet, SampleSeries};
pub use lin_reg::{lin_reg, Regression, RegressionError};
pub use plot::{BitmapRenderer, PlotRequest, RenderError, Renderer};
