//! Continent analysis: samples the planet surface, classifies land vs.
//! water, and groups contiguous land samples into continents used for
//! spawn-point selection.

mod analyzer;
mod classifier;

pub use analyzer::{AnalyzerSettings, ContinentAnalyzer, ContinentData};
pub use classifier::{SurfaceClassifier, SurfaceHit};
