use analytics::{AnalysisOutput, AnalyticsEngine};
use fleet_core::{AnalysisInput, AnalyticsConfig, VesselMetrics};

pub fn run(input: &AnalysisInput) -> AnalysisOutput {
    run_with(AnalyticsConfig::default(), input)
}

pub fn run_with(config: AnalyticsConfig, input: &AnalysisInput) -> AnalysisOutput {
    AnalyticsEngine::new(config).unwrap().run(input)
}

pub fn vessel<'a>(output: &'a AnalysisOutput, id: &str) -> &'a VesselMetrics {
    output
        .vessels
        .iter()
        .find(|v| v.vessel_id.as_str() == id)
        .unwrap()
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
