use crate::core::io::gb_data::GbDataFile;
use crate::core::io::traits::PairDataFile;
use crate::core::models::pair::GrainPair;
use crate::core::models::table::RawPairMatrices;
use crate::engine::config::EngineConfig;
use crate::engine::error::EngineError;
use crate::engine::model::GbAnisotropyModel;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Loads the GB data file and calibrates a model that can be shared across threads.
#[instrument(skip_all, name = "calibration_workflow")]
pub fn run(
    data_path: &Path,
    config: EngineConfig,
    reporter: &ProgressReporter,
) -> Result<Arc<GbAnisotropyModel>, EngineError> {
    config.validate()?;

    reporter.report(Progress::PhaseStart {
        name: "Loading GB data",
    });
    info!(
        "Reading GB data for {} grains from '{}'.",
        config.num_grains,
        data_path.display()
    );
    let raw = GbDataFile::read_from_path(data_path, config.num_grains)?;
    warn_on_asymmetry(&raw);
    reporter.report(Progress::PhaseFinish);

    let model = GbAnisotropyModel::build(&raw, config, reporter)?;
    Ok(Arc::new(model))
}

/// Counts non-zero lower-triangle entries that disagree with the upper triangle.
fn asymmetric_entries(block: &[Vec<f64>], num_grains: usize) -> usize {
    GrainPair::all(num_grains)
        .filter(|p| {
            let lower = block[p.high()][p.low()];
            lower != 0.0 && lower != block[p.low()][p.high()]
        })
        .count()
}

fn warn_on_asymmetry(raw: &RawPairMatrices) {
    let n = raw.num_grains();
    for (name, block) in [
        ("GB energy", &raw.sigma),
        ("mobility", &raw.mobility),
        ("activation energy", &raw.activation_energy),
    ] {
        let count = asymmetric_entries(block, n);
        if count > 0 {
            warn!(
                "{} {} value(s) below the diagonal differ from their upper-triangle partner and are ignored.",
                count, name
            );
        }
    }
}
