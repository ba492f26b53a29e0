pub mod calibrate;
pub mod evaluate;

use crate::cli::ModelArgs;
use crate::config::PartialRunConfig;
use crate::error::Result;
use gbaniso::engine::model::GbAnisotropyModel;
use gbaniso::engine::progress::ProgressReporter;
use gbaniso::workflows;
use std::sync::Arc;
use tracing::info;

/// Resolves the configuration and calibrates a model from its data file.
fn load_model(args: &ModelArgs, reporter: &ProgressReporter) -> Result<Arc<GbAnisotropyModel>> {
    let partial = PartialRunConfig::from_file(&args.config)?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial.merge_with_cli(args)?;

    let model = workflows::calibrate::run(&config.data_file, config.engine, reporter)?;
    Ok(model)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::fs;
    use std::path::{Path, PathBuf};

    pub const GB_DATA: &str = "\
# Cu tricrystal
# sigma, mobility, activation energy
0.0 0.65 0.70
0.0 0.0 0.75
0.0 0.0 0.0
0.0 2.5e-13 2.5e-13
0.0 0.0 2.5e-13
0.0 0.0 0.0
0.0 0.23 0.23
0.0 0.0 0.23
0.0 0.0 0.0
";

    /// Writes a three-grain data file and a config pointing at it.
    pub fn write_inputs(dir: &Path) -> PathBuf {
        fs::write(dir.join("gb_data.txt"), GB_DATA).unwrap();
        let config = dir.join("gbaniso.toml");
        fs::write(
            &config,
            "data-file = \"gb_data.txt\"\nnum-grains = 3\n\n[interface]\nwidth = 5.0\n",
        )
        .unwrap();
        config
    }
}
