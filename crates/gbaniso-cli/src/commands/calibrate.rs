use super::load_model;
use crate::cli::CalibrateArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use gbaniso::core::io::points::write_calibration;
use gbaniso::engine::model::GbAnisotropyModel;
use gbaniso::engine::progress::ProgressReporter;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub fn run(args: CalibrateArgs, progress_handler: &CliProgressHandler) -> Result<()> {
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Calibrating grain-boundary parameters...");
    let model = execute(&args, &reporter)?;
    print_summary(&model);

    if let Some(output) = &args.output {
        println!("✓ Calibration table written to: {}", output.display());
    }
    Ok(())
}

fn execute(args: &CalibrateArgs, reporter: &ProgressReporter) -> Result<Arc<GbAnisotropyModel>> {
    let model = load_model(&args.model, reporter)?;
    if let Some(output) = &args.output {
        info!("Writing calibration table to {:?}", output);
        write_table(&model, output)?;
    }
    Ok(model)
}

fn write_table(model: &GbAnisotropyModel, path: &Path) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    write_calibration(writer, model.table(), model.calibration()).map_err(|e| CliError::Output {
        path: path.to_path_buf(),
        source: e,
    })
}

fn print_summary(model: &GbAnisotropyModel) {
    println!("mu0 = {:.6e}", model.mu0());
    println!(
        "{:>8}  {:>14}  {:>10}  {:>10}  {:>10}",
        "pair", "kappa", "gamma", "a", "g2"
    );
    for (pair, cal) in model.calibration().iter() {
        println!(
            "{:>8}  {:>14.6e}  {:>10.6}  {:>10.6}  {:>10.6}",
            pair.to_string(),
            cal.kappa,
            cal.gamma,
            cal.a,
            cal.g2
        );
    }
}
