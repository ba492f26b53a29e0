use super::load_model;
use crate::cli::EvaluateArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use gbaniso::core::io::points::{read_points_from_path, write_outputs};
use gbaniso::engine::progress::ProgressReporter;
use gbaniso::workflows;
use std::fs::File;
use std::io::BufWriter;
use tracing::info;

pub fn run(args: EvaluateArgs, progress_handler: &CliProgressHandler) -> Result<()> {
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Evaluating grain-boundary properties...");
    let count = execute(&args, &reporter)?;
    println!(
        "✓ {} point(s) evaluated, written to: {}",
        count,
        args.output.display()
    );
    Ok(())
}

/// Calibrates, evaluates every point of the input file and writes the outputs.
/// Returns the number of points evaluated.
fn execute(args: &EvaluateArgs, reporter: &ProgressReporter) -> Result<usize> {
    let model = load_model(&args.model, reporter)?;

    info!("Loading sample points from {:?}", &args.points);
    let temperature = model.config().temperature;
    let points = read_points_from_path(&args.points, model.num_grains(), temperature).map_err(
        |e| CliError::FileParsing {
            path: args.points.clone(),
            source: e.into(),
        },
    )?;

    let outputs = workflows::evaluate::run(&model, &points, reporter)?;

    info!("Writing {} output row(s) to {:?}", outputs.len(), &args.output);
    let writer = BufWriter::new(File::create(&args.output)?);
    write_outputs(writer, &outputs).map_err(|e| CliError::Output {
        path: args.output.clone(),
        source: e,
    })?;
    Ok(outputs.len())
}
