use crate::core::models::point::{PointSample, ScalarFieldOutputs};
use crate::engine::error::EngineError;
use crate::engine::model::GbAnisotropyModel;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Evaluates every sample point against a calibrated model.
///
/// Outputs are returned in input order. If any point fails, the error of the
/// lowest-indexed failing point is returned, wrapped with its index.
#[instrument(skip_all, name = "evaluation_workflow")]
pub fn run(
    model: &GbAnisotropyModel,
    points: &[PointSample],
    reporter: &ProgressReporter,
) -> Result<Vec<ScalarFieldOutputs>, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Evaluation",
    });
    reporter.report(Progress::TaskStart {
        total_steps: points.len() as u64,
    });
    info!("Evaluating {} sample point(s).", points.len());

    #[cfg(not(feature = "parallel"))]
    let iterator = points.iter().enumerate();

    #[cfg(feature = "parallel")]
    let iterator = points.par_iter().enumerate();

    let results: Vec<Result<ScalarFieldOutputs, EngineError>> = iterator
        .map(|(index, sample)| {
            let result = model.evaluate(sample).map_err(|e| EngineError::Point {
                index,
                source: Box::new(e),
            });
            reporter.report(Progress::TaskIncrement);
            result
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    results.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::table::RawPairMatrices;
    use crate::engine::config::EngineConfigBuilder;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread;

    fn model() -> Arc<GbAnisotropyModel> {
        let raw = RawPairMatrices {
            sigma: vec![
                vec![0.0, 0.65, 0.70],
                vec![0.0, 0.0, 0.75],
                vec![0.0, 0.0, 0.0],
            ],
            mobility: vec![vec![2.5e-13; 3]; 3],
            activation_energy: vec![vec![0.23; 3]; 3],
        };
        let config = EngineConfigBuilder::new()
            .num_grains(3)
            .interface_width(5.0)
            .build()
            .unwrap();
        Arc::new(GbAnisotropyModel::build(&raw, config, &ProgressReporter::new()).unwrap())
    }

    fn points(count: usize) -> Vec<PointSample> {
        (0..count)
            .map(|i| {
                let x = i as f64 / count as f64;
                PointSample::uniform(400.0 + 10.0 * i as f64, vec![x, 1.0 - x, 0.25 * x])
            })
            .collect()
    }

    #[test]
    fn outputs_follow_input_order() {
        let model = model();
        let samples = points(32);
        let outputs = run(&model, &samples, &ProgressReporter::new()).unwrap();
        assert_eq!(outputs.len(), samples.len());
        for (sample, out) in samples.iter().zip(&outputs) {
            assert_eq!(*out, model.evaluate(sample).unwrap());
        }
    }

    #[test]
    fn empty_batch_yields_no_outputs() {
        let outputs = run(&model(), &[], &ProgressReporter::new()).unwrap();
        assert!(outputs.is_empty());
    }

    #[test]
    fn first_failing_point_is_reported_with_its_index() {
        let mut samples = points(8);
        samples[5] = PointSample::uniform(500.0, vec![1.0]);
        samples[6] = PointSample::uniform(500.0, vec![1.0, 0.0]);

        let err = run(&model(), &samples, &ProgressReporter::new()).unwrap_err();
        match err {
            EngineError::Point { index, source } => {
                assert_eq!(index, 5);
                assert!(matches!(*source, EngineError::SampleShape { values: 1, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn progress_counts_every_point() {
        let increments = AtomicU64::new(0);
        let total = Mutex::new(None);
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::TaskStart { total_steps } => *total.lock().unwrap() = Some(total_steps),
            Progress::TaskIncrement => {
                increments.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }));

        run(&model(), &points(17), &reporter).unwrap();
        drop(reporter);
        assert_eq!(*total.lock().unwrap(), Some(17));
        assert_eq!(increments.load(Ordering::Relaxed), 17);
    }

    #[test]
    fn shared_model_gives_identical_results_across_threads() {
        let model = model();
        let samples = Arc::new(points(24));
        let expected = run(&model, &samples, &ProgressReporter::new()).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let model = Arc::clone(&model);
                let samples = Arc::clone(&samples);
                thread::spawn(move || run(&model, &samples, &ProgressReporter::new()).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
