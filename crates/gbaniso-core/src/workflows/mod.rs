//! # Workflows Module
//!
//! High-level entry points that tie [`crate::core`] and [`crate::engine`] together.
//!
//! - **Calibration Workflow** ([`calibrate`]) - Loads a GB data file and produces a
//!   calibrated model behind an `Arc`, ready to be shared across threads.
//! - **Evaluation Workflow** ([`evaluate`]) - Evaluates a batch of sample points
//!   against a calibrated model, in parallel when the `parallel` feature is enabled.

pub mod calibrate;
pub mod evaluate;

#[cfg(test)]
mod tests {
    use crate::core::io::gb_data::GbDataFile;
    use crate::core::io::points::{point_header, read_points, write_outputs};
    use crate::core::io::traits::PairDataFile;
    use crate::core::models::pair::GrainPair;
    use crate::core::models::point::ScalarFieldOutputs;
    use crate::core::models::table::RawPairMatrices;
    use crate::core::units::JOULE_TO_EV;
    use crate::engine::config::{EngineConfigBuilder, InclinationConfig};
    use crate::engine::progress::ProgressReporter;
    use crate::workflows;
    use std::sync::Arc;
    use std::thread;
    use tempfile::tempdir;

    fn three_grain_data() -> RawPairMatrices {
        RawPairMatrices {
            sigma: vec![
                vec![0.0, 0.62, 0.70],
                vec![0.0, 0.0, 0.76],
                vec![0.0, 0.0, 0.0],
            ],
            mobility: vec![
                vec![0.0, 2.5e-13, 3.0e-13],
                vec![0.0, 0.0, 2.0e-13],
                vec![0.0, 0.0, 0.0],
            ],
            activation_energy: vec![
                vec![0.0, 0.23, 0.25],
                vec![0.0, 0.0, 0.21],
                vec![0.0, 0.0, 0.0],
            ],
        }
    }

    const POINTS: &str = "\
0.9,0.05,0.05,0.3,0.1,0,-0.3,0.1,0,0,-0.2,0
0.5,0.5,0,1.2,-0.4,0,-1.2,0.4,0,0,0,0
0.33,0.33,0.34,0,0,0,0,0,0,0,0,0
0,0,1,0,0,0,0,0,0,0,0,0
";

    #[test]
    fn calibrate_then_evaluate_from_files() {
        let dir = tempdir().unwrap();
        let data_path = dir.path().join("gb_data.txt");
        GbDataFile::write_to_path(&three_grain_data(), &data_path).unwrap();

        let config = EngineConfigBuilder::new()
            .num_grains(3)
            .interface_width(5.0)
            .inclination(Some(InclinationConfig::default()))
            .build()
            .unwrap();
        let model = workflows::calibrate::run(&data_path, config, &ProgressReporter::new()).unwrap();

        for (pair, cal) in model.calibration().iter() {
            assert!(cal.kappa > 0.0, "kappa for {pair}");
            assert!(cal.gamma > 0.0, "gamma for {pair}");
            assert!(cal.a > 0.0 && cal.a.is_finite(), "a for {pair}");
        }

        let csv = format!(
            "{}\n{}",
            point_header(3).join(","),
            POINTS
                .lines()
                .enumerate()
                .map(|(i, line)| format!("{},{line}", 300.0 + 100.0 * i as f64))
                .collect::<Vec<_>>()
                .join("\n")
        );
        let points = read_points(csv.as_bytes(), 3, 300.0).unwrap();
        assert_eq!(points.len(), 4);

        let outputs = workflows::evaluate::run(&model, &points, &ProgressReporter::new()).unwrap();
        for (sample, out) in points.iter().zip(&outputs) {
            assert_eq!(*out, model.evaluate(sample).unwrap());
            assert!(out.kappa > 0.0 && out.gamma > 0.0 && out.kinetic_coefficient > 0.0);
        }

        let mut buffer = Vec::new();
        write_outputs(&mut buffer, &outputs).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            ScalarFieldOutputs::PROPERTY_NAMES.join(",")
        );
        assert_eq!(lines.count(), outputs.len());
    }

    #[test]
    fn unit_energy_and_width_six_give_unit_mobility_constant() {
        let length_scale = (1.0 / JOULE_TO_EV).sqrt();
        let raw = RawPairMatrices {
            sigma: vec![vec![0.0, 1.0], vec![1.0, 0.0]],
            mobility: vec![vec![0.0, 1.0e-13], vec![1.0e-13, 0.0]],
            activation_energy: vec![vec![0.0, 0.2], vec![0.2, 0.0]],
        };
        let dir = tempdir().unwrap();
        let data_path = dir.path().join("unit.txt");
        GbDataFile::write_to_path(&raw, &data_path).unwrap();

        let config = EngineConfigBuilder::new()
            .num_grains(2)
            .interface_width(6.0)
            .length_scale(length_scale)
            .build()
            .unwrap();
        let model = workflows::calibrate::run(&data_path, config, &ProgressReporter::new()).unwrap();

        assert!((model.mu0() - 1.0).abs() < 1e-12);
        let cal = model.calibration().get(GrainPair::new(1, 0).unwrap()).unwrap();
        assert!((cal.a - 0.879_934_400_363).abs() < 1e-8, "a* = {}", cal.a);
        assert!((cal.gamma - 1.238_957_55).abs() < 1e-6, "gamma* = {}", cal.gamma);
    }

    #[test]
    fn shared_model_serves_concurrent_batches() {
        let dir = tempdir().unwrap();
        let data_path = dir.path().join("gb_data.txt");
        GbDataFile::write_to_path(&three_grain_data(), &data_path).unwrap();
        let config = EngineConfigBuilder::new()
            .num_grains(3)
            .interface_width(5.0)
            .build()
            .unwrap();
        let model = workflows::calibrate::run(&data_path, config, &ProgressReporter::new()).unwrap();

        let header = point_header(3)[1..].join(",");
        let csv = format!("{header}\n{POINTS}");
        let points = Arc::new(read_points(csv.as_bytes(), 3, 700.0).unwrap());
        assert!(points.iter().all(|p| p.temperature == 700.0));
        let expected = workflows::evaluate::run(&model, &points, &ProgressReporter::new()).unwrap();

        let workers: Vec<_> = (0..3)
            .map(|_| {
                let model = Arc::clone(&model);
                let points = Arc::clone(&points);
                thread::spawn(move || {
                    points
                        .iter()
                        .map(|p| model.evaluate(p).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for worker in workers {
            assert_eq!(worker.join().unwrap(), expected);
        }
    }
}
