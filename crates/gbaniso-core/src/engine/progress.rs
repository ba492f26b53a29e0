use crate::core::models::pair::GrainPair;

#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    /// A grain pair finished its fixed-point solve.
    PairCalibrated { pair: GrainPair, iterations: usize },
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional callback.
///
/// The reporter is `Sync`, so parallel calibration and evaluation report
/// through a shared reference.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    /// A reporter that drops every event.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn silent_reporter_accepts_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::PhaseStart { name: "noop" });
        reporter.report(Progress::PhaseFinish);
    }

    #[test]
    fn callback_receives_events_in_order() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            let label = match event {
                Progress::PhaseStart { name } => name.to_string(),
                Progress::PairCalibrated { pair, iterations } => format!("{pair}:{iterations}"),
                Progress::PhaseFinish => "finish".to_string(),
                _ => "other".to_string(),
            };
            seen.lock().unwrap().push(label);
        }));

        reporter.report(Progress::PhaseStart { name: "Calibration" });
        reporter.report(Progress::PairCalibrated {
            pair: GrainPair::new(0, 1).unwrap(),
            iterations: 11,
        });
        reporter.report(Progress::PhaseFinish);
        drop(reporter);

        assert_eq!(
            seen.into_inner().unwrap(),
            vec!["Calibration", "(0, 1):11", "finish"]
        );
    }
}
