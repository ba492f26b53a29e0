use crate::cli::ModelArgs;
use crate::error::{CliError, Result};
use gbaniso::engine::config::{
    CalibrationConfig, EngineConfig, EngineConfigBuilder, InclinationConfig,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialUnitsConfig {
    length_scale: Option<f64>,
    time_scale: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialInterfaceConfig {
    width: Option<f64>,
    molar_volume: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialThermalConfig {
    temperature: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialInclinationConfig {
    enabled: Option<bool>,
    delta_sigma: Option<f64>,
    delta_mob: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialCalibrationConfig {
    initial_guess: Option<f64>,
    tolerance: Option<f64>,
    max_iterations: Option<usize>,
}

/// The TOML configuration file, every field optional until merged with the CLI.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialRunConfig {
    data_file: Option<PathBuf>,
    num_grains: Option<usize>,
    dimension: Option<usize>,
    units: Option<PartialUnitsConfig>,
    interface: Option<PartialInterfaceConfig>,
    thermal: Option<PartialThermalConfig>,
    inclination: Option<PartialInclinationConfig>,
    calibration: Option<PartialCalibrationConfig>,
}

/// Fully resolved settings for one CLI run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub data_file: PathBuf,
    pub engine: EngineConfig,
}

impl PartialRunConfig {
    /// Parses a config file. A relative `data-file` is taken relative to the
    /// directory holding the config file. Paths given on the command line,
    /// through `--data-file` or `-S data-file=…`, are left relative to the
    /// current directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        if let (Some(data_file), Some(dir)) = (config.data_file.as_mut(), path.parent()) {
            if data_file.is_relative() {
                *data_file = dir.join(&*data_file);
            }
        }
        Ok(config)
    }

    pub fn merge_with_cli(mut self, args: &ModelArgs) -> Result<RunConfig> {
        self.apply_set_values(&args.set_values)?;

        let units = self.units.take().unwrap_or_default();
        let interface = self.interface.take().unwrap_or_default();
        let thermal = self.thermal.take().unwrap_or_default();
        let inclination = self.inclination.take().unwrap_or_default();
        let calibration = self.calibration.take().unwrap_or_default();

        let data_file = args
            .data_file
            .clone()
            .or(self.data_file)
            .ok_or_else(|| {
                CliError::Config(
                    "`data-file` is required either in the config file or via --data-file."
                        .to_string(),
                )
            })?;
        let num_grains = self
            .num_grains
            .ok_or_else(|| CliError::Config("`num-grains` is required.".to_string()))?;
        let width = args.interface_width.or(interface.width).ok_or_else(|| {
            CliError::Config(
                "`interface.width` is required either in the config file or via --interface-width."
                    .to_string(),
            )
        })?;

        let mut builder = EngineConfigBuilder::new()
            .num_grains(num_grains)
            .interface_width(width)
            .inclination(Self::merge_inclination(
                args.inclination.as_override(),
                inclination,
            ))
            .calibration(Self::merge_calibration(calibration));
        if let Some(dimension) = self.dimension {
            builder = builder.dimension(dimension);
        }
        if let Some(length_scale) = units.length_scale {
            builder = builder.length_scale(length_scale);
        }
        if let Some(time_scale) = units.time_scale {
            builder = builder.time_scale(time_scale);
        }
        if let Some(molar_volume) = interface.molar_volume {
            builder = builder.molar_volume(molar_volume);
        }
        if let Some(temperature) = thermal.temperature {
            builder = builder.temperature(temperature);
        }

        let engine = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(RunConfig { data_file, engine })
    }

    fn merge_inclination(
        cli_override: Option<bool>,
        partial: PartialInclinationConfig,
    ) -> Option<InclinationConfig> {
        let enabled = cli_override.or(partial.enabled).unwrap_or(false);
        if !enabled {
            return None;
        }
        let defaults = InclinationConfig::default();
        Some(InclinationConfig {
            delta_sigma: partial.delta_sigma.unwrap_or(defaults.delta_sigma),
            delta_mob: partial.delta_mob.unwrap_or(defaults.delta_mob),
        })
    }

    fn merge_calibration(partial: PartialCalibrationConfig) -> CalibrationConfig {
        let defaults = CalibrationConfig::default();
        CalibrationConfig {
            initial_guess: partial.initial_guess.unwrap_or(defaults.initial_guess),
            tolerance: partial.tolerance.unwrap_or(defaults.tolerance),
            max_iterations: partial.max_iterations.unwrap_or(defaults.max_iterations),
        }
    }

    /// Applies `-S key=value` overrides. Keys use the config file's dotted
    /// names. A `data-file` set here is kept as given, so it resolves against
    /// the current directory like `--data-file`.
    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let (key, value) = (key.trim(), value.trim());

            match key {
                "data-file" => self.data_file = Some(PathBuf::from(value)),
                "num-grains" => self.num_grains = Some(parse_value(key, value)?),
                "dimension" => self.dimension = Some(parse_value(key, value)?),
                "units.length-scale" => {
                    self.units.get_or_insert_with(Default::default).length_scale =
                        Some(parse_value(key, value)?);
                }
                "units.time-scale" => {
                    self.units.get_or_insert_with(Default::default).time_scale =
                        Some(parse_value(key, value)?);
                }
                "interface.width" => {
                    self.interface.get_or_insert_with(Default::default).width =
                        Some(parse_value(key, value)?);
                }
                "interface.molar-volume" => {
                    self.interface
                        .get_or_insert_with(Default::default)
                        .molar_volume = Some(parse_value(key, value)?);
                }
                "thermal.temperature" => {
                    self.thermal.get_or_insert_with(Default::default).temperature =
                        Some(parse_value(key, value)?);
                }
                "inclination.enabled" => {
                    self.inclination.get_or_insert_with(Default::default).enabled =
                        Some(parse_value(key, value)?);
                }
                "inclination.delta-sigma" => {
                    self.inclination
                        .get_or_insert_with(Default::default)
                        .delta_sigma = Some(parse_value(key, value)?);
                }
                "inclination.delta-mob" => {
                    self.inclination.get_or_insert_with(Default::default).delta_mob =
                        Some(parse_value(key, value)?);
                }
                "calibration.initial-guess" => {
                    self.calibration
                        .get_or_insert_with(Default::default)
                        .initial_guess = Some(parse_value(key, value)?);
                }
                "calibration.tolerance" => {
                    self.calibration.get_or_insert_with(Default::default).tolerance =
                        Some(parse_value(key, value)?);
                }
                "calibration.max-iterations" => {
                    self.calibration
                        .get_or_insert_with(Default::default)
                        .max_iterations = Some(parse_value(key, value)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!(
            "Invalid value for {}: '{}' ({} expected)",
            key,
            value,
            std::any::type_name::<T>()
        ))
    })
}
