use nalgebra::Vector3;
use serde::Serialize;

/// Field values at one spatial sample point, as supplied by the host traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSample {
    /// Temperature in K.
    pub temperature: f64,
    /// Order-parameter value `η_i` of every grain.
    pub order_parameters: Vec<f64>,
    /// Spatial gradient `∇η_i` of every grain.
    pub gradients: Vec<Vector3<f64>>,
}

impl PointSample {
    pub fn new(temperature: f64, order_parameters: Vec<f64>, gradients: Vec<Vector3<f64>>) -> Self {
        Self {
            temperature,
            order_parameters,
            gradients,
        }
    }

    /// A sample with zero gradients, convenient where inclination plays no role.
    pub fn uniform(temperature: f64, order_parameters: Vec<f64>) -> Self {
        let gradients = vec![Vector3::zeros(); order_parameters.len()];
        Self::new(temperature, order_parameters, gradients)
    }

    /// Number of grains described, or `None` if values and gradients disagree.
    pub fn num_grains(&self) -> Option<usize> {
        (self.order_parameters.len() == self.gradients.len()).then_some(self.order_parameters.len())
    }
}

/// Effective material properties at one sample point.
///
/// Serialized field names are the property names the rest of the simulation
/// looks up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScalarFieldOutputs {
    #[serde(rename = "kappa_op")]
    pub kappa: f64,
    #[serde(rename = "gamma_asymm")]
    pub gamma: f64,
    #[serde(rename = "L")]
    pub kinetic_coefficient: f64,
    #[serde(rename = "mu")]
    pub mobility_constant: f64,
    pub molar_volume: f64,
    #[serde(rename = "entropy_diff")]
    pub entropy_difference: f64,
    #[serde(rename = "act_wGB")]
    pub activation_width: f64,
    #[serde(rename = "tgrad_corr_mult")]
    pub gradient_correction_multiplier: f64,
}

impl ScalarFieldOutputs {
    pub const PROPERTY_NAMES: [&'static str; 8] = [
        "kappa_op",
        "gamma_asymm",
        "L",
        "mu",
        "molar_volume",
        "entropy_diff",
        "act_wGB",
        "tgrad_corr_mult",
    ];

    /// Pairs each output with its property name, in [`Self::PROPERTY_NAMES`] order.
    pub fn named(&self) -> [(&'static str, f64); 8] {
        let [k, g, l, mu, vm, ds, aw, tg] = Self::PROPERTY_NAMES;
        [
            (k, self.kappa),
            (g, self.gamma),
            (l, self.kinetic_coefficient),
            (mu, self.mobility_constant),
            (vm, self.molar_volume),
            (ds, self.entropy_difference),
            (aw, self.activation_width),
            (tg, self.gradient_correction_multiplier),
        ]
    }
}
