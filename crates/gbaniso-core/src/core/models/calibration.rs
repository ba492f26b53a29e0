use super::pair::{GrainPair, PairMap};

/// Calibrated phase-field parameters of one grain boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairCalibration {
    /// Interface-energy coefficient `κ*`.
    pub kappa: f64,
    /// Anisotropy exponent `γ*`.
    pub gamma: f64,
    /// Dimensionless shape parameter `a*`.
    pub a: f64,
    /// Coupling ratio `g²`.
    pub g2: f64,
}

/// Calibration results for every grain pair plus the shared `μ` reference.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibratedPairParams {
    pairs: PairMap<PairCalibration>,
    mu0: f64,
}

/// The two packed matrices of the legacy layout.
///
/// `kappa_gamma[m][n]` holds `κ*` and `kappa_gamma[n][m]` holds `γ*` for `m < n`;
/// `a_g2[m][n]` holds `a*` and `a_g2[n][m]` holds `g²`. The diagonal is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedPairMatrices {
    pub kappa_gamma: Vec<Vec<f64>>,
    pub a_g2: Vec<Vec<f64>>,
}

impl CalibratedPairParams {
    pub(crate) fn new(pairs: PairMap<PairCalibration>, mu0: f64) -> Self {
        Self { pairs, mu0 }
    }

    #[inline]
    pub fn mu0(&self) -> f64 {
        self.mu0
    }

    #[inline]
    pub fn num_grains(&self) -> usize {
        self.pairs.num_grains()
    }

    #[inline]
    pub fn get(&self, pair: GrainPair) -> Option<&PairCalibration> {
        self.pairs.get(pair)
    }

    pub fn iter(&self) -> impl Iterator<Item = (GrainPair, &PairCalibration)> {
        self.pairs.iter()
    }

    pub(crate) fn pairs(&self) -> &PairMap<PairCalibration> {
        &self.pairs
    }

    /// Exports the calibration in the packed two-matrix layout.
    pub fn to_packed(&self) -> PackedPairMatrices {
        let n = self.num_grains();
        let mut kappa_gamma = vec![vec![0.0; n]; n];
        let mut a_g2 = vec![vec![0.0; n]; n];
        for (pair, cal) in self.pairs.iter() {
            let (m, n) = (pair.low(), pair.high());
            kappa_gamma[m][n] = cal.kappa;
            kappa_gamma[n][m] = cal.gamma;
            a_g2[m][n] = cal.a;
            a_g2[n][m] = cal.g2;
        }
        PackedPairMatrices { kappa_gamma, a_g2 }
    }
}
