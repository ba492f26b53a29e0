use super::pair::{GrainPair, PairMap};
use crate::core::units::UnitSystem;

/// Square per-grain-pair matrices as read from a data source, in SI units.
///
/// Only the strict upper triangle (`m < n`) carries meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPairMatrices {
    /// GB energy in J/m².
    pub sigma: Vec<Vec<f64>>,
    /// GB mobility prefactor in m⁴/(J·s).
    pub mobility: Vec<Vec<f64>>,
    /// GB migration activation energy in eV.
    pub activation_energy: Vec<Vec<f64>>,
}

impl RawPairMatrices {
    pub fn num_grains(&self) -> usize {
        self.sigma.len()
    }

    /// Whether all three matrices are square with the same dimension.
    pub fn is_consistent(&self) -> bool {
        let n = self.sigma.len();
        [&self.sigma, &self.mobility, &self.activation_energy]
            .iter()
            .all(|m| m.len() == n && m.iter().all(|row| row.len() == n))
    }
}

/// Physical properties of one grain boundary, in model units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairProperties {
    /// GB energy in eV/ls².
    pub sigma: f64,
    /// GB mobility prefactor in ls⁴/(eV·ts).
    pub mobility: f64,
    /// Activation energy in eV.
    pub activation_energy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyExtremes {
    pub min: f64,
    pub max: f64,
}

impl EnergyExtremes {
    #[inline]
    pub fn mean(&self) -> f64 {
        (self.max + self.min) / 2.0
    }
}

/// Per-pair GB data converted to model units.
///
/// Built once from [`RawPairMatrices`]; the unit conversion happens inside the
/// constructor and the table is read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GrainPairTable {
    pairs: PairMap<PairProperties>,
}

impl GrainPairTable {
    /// Converts the upper triangle of `raw` into model units.
    ///
    /// `raw` must be consistent (see [`RawPairMatrices::is_consistent`]).
    pub(crate) fn from_raw(raw: &RawPairMatrices, units: &UnitSystem) -> Self {
        let energy_factor = units.energy_factor();
        let mobility_factor = units.mobility_factor();
        let pairs = PairMap::from_fn(raw.num_grains(), |pair| {
            let (m, n) = (pair.low(), pair.high());
            PairProperties {
                sigma: raw.sigma[m][n] * energy_factor,
                mobility: raw.mobility[m][n] * mobility_factor,
                activation_energy: raw.activation_energy[m][n],
            }
        });
        Self { pairs }
    }

    #[inline]
    pub fn num_grains(&self) -> usize {
        self.pairs.num_grains()
    }

    #[inline]
    pub fn get(&self, pair: GrainPair) -> Option<&PairProperties> {
        self.pairs.get(pair)
    }

    pub fn iter(&self) -> impl Iterator<Item = (GrainPair, &PairProperties)> {
        self.pairs.iter()
    }

    pub(crate) fn pairs(&self) -> &PairMap<PairProperties> {
        &self.pairs
    }

    /// Largest and smallest GB energy, seeded with the first pair `(0, 1)`.
    ///
    /// Returns `None` when the table holds no pairs.
    pub fn energy_extremes(&self) -> Option<EnergyExtremes> {
        let mut values = self.pairs.values().map(|p| p.sigma);
        let first = values.next()?;
        let seed = EnergyExtremes {
            min: first,
            max: first,
        };
        Some(values.fold(seed, |acc, sigma| EnergyExtremes {
            min: acc.min.min(sigma),
            max: acc.max.max(sigma),
        }))
    }
}
