//! Physical constants and the model unit system.
//!
//! Raw grain-boundary data arrive in SI units (J/m², m⁴/(J·s)) with activation
//! energies in eV. Inside the engine energies are carried in eV and lengths and
//! times in multiples of the configured `length_scale` and `time_scale`.

pub const BOLTZMANN_EV_PER_K: f64 = 8.617343e-5; // eV/K
pub const JOULE_TO_EV: f64 = 6.24150974e18; // eV/J

/// Entropy difference between the GB and the bulk, in J/(K·mol).
pub const GB_ENTROPY_DIFFERENCE: f64 = 9.5;
/// Width of the region used to activate thermal-gradient effects, in m.
pub const ACTIVATION_WIDTH_M: f64 = 0.5e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitSystem {
    /// Length unit in m.
    pub length_scale: f64,
    /// Time unit in s.
    pub time_scale: f64,
}

impl Default for UnitSystem {
    fn default() -> Self {
        Self {
            length_scale: 1.0e-9,
            time_scale: 1.0e-9,
        }
    }
}

impl UnitSystem {
    pub fn new(length_scale: f64, time_scale: f64) -> Self {
        Self {
            length_scale,
            time_scale,
        }
    }

    /// Factor taking a GB energy from J/m² to eV/ls².
    #[inline]
    pub fn energy_factor(&self) -> f64 {
        JOULE_TO_EV * self.length_scale * self.length_scale
    }

    /// Factor taking a GB mobility from m⁴/(J·s) to ls⁴/(eV·ts).
    #[inline]
    pub fn mobility_factor(&self) -> f64 {
        let l2 = self.length_scale * self.length_scale;
        self.time_scale / (JOULE_TO_EV * l2 * l2)
    }

    /// Converts a molar volume from m³/mol to ls³/mol.
    #[inline]
    pub fn molar_volume(&self, m3_per_mol: f64) -> f64 {
        m3_per_mol / (self.length_scale * self.length_scale * self.length_scale)
    }

    /// Converts an entropy from J/(K·mol) to eV/(K·mol).
    #[inline]
    pub fn entropy(&self, joule_per_kelvin_mol: f64) -> f64 {
        joule_per_kelvin_mol * JOULE_TO_EV
    }

    #[inline]
    pub fn length(&self, meters: f64) -> f64 {
        meters / self.length_scale
    }
}

/// Arrhenius factor `exp(-Q / (kB T))` for an activation energy in eV.
#[inline]
pub fn arrhenius(activation_energy_ev: f64, temperature: f64) -> f64 {
    (-activation_energy_ev / (BOLTZMANN_EV_PER_K * temperature)).exp()
}
