use itertools::Itertools;
use std::fmt;

/// An unordered pair of grains, stored as `(low, high)` with `low < high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GrainPair {
    low: usize,
    high: usize,
}

impl GrainPair {
    /// Normalizes `(m, n)` into an unordered pair. A grain does not pair with itself.
    pub fn new(m: usize, n: usize) -> Option<Self> {
        match m.cmp(&n) {
            std::cmp::Ordering::Less => Some(Self { low: m, high: n }),
            std::cmp::Ordering::Greater => Some(Self { low: n, high: m }),
            std::cmp::Ordering::Equal => None,
        }
    }

    #[inline]
    pub fn low(&self) -> usize {
        self.low
    }

    #[inline]
    pub fn high(&self) -> usize {
        self.high
    }

    /// All pairs among `num_grains` grains in canonical order: `(0,1), (0,2), …, (1,2), …`.
    pub fn all(num_grains: usize) -> impl Iterator<Item = GrainPair> {
        (0..num_grains)
            .tuple_combinations()
            .map(|(low, high)| GrainPair { low, high })
    }
}

impl fmt::Display for GrainPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

#[inline]
pub fn pair_count(num_grains: usize) -> usize {
    num_grains * num_grains.saturating_sub(1) / 2
}

/// Dense storage of one value per unordered grain pair.
///
/// Values are laid out in the canonical pair order of [`GrainPair::all`], so
/// iteration order is stable and lookups are a constant-time index computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PairMap<T> {
    num_grains: usize,
    values: Vec<T>,
}

impl<T> PairMap<T> {
    pub fn from_fn<F>(num_grains: usize, f: F) -> Self
    where
        F: FnMut(GrainPair) -> T,
    {
        let mut values = Vec::with_capacity(pair_count(num_grains));
        values.extend(GrainPair::all(num_grains).map(f));
        Self { num_grains, values }
    }

    /// Reuses this map's layout for values produced in its iteration order.
    pub(crate) fn with_values<U>(&self, values: Vec<U>) -> PairMap<U> {
        debug_assert_eq!(values.len(), self.values.len());
        PairMap {
            num_grains: self.num_grains,
            values,
        }
    }

    #[inline]
    pub fn num_grains(&self) -> usize {
        self.num_grains
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    fn index_of(&self, pair: GrainPair) -> Option<usize> {
        if pair.high >= self.num_grains {
            return None;
        }
        let m = pair.low;
        Some(m * (2 * self.num_grains - m - 1) / 2 + (pair.high - m - 1))
    }

    #[inline]
    pub fn get(&self, pair: GrainPair) -> Option<&T> {
        self.index_of(pair).map(|i| &self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (GrainPair, &T)> {
        GrainPair::all(self.num_grains).zip(self.values.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }
}
