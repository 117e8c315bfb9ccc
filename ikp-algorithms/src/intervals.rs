use crate::HashSet;
use ikp_utils::Quantity;
use std::fmt::Display;

/// One end of an interval on the capacity axis. The derived order puts
/// `NegInfinity` below every finite value and `PosInfinity` above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bound {
    NegInfinity,
    Finite(Quantity),
    PosInfinity,
}

impl Bound {
    pub fn shifted_down(self, amount: Quantity) -> Self {
        match self {
            Bound::Finite(value) => Bound::Finite(value - amount),
            infinite => infinite,
        }
    }
}

impl Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::NegInfinity => write!(f, "-inf"),
            Bound::Finite(value) => write!(f, "{}", value),
            Bound::PosInfinity => write!(f, "+inf"),
        }
    }
}

/// Half-open `[lower, upper)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub lower: Bound,
    pub upper: Bound,
}

impl Interval {
    pub fn new(lower: Bound, upper: Bound) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, value: Quantity) -> bool {
        self.lower <= Bound::Finite(value) && Bound::Finite(value) < self.upper
    }

    /// `[other.lower, other.upper)` lies entirely inside `self`.
    pub fn covers(&self, other: &Interval) -> bool {
        self.lower <= other.lower && other.upper <= self.upper
    }

    pub fn shifted_down(&self, amount: Quantity) -> Self {
        Self {
            lower: self.lower.shifted_down(amount),
            upper: self.upper.shifted_down(amount),
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.lower, self.upper)
    }
}

/// Split of the whole real line at the non-zero attainable sums of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    bounds: Vec<Bound>,
}

impl Partition {
    pub fn from_sums(sums: &[Quantity]) -> Self {
        let mut finite: Vec<Quantity> = sums.iter().filter(|s| !s.is_zero()).cloned().collect();
        finite.sort();
        finite.dedup();
        let mut bounds = Vec::with_capacity(finite.len() + 2);
        bounds.push(Bound::NegInfinity);
        bounds.extend(finite.into_iter().map(Bound::Finite));
        bounds.push(Bound::PosInfinity);
        Self { bounds }
    }

    pub fn bounds(&self) -> &[Bound] {
        &self.bounds
    }

    pub fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn intervals(&self) -> impl Iterator<Item = Interval> + '_ {
        self.bounds
            .windows(2)
            .map(|pair| Interval::new(pair[0], pair[1]))
    }

    /// The unique interval holding `value`; total because the outer bounds
    /// are infinite.
    pub fn interval_containing(&self, value: Quantity) -> Interval {
        let idx = self
            .bounds
            .partition_point(|bound| *bound <= Bound::Finite(value));
        Interval::new(self.bounds[idx - 1], self.bounds[idx])
    }
}

/// Intervals of `partition` holding at least one of `values`, each listed
/// once in the order first hit.
pub fn relevant_intervals(values: &[Quantity], partition: &Partition) -> Vec<Interval> {
    let mut seen: HashSet<Interval> = HashSet::default();
    let mut relevant = Vec::new();
    for value in values {
        let interval = partition.interval_containing(*value);
        if seen.insert(interval) {
            relevant.push(interval);
        }
    }
    relevant
}
