use tracing::level_filters::LevelFilter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    #[default]
    Quiet,
    Summary,
    Detailed,
}

impl Verbosity {
    /// Levels above 2 are clamped to `Detailed`.
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Verbosity::Quiet,
            1 => Verbosity::Summary,
            _ => Verbosity::Detailed,
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::WARN,
            Verbosity::Summary => LevelFilter::INFO,
            Verbosity::Detailed => LevelFilter::DEBUG,
        }
    }
}

/// Carried through a solve so the amount of reporting is decided by the
/// caller rather than by process-wide state. Dumps of sum sets and tables are
/// only built when `detailed()` holds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Diagnostics {
    pub verbosity: Verbosity,
}

impl Diagnostics {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    pub fn quiet() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> bool {
        self.verbosity >= Verbosity::Summary
    }

    pub fn detailed(&self) -> bool {
        self.verbosity >= Verbosity::Detailed
    }
}
