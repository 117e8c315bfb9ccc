use ikp_utils::Quantity;

#[derive(Debug, thiserror::Error)]
pub enum KnapsackError {
    #[error("instance has no capacity line ('t <capacity>')")]
    MissingCapacity,

    #[error("line {line}: capacity is defined more than once")]
    DuplicateCapacity { line: usize },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("capacity {0} is negative")]
    NegativeCapacity(Quantity),

    #[error("no interval at step {step} covers [{lower}, {upper})")]
    InvariantViolation {
        step: usize,
        lower: String,
        upper: String,
    },

    #[error("{0} is too large to add up exactly")]
    TooLarge(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("solution line {line}: {message}")]
    MalformedSolution { line: usize, message: String },

    #[error("item {0} is not part of the instance")]
    UnknownItem(usize),

    #[error("total weight ({weight}) exceeded capacity ({capacity})")]
    Overweight { weight: Quantity, capacity: Quantity },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type KnapsackResult<T> = Result<T, KnapsackError>;
