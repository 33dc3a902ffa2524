use core::fmt;

pub type Result<T> = core::result::Result<T, Error>;

/// Reasons an assignment argument does not fit the buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mismatch {
    /// Colour does not carry the buffer's channel count
    Channels { expected: usize, found: usize },
    /// Cyclic assignment with no colours to cycle through
    EmptySequence,
    /// Range step of zero
    ZeroStep,
}

#[derive(Debug)]
pub enum Error {
    /// Index or range bound outside `0..len`
    InvalidIndex { index: usize, len: usize },
    TypeMismatch(Mismatch),
    /// Pulse output failed; the frame may be partially shown
    PeripheralFailure(anyhow::Error),
    InvalidConfig(&'static str),
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channels { expected, found } => {
                write!(f, "expected {expected} channels, found {found}")
            }
            Self::EmptySequence => write!(f, "colour sequence is empty"),
            Self::ZeroStep => write!(f, "range step must be non-zero"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndex { index, len } => {
                write!(f, "pixel index {index} out of range (len {len})")
            }
            Self::TypeMismatch(m) => write!(f, "type mismatch: {m}"),
            Self::PeripheralFailure(e) => write!(f, "peripheral failure: {e}"),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PeripheralFailure(e) => Some(&**e),
            _ => None,
        }
    }
}

impl From<Mismatch> for Error {
    fn from(m: Mismatch) -> Self {
        Self::TypeMismatch(m)
    }
}
