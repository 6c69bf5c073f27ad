/// A parameter set that can't produce interoperable codes or URIs.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ConfigError {
    /// Only 6 and 8 digit codes are accepted.
    Digits(usize),
    /// A time step has to last at least one second.
    Period(u64),
    /// The shared secret has no bytes.
    EmptySecret,
}

impl std::error::Error for ConfigError {}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Digits(digits) => write!(
                f,
                "Codes must have 6 or 8 digits. {} digits is not allowed",
                digits
            ),
            ConfigError::Period(period) => write!(
                f,
                "Period must be a positive number of seconds, not {}",
                period
            ),
            ConfigError::EmptySecret => write!(f, "Secret can't be empty"),
        }
    }
}

/// Failure of a code or counter computation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum OtpError {
    /// `time` lies before the epoch `T0`, which would make the counter negative.
    InvalidTime { time: u64, epoch: u64 },
    /// The step following `time` lies beyond `u64::MAX` seconds.
    TimeOverflow { time: u64 },
    /// Requested code length is outside {6, 8}.
    UnsupportedDigits(usize),
    /// Malformed parameters.
    InvalidConfig(ConfigError),
    /// Unknown hash algorithm name.
    UnsupportedAlgorithm(String),
}

impl std::error::Error for OtpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OtpError::InvalidConfig(e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for OtpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OtpError::InvalidTime { time, epoch } => write!(
                f,
                "Time {} is before the epoch {}, the counter would be negative",
                time, epoch
            ),
            OtpError::TimeOverflow { time } => write!(
                f,
                "Time {} is too close to the end of time to compute the next step",
                time
            ),
            OtpError::UnsupportedDigits(digits) => write!(
                f,
                "Codes must have 6 or 8 digits. {} digits is not supported",
                digits
            ),
            OtpError::InvalidConfig(e) => write!(f, "Invalid configuration: {}", e),
            OtpError::UnsupportedAlgorithm(name) => write!(
                f,
                "Algorithm can only be SHA1, SHA256 or SHA512, not \"{}\"",
                name
            ),
        }
    }
}

impl From<ConfigError> for OtpError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Digits(digits) => OtpError::UnsupportedDigits(digits),
            other => OtpError::InvalidConfig(other),
        }
    }
}
