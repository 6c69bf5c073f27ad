use url::ParseError;

use crate::ConfigError;

/// Reasons an `otpauth://` URI couldn't be read back into a [TotpConfig](struct.TotpConfig.html).
#[derive(Debug, Eq, PartialEq)]
pub enum UriParseError {
    Url(ParseError),
    Scheme(String),
    Host(String),
    Algorithm(String),
    Digits(String),
    Period(String),
    IssuerDecoding(String),
    IssuerMismatch(String, String),
    AccountNameDecoding(String),
    Config(ConfigError),
}

impl std::error::Error for UriParseError {}

impl std::fmt::Display for UriParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UriParseError::Url(e) => write!(f, "Error parsing URL: {}", e),
            UriParseError::Scheme(scheme) => {
                write!(f, "Scheme should be otpauth, not \"{}\"", scheme)
            }
            UriParseError::Host(host) => write!(f, "Host should be totp, not \"{}\"", host),
            UriParseError::Algorithm(algo) => write!(
                f,
                "Algorithm can only be SHA1, SHA256 or SHA512, not \"{}\"",
                algo
            ),
            UriParseError::Digits(digits) => {
                write!(f, "Could not parse \"{}\" as a number.", digits)
            }
            UriParseError::Period(period) => {
                write!(f, "Could not parse \"{}\" as a number.", period)
            }
            UriParseError::IssuerDecoding(issuer) => {
                write!(f, "Couldn't URL decode \"{}\"", issuer)
            }
            UriParseError::IssuerMismatch(path_issuer, issuer) => write!(
                f,
                "An issuer \"{}\" could be retrieved from the path, but a different issuer \"{}\" was found in the issuer URL parameter",
                path_issuer, issuer,
            ),
            UriParseError::AccountNameDecoding(name) => {
                write!(f, "Couldn't URL decode \"{}\"", name)
            }
            UriParseError::Config(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl From<ConfigError> for UriParseError {
    fn from(e: ConfigError) -> Self {
        UriParseError::Config(e)
    }
}
