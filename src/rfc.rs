//! Parameter checks shared by the engine, [Totp](struct.Totp.html) and the URI builder.

use crate::ConfigError;

/// Code lengths authenticator apps agree on.
pub const SUPPORTED_DIGITS: [usize; 2] = [6, 8];

/// Recommended step from [rfc-6238](https://tools.ietf.org/html/rfc6238#section-5.2).
pub const DEFAULT_PERIOD: u64 = 30;

/// Code length used when none is given.
pub const DEFAULT_DIGITS: usize = 6;

pub(crate) fn assert_digits(digits: usize) -> Result<(), ConfigError> {
    if SUPPORTED_DIGITS.contains(&digits) {
        Ok(())
    } else {
        Err(ConfigError::Digits(digits))
    }
}

pub(crate) fn assert_period(period: u64) -> Result<(), ConfigError> {
    if period == 0 {
        Err(ConfigError::Period(period))
    } else {
        Ok(())
    }
}

pub(crate) fn assert_secret<S: AsRef<[u8]> + ?Sized>(secret: &S) -> Result<(), ConfigError> {
    if secret.as_ref().is_empty() {
        Err(ConfigError::EmptySecret)
    } else {
        Ok(())
    }
}
