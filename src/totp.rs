use core::fmt;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use constant_time_eq::constant_time_eq;

use crate::counter::{counter_bytes, system_time, time_step};
use crate::rfc::{assert_digits, assert_period, assert_secret};
use crate::{generate, Algorithm, OtpError, Secret, TotpConfig};

/// Parameters of a time based code: which algorithm, how many digits, how long a step lasts
/// and when counting starts. Its [secret](struct.Totp.html#structfield.secret) field is
/// sensitive data, treat it accordingly.
///
/// Checking submitted codes against a window of neighbouring steps is left to the caller.
///
/// ```rust
/// use hmac_otp::{Algorithm, Totp};
///
/// let totp = Totp::new(Algorithm::SHA1, 8, 30, b"12345678901234567890".to_vec()).unwrap();
/// assert_eq!(totp.generate(1111111109).unwrap(), "07081804");
/// ```
#[derive(Clone)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Totp {
    pub algorithm: Algorithm,
    /// 6 or 8
    pub digits: usize,
    /// Duration in seconds of a step. The recommended value per [rfc-6238](https://tools.ietf.org/html/rfc6238#section-5.2) is 30 seconds
    pub period: u64,
    /// `T0`, the Unix time counting starts from. 0 unless overridden.
    pub epoch: u64,
    /// non-encoded value
    pub secret: Vec<u8>,
}

impl PartialEq for Totp {
    fn eq(&self, other: &Self) -> bool {
        self.algorithm == other.algorithm
            && self.digits == other.digits
            && self.period == other.period
            && self.epoch == other.epoch
            && constant_time_eq(&self.secret, &other.secret)
    }
}

impl fmt::Debug for Totp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Totp")
            .field("algorithm", &self.algorithm)
            .field("digits", &self.digits)
            .field("period", &self.period)
            .field("epoch", &self.epoch)
            .field("secret", &format_args!("<{} bytes>", self.secret.len()))
            .finish()
    }
}

impl fmt::Display for Totp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "digits: {}; period: {}; epoch: {}; alg: {}",
            self.digits, self.period, self.epoch, self.algorithm,
        )
    }
}

impl Totp {
    /// # Errors
    ///
    /// Fails when `digits` isn't 6 or 8, `period` is 0 or `secret` is empty.
    /// Secrets shorter than the digest of `algorithm` are accepted, with a warning logged.
    pub fn new<S: Into<Vec<u8>>>(
        algorithm: Algorithm,
        digits: usize,
        period: u64,
        secret: S,
    ) -> Result<Totp, OtpError> {
        let secret = secret.into();
        assert_digits(digits)?;
        assert_period(period)?;
        assert_secret(&secret)?;
        if secret.len() < algorithm.digest_size() {
            log::warn!(
                "{} byte secret is shorter than the {} byte {} digest",
                secret.len(),
                algorithm.digest_size(),
                algorithm
            );
        }
        Ok(Totp {
            algorithm,
            digits,
            period,
            epoch: 0,
            secret,
        })
    }

    /// Build from an encoded [Secret](struct.Secret.html) with default SHA1, 6 digits and 30 seconds.
    pub fn with_defaults(secret: &Secret) -> Result<Totp, OtpError> {
        Totp::new(
            Algorithm::default(),
            crate::DEFAULT_DIGITS,
            crate::DEFAULT_PERIOD,
            secret.as_bytes(),
        )
    }

    /// Start counting steps from `epoch` instead of the Unix epoch.
    pub fn with_epoch(mut self, epoch: u64) -> Totp {
        self.epoch = epoch;
        self
    }

    /// Will generate a token given the provided timestamp in seconds
    pub fn generate(&self, time: u64) -> Result<String, OtpError> {
        let counter = counter_bytes(time, self.epoch, self.period)?;
        generate(self.algorithm, &self.secret, &counter, self.digits)
    }

    /// Generate a token from the current system time
    pub fn generate_current(&self) -> Result<String, OtpError> {
        self.generate(self.now()?)
    }

    /// Returns the timestamp of the first second for the next step
    /// given the provided timestamp in seconds
    pub fn next_step(&self, time: u64) -> Result<u64, OtpError> {
        let step = time_step(time, self.epoch, self.period)?;
        step.checked_add(1)
            .and_then(|s| s.checked_mul(self.period))
            .and_then(|s| s.checked_add(self.epoch))
            .ok_or(OtpError::TimeOverflow { time })
    }

    /// Returns the timestamp of the first second of the next step
    /// According to system time
    pub fn next_step_current(&self) -> Result<u64, OtpError> {
        self.next_step(self.now()?)
    }

    /// Give the ttl (in seconds) of the current token
    pub fn ttl(&self) -> Result<u64, OtpError> {
        let t = self.now()?;
        Ok(self.next_step(t)? - t)
    }

    // A clock set before 1970 is reported like any other time before the epoch.
    fn now(&self) -> Result<u64, OtpError> {
        system_time().map_err(|_| OtpError::InvalidTime {
            time: 0,
            epoch: self.epoch,
        })
    }

    /// Will return the base32 representation of the secret, which might be useful when users want to manually add the secret to their authenticator
    pub fn secret_base32(&self) -> String {
        Secret::from_raw(self.secret.as_slice()).to_base32()
    }

    /// Provisioning configuration for this TOTP, ready for [build_uri](fn.build_uri.html).
    pub fn to_config(&self, issuer: String, account_name: String) -> TotpConfig {
        TotpConfig {
            secret: self.secret_base32(),
            issuer,
            account_name,
            algorithm: self.algorithm,
            digits: self.digits,
            period: self.period,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_uri, ConfigError};

    const SECRET: &[u8] = b"TestSecretSuperSecret";

    #[test]
    fn new_validates() {
        assert_eq!(
            Totp::new(Algorithm::SHA1, 7, 30, SECRET).unwrap_err(),
            OtpError::UnsupportedDigits(7)
        );
        assert_eq!(
            Totp::new(Algorithm::SHA1, 6, 0, SECRET).unwrap_err(),
            OtpError::InvalidConfig(ConfigError::Period(0))
        );
        assert_eq!(
            Totp::new(Algorithm::SHA1, 6, 30, Vec::<u8>::new()).unwrap_err(),
            OtpError::InvalidConfig(ConfigError::EmptySecret)
        );
    }

    #[test]
    fn short_secret_is_accepted() {
        assert!(Totp::new(Algorithm::SHA512, 6, 30, SECRET).is_ok());
    }

    #[test]
    fn generate_token() {
        let totp = Totp::new(Algorithm::SHA1, 6, 1, SECRET).unwrap();
        assert_eq!(totp.generate(1000).unwrap(), "659761");
    }

    #[test]
    fn generate_rfc6238_sha1() {
        let totp = Totp::new(Algorithm::SHA1, 8, 30, b"12345678901234567890".to_vec()).unwrap();
        assert_eq!(totp.generate(59).unwrap(), "94287082");
        assert_eq!(totp.generate(1111111111).unwrap(), "14050471");
        assert_eq!(totp.generate(1234567890).unwrap(), "89005924");
        assert_eq!(totp.generate(2000000000).unwrap(), "69279037");
        assert_eq!(totp.generate(20000000000).unwrap(), "65353130");
    }

    #[test]
    fn generate_with_epoch() {
        let shifted = Totp::new(Algorithm::SHA1, 6, 1, SECRET)
            .unwrap()
            .with_epoch(500);
        let plain = Totp::new(Algorithm::SHA1, 6, 1, SECRET).unwrap();
        assert_eq!(shifted.generate(1500).unwrap(), plain.generate(1000).unwrap());
        assert_eq!(
            shifted.generate(499).unwrap_err(),
            OtpError::InvalidTime {
                time: 499,
                epoch: 500
            }
        );
    }

    #[test]
    fn generate_token_current() {
        let totp = Totp::new(Algorithm::SHA1, 6, 1, SECRET).unwrap();
        let time = system_time().unwrap();
        // steps last one second, the clock may tick between the two reads
        let current = totp.generate_current().unwrap();
        assert!(
            current == totp.generate(time).unwrap() || current == totp.generate(time + 1).unwrap()
        );
    }

    #[test]
    fn next_step() {
        let totp = Totp::new(Algorithm::SHA1, 6, 30, SECRET).unwrap();
        assert_eq!(totp.next_step(0).unwrap(), 30);
        assert_eq!(totp.next_step(29).unwrap(), 30);
        assert_eq!(totp.next_step(30).unwrap(), 60);

        let totp = totp.with_epoch(10);
        assert_eq!(totp.next_step(10).unwrap(), 40);
        assert!(totp.next_step(5).is_err());
    }

    #[test]
    fn next_step_at_end_of_time() {
        let totp = Totp::new(Algorithm::SHA1, 6, 30, SECRET).unwrap();
        assert_eq!(
            totp.next_step(u64::MAX).unwrap_err(),
            OtpError::TimeOverflow { time: u64::MAX }
        );
        assert_eq!(
            totp.clone().with_epoch(u64::MAX - 10).next_step(u64::MAX).unwrap_err(),
            OtpError::TimeOverflow { time: u64::MAX }
        );
        // last step that still has a representable successor
        let last = u64::MAX / 30 * 30 - 1;
        assert_eq!(totp.next_step(last).unwrap(), u64::MAX / 30 * 30);
        // generating the code itself never overflows
        assert!(totp.generate(u64::MAX).is_ok());
    }

    #[test]
    fn debug_hides_secret() {
        let totp = Totp::new(Algorithm::SHA1, 6, 30, SECRET).unwrap();
        let debug = format!("{:?}", totp);
        assert_eq!(
            debug,
            "Totp { algorithm: SHA1, digits: 6, period: 30, epoch: 0, secret: <21 bytes> }"
        );
        assert!(!debug.contains("84, 101"));
    }

    #[test]
    fn next_step_current_and_ttl() {
        let totp = Totp::new(Algorithm::SHA1, 6, 30, SECRET).unwrap();
        let next = totp.next_step_current().unwrap();
        assert_eq!(next % 30, 0);
        let ttl = totp.ttl().unwrap();
        assert!(ttl > 0 && ttl <= 30);
    }

    #[test]
    fn returns_base32() {
        let totp = Totp::new(Algorithm::SHA1, 6, 1, SECRET).unwrap();
        assert_eq!(totp.secret_base32(), "KRSXG5CTMVRXEZLUKN2XAZLSKNSWG4TFOQ");
    }

    #[test]
    fn with_defaults_from_base32() {
        let secret = Secret::from_base32("KRSXG5CTMVRXEZLUKN2XAZLSKNSWG4TFOQ").unwrap();
        let totp = Totp::with_defaults(&secret).unwrap();
        assert_eq!(totp.algorithm, Algorithm::SHA1);
        assert_eq!(totp.digits, 6);
        assert_eq!(totp.period, 30);
        assert_eq!(totp.epoch, 0);
        assert_eq!(totp.secret, SECRET);
    }

    #[test]
    fn config_round_trip() {
        let totp = Totp::new(Algorithm::SHA256, 8, 60, SECRET).unwrap();
        let config = totp.to_config("ACME".to_string(), "alice@example.com".to_string());
        let parsed = parse_uri(config.to_uri().unwrap()).unwrap();
        let secret = Secret::from_base32(&parsed.secret).unwrap();
        let back =
            Totp::new(parsed.algorithm, parsed.digits, parsed.period, secret.as_bytes()).unwrap();
        assert_eq!(back, totp);
    }

    #[test]
    fn comparison() {
        let reference = Totp::new(Algorithm::SHA1, 6, 30, SECRET).unwrap();
        assert_eq!(reference, Totp::new(Algorithm::SHA1, 6, 30, SECRET).unwrap());
        assert_ne!(reference, Totp::new(Algorithm::SHA256, 6, 30, SECRET).unwrap());
        assert_ne!(reference, Totp::new(Algorithm::SHA1, 8, 30, SECRET).unwrap());
        assert_ne!(reference, Totp::new(Algorithm::SHA1, 6, 60, SECRET).unwrap());
        assert_ne!(reference, reference.clone().with_epoch(1));
        assert_ne!(reference, Totp::new(Algorithm::SHA1, 6, 30, &b"other"[..]).unwrap());
    }

    #[test]
    fn display() {
        let totp = Totp::new(Algorithm::SHA512, 8, 30, SECRET).unwrap();
        assert_eq!(totp.to_string(), "digits: 8; period: 30; epoch: 0; alg: SHA512");
    }
}
