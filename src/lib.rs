//! This library computes HOTP ([rfc-4226](https://tools.ietf.org/html/rfc4226)) and TOTP
//! ([rfc-6238](https://tools.ietf.org/html/rfc6238)) codes bit-exactly, and builds the
//! `otpauth://` provisioning URIs authenticator apps import.
//!
//! Everything here is a pure computation: nothing is stored, nothing blocks, and every
//! function can be called from any number of threads at once. Diagnostics go through the
//! [`log`](https://docs.rs/log) facade at `trace` level and never influence results.
//!
//! Be aware that some authenticator apps will accept the `SHA256`
//! and `SHA512` algorithms but silently fallback to `SHA1`.
//!
//! # Examples
//!
//! ```rust
//! use hmac_otp::{counter_bytes, generate, Algorithm};
//!
//! let counter = counter_bytes(59, 0, 30).unwrap();
//! let code = generate(Algorithm::SHA1, b"12345678901234567890", &counter, 8).unwrap();
//! assert_eq!(code, "94287082");
//! ```
//!
//! ```rust
//! use hmac_otp::{build_uri, Algorithm, Secret, TotpConfig};
//!
//! let config = TotpConfig {
//!     secret: Secret::from_raw(&b"12345678901234567890"[..]).to_base32(),
//!     issuer: "ACME Co".to_string(),
//!     account_name: "john@example.com".to_string(),
//!     algorithm: Algorithm::SHA1,
//!     digits: 6,
//!     period: 30,
//! };
//! assert_eq!(
//!     build_uri(&config).unwrap(),
//!     "otpauth://totp/ACME%20Co:john%40example.com?secret=GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ&issuer=ACME%20Co&algorithm=SHA1&digits=6&period=30"
//! );
//! ```

mod counter;
mod error;
mod hotp;
mod rfc;
mod secret;
mod totp;
mod uri;
mod uri_error;

pub use counter::{counter_bytes, time_step};
pub use error::{ConfigError, OtpError};
pub use hotp::{generate, hotp};
pub use rfc::{DEFAULT_DIGITS, DEFAULT_PERIOD, SUPPORTED_DIGITS};
pub use secret::{Secret, SecretParseError};
pub use totp::Totp;
pub use uri::{build_uri, parse_uri, TotpConfig};
pub use uri_error::UriParseError;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use core::fmt;
use std::str::FromStr;

use hmac::Mac;

type HmacSha1 = hmac::Hmac<sha1::Sha1>;
type HmacSha256 = hmac::Hmac<sha2::Sha256>;
type HmacSha512 = hmac::Hmac<sha2::Sha512>;

/// Algorithm enum holds the three standards algorithms for TOTP as per the [reference implementation](https://tools.ietf.org/html/rfc6238#appendix-A)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Algorithm {
    #[default]
    SHA1,
    SHA256,
    SHA512,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::SHA1 => f.write_str("SHA1"),
            Algorithm::SHA256 => f.write_str("SHA256"),
            Algorithm::SHA512 => f.write_str("SHA512"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SHA1" => Ok(Algorithm::SHA1),
            "SHA256" => Ok(Algorithm::SHA256),
            "SHA512" => Ok(Algorithm::SHA512),
            _ => Err(OtpError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl Algorithm {
    /// Length in bytes of the HMAC this algorithm produces.
    pub fn digest_size(&self) -> usize {
        match self {
            Algorithm::SHA1 => 20,
            Algorithm::SHA256 => 32,
            Algorithm::SHA512 => 64,
        }
    }

    fn hash<D>(mut digest: D, data: &[u8]) -> Vec<u8>
    where
        D: Mac,
    {
        digest.update(data);
        digest.finalize().into_bytes().to_vec()
    }

    /// HMAC of `message` keyed with `key`.
    pub fn compute(&self, key: &[u8], message: &[u8]) -> Vec<u8> {
        // HMAC takes keys of any length, new_from_slice can't fail
        match self {
            Algorithm::SHA1 => Algorithm::hash(
                HmacSha1::new_from_slice(key).expect("hmac accepts any key length"),
                message,
            ),
            Algorithm::SHA256 => Algorithm::hash(
                HmacSha256::new_from_slice(key).expect("hmac accepts any key length"),
                message,
            ),
            Algorithm::SHA512 => Algorithm::hash(
                HmacSha512::new_from_slice(key).expect("hmac accepts any key length"),
                message,
            ),
        }
    }
}
