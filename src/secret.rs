//! Shared key material, and the base32 text form authenticator apps exchange it in.
//!
//! ```
//! use hmac_otp::Secret;
//!
//! let secret = Secret::from_base32("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").unwrap();
//! assert_eq!(secret.as_bytes(), b"12345678901234567890");
//! assert_eq!(secret.to_base32(), "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ");
//! ```

use base32::Alphabet;

use constant_time_eq::constant_time_eq;

/// Different ways secret parsing failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretParseError {
    /// Invalid base32 input.
    ParseBase32,
}

impl std::error::Error for SecretParseError {}

impl std::fmt::Display for SecretParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretParseError::ParseBase32 => write!(f, "Could not decode base32 secret."),
        }
    }
}

/// Raw bytes of the key shared between client and server.
#[derive(Clone)]
#[cfg_attr(feature = "zeroize", derive(zeroize::Zeroize, zeroize::ZeroizeOnDrop))]
pub struct Secret(Vec<u8>);

impl PartialEq for Secret {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(&self.0, &other.0)
    }
}

impl Eq for Secret {}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret(<{} bytes>)", self.0.len())
    }
}

#[cfg(feature = "gen_secret")]
#[cfg_attr(docsrs, doc(cfg(feature = "gen_secret")))]
impl Default for Secret {
    fn default() -> Self {
        Secret::generate()
    }
}

impl AsRef<[u8]> for Secret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Secret {
    fn from(bytes: Vec<u8>) -> Self {
        Secret(bytes)
    }
}

impl Secret {
    pub fn from_raw<B: Into<Vec<u8>>>(bytes: B) -> Self {
        Secret(bytes.into())
    }

    /// Decode [rfc-4648](https://tools.ietf.org/html/rfc4648#section-6) base32.
    /// Case and trailing `=` padding are ignored.
    pub fn from_base32(encoded: &str) -> Result<Self, SecretParseError> {
        let normalized = encoded.trim_end_matches('=').to_ascii_uppercase();
        base32::decode(Alphabet::Rfc4648 { padding: false }, &normalized)
            .map(Secret)
            .ok_or(SecretParseError::ParseBase32)
    }

    /// Unpadded base32, the form expected in provisioning URIs.
    pub fn to_base32(&self) -> String {
        base32::encode(Alphabet::Rfc4648 { padding: false }, &self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Generate a CSPRNG binary value of 160 bits,
    /// the recomended size from [rfc-4226](https://www.rfc-editor.org/rfc/rfc4226#section-4).
    #[cfg(feature = "gen_secret")]
    #[cfg_attr(docsrs, doc(cfg(feature = "gen_secret")))]
    pub fn generate() -> Secret {
        use rand::Rng;

        let mut rng = rand::rng();
        let mut secret: [u8; 20] = Default::default();
        rng.fill(&mut secret[..]);
        Secret(secret.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::{Secret, SecretParseError};

    const BASE32: &str = "KRSXG5CTMVRXEZLUKN2XAZLSKNSWG4TFOQ";
    const BYTES: &[u8] = b"TestSecretSuperSecret";

    #[test]
    fn secret_from_base32() {
        assert_eq!(Secret::from_base32(BASE32).unwrap().as_bytes(), BYTES);
    }

    #[test]
    fn secret_from_padded_lowercase_base32() {
        let padded = format!("{}======", BASE32.to_lowercase());
        assert_eq!(Secret::from_base32(&padded).unwrap().as_bytes(), BYTES);
    }

    #[test]
    fn secret_to_base32() {
        assert_eq!(Secret::from_raw(BYTES).to_base32(), BASE32);
    }

    #[test]
    fn secret_invalid_base32() {
        assert_eq!(
            Secret::from_base32("not base32!").unwrap_err(),
            SecretParseError::ParseBase32
        );
        let non_ascii = String::from_utf8(vec![240, 159, 146, 150]).unwrap();
        assert!(Secret::from_base32(&non_ascii).is_err());
    }

    #[test]
    fn secret_debug_is_redacted() {
        let secret = Secret::from_raw(BYTES);
        assert_eq!(format!("{:?}", secret), "Secret(<21 bytes>)");
    }

    #[test]
    fn secret_equality() {
        assert_eq!(Secret::from_raw(BYTES), Secret::from_base32(BASE32).unwrap());
        assert_ne!(Secret::from_raw(BYTES), Secret::from_raw(&b"other"[..]));
    }

    #[test]
    #[cfg(feature = "gen_secret")]
    fn secret_generate() {
        let sec = Secret::generate();
        assert_eq!(sec.len(), 20);
        assert_ne!(sec, Secret::default());
    }
}
