//! HOTP as defined by [rfc-4226](https://tools.ietf.org/html/rfc4226#section-5.3).
//! TOTP is the same computation fed with a [time based counter](fn.counter_bytes.html).

use crate::rfc::assert_digits;
use crate::{Algorithm, OtpError};

/// Will compute the code for the given counter bytes.
///
/// `secret` is the raw, non-encoded key. The engine accepts any non-empty key but
/// [rfc-4226](https://tools.ietf.org/html/rfc4226#section-4) asks for at least 128 bits,
/// and keys shorter than the digest size of `algorithm` weaken the HMAC.
///
/// The code is always exactly `digits` characters long, left-padded with `0`.
///
/// ```rust
/// use hmac_otp::{generate, Algorithm};
///
/// let code = generate(Algorithm::SHA1, b"12345678901234567890", &0u64.to_be_bytes(), 6).unwrap();
/// assert_eq!(code, "755224");
/// ```
///
/// # Errors
///
/// Will return [OtpError::UnsupportedDigits](enum.OtpError.html#variant.UnsupportedDigits)
/// unless `digits` is 6 or 8.
pub fn generate(
    algorithm: Algorithm,
    secret: &[u8],
    counter: &[u8; 8],
    digits: usize,
) -> Result<String, OtpError> {
    assert_digits(digits)?;
    let mac = algorithm.compute(secret, counter);
    log::trace!("{} mac={:02x?} len={}", algorithm, mac, mac.len());
    let code = truncate(&mac) % 10_u32.pow(digits as u32);
    log::trace!("code={}", code);
    Ok(format!("{1:00$}", digits, code))
}

/// Event based HOTP, encoding `counter` big-endian before calling [generate](fn.generate.html).
pub fn hotp(
    algorithm: Algorithm,
    secret: &[u8],
    counter: u64,
    digits: usize,
) -> Result<String, OtpError> {
    generate(algorithm, secret, &counter.to_be_bytes(), digits)
}

/// Dynamic truncation: the low nibble of the last byte picks a 4 byte window,
/// read big-endian and stripped of its sign bit.
pub(crate) fn truncate(mac: &[u8]) -> u32 {
    let offset = (mac[mac.len() - 1] & 0x0f) as usize;
    let p = u32::from_be_bytes([
        mac[offset],
        mac[offset + 1],
        mac[offset + 2],
        mac[offset + 3],
    ]);
    log::trace!("offset={} p={}", offset, p);
    p & 0x7fff_ffff
}
