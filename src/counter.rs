//! Moving factor for TOTP: `T = floor((time - T0) / X)` encoded the way
//! [rfc-4226](https://tools.ietf.org/html/rfc4226#section-5.2) expects its counter, as 8 big-endian bytes.

use std::time::{SystemTime, SystemTimeError, UNIX_EPOCH};

use crate::rfc::assert_period;
use crate::OtpError;

/// Number of whole `period` steps elapsed between `epoch` and `time`.
///
/// # Errors
///
/// * [OtpError::InvalidTime](enum.OtpError.html#variant.InvalidTime) when `time < epoch`
/// * [OtpError::InvalidConfig](enum.OtpError.html#variant.InvalidConfig) when `period` is 0
pub fn time_step(time: u64, epoch: u64, period: u64) -> Result<u64, OtpError> {
    assert_period(period)?;
    let elapsed = time
        .checked_sub(epoch)
        .ok_or(OtpError::InvalidTime { time, epoch })?;
    Ok(elapsed / period)
}

/// Encode the time step for `time` as an HOTP counter.
///
/// ```rust
/// use hmac_otp::counter_bytes;
///
/// assert_eq!(counter_bytes(59, 0, 30).unwrap(), [0, 0, 0, 0, 0, 0, 0, 1]);
/// ```
pub fn counter_bytes(time: u64, epoch: u64, period: u64) -> Result<[u8; 8], OtpError> {
    let step = time_step(time, epoch, period)?;
    log::trace!("time={} epoch={} period={} step={}", time, epoch, period, step);
    Ok(step.to_be_bytes())
}

pub(crate) fn system_time() -> Result<u64, SystemTimeError> {
    let t = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    Ok(t)
}
