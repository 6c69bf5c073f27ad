//! Provisioning URIs in the [Key Uri Format](https://github.com/google/google-authenticator/wiki/Key-Uri-Format):
//!
//! `otpauth://totp/<issuer>:<accountName>?secret=<secret>&issuer=<issuer>&algorithm=<ALG>&digits=<n>&period=<p>`

use core::fmt;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use url::{Host, Url};

use crate::rfc::{assert_digits, assert_period, assert_secret, DEFAULT_DIGITS, DEFAULT_PERIOD};
use crate::{Algorithm, ConfigError, OtpError, UriParseError};

/// Everything an authenticator app needs to start producing codes.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct TotpConfig {
    /// Base32 encoded secret, inserted as is.
    pub secret: String,
    /// The "ACME" part of "ACME:alice@example.com", usually the name of the service.
    /// Left out of the URI when empty.
    pub issuer: String,
    /// The "alice@example.com" part of "ACME:alice@example.com".
    pub account_name: String,
    pub algorithm: Algorithm,
    /// 6 or 8
    pub digits: usize,
    /// Duration in seconds of a step.
    pub period: u64,
}

impl TotpConfig {
    /// A SHA1, 6 digit, 30 second configuration.
    pub fn new(secret: String, issuer: String, account_name: String) -> TotpConfig {
        TotpConfig {
            secret,
            issuer,
            account_name,
            algorithm: Algorithm::default(),
            digits: DEFAULT_DIGITS,
            period: DEFAULT_PERIOD,
        }
    }

    /// Check digits, period and secret without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        assert_digits(self.digits)?;
        assert_period(self.period)?;
        assert_secret(self.secret.as_str())
    }

    /// See [build_uri](fn.build_uri.html).
    pub fn to_uri(&self) -> Result<String, OtpError> {
        build_uri(self)
    }

    /// Will return the provisioning URI rendered as a PNG QR code. Needs feature `qr` to be enabled!
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid, or the URI is too long to fit in a QR code.
    #[cfg(feature = "qr")]
    #[cfg_attr(docsrs, doc(cfg(feature = "qr")))]
    pub fn to_qr_png(&self) -> Result<Vec<u8>, String> {
        let uri = build_uri(self).map_err(|e| e.to_string())?;
        qrcodegen_image::draw_png(&uri)
    }

    /// Same as [to_qr_png](#method.to_qr_png), base64 encoded so it can be embedded in HTML.
    #[cfg(feature = "qr")]
    #[cfg_attr(docsrs, doc(cfg(feature = "qr")))]
    pub fn to_qr_base64(&self) -> Result<String, String> {
        let uri = build_uri(self).map_err(|e| e.to_string())?;
        qrcodegen_image::draw_base64(&uri)
    }
}

impl fmt::Display for TotpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "digits: {}; period: {}; alg: {}; issuer: <{}>({})",
            self.digits, self.period, self.algorithm, self.issuer, self.account_name
        )
    }
}

/// Will generate the standard URL used to add a TOTP to an authenticator app. Usually shown as a QR code.
///
/// Issuer and account name are percent-encoded, parameters are joined with `&`.
///
/// # Errors
///
/// Will return [OtpError::InvalidConfig](enum.OtpError.html#variant.InvalidConfig) if `digits` isn't 6 or 8,
/// `period` is 0 or `secret` is empty.
pub fn build_uri(config: &TotpConfig) -> Result<String, OtpError> {
    config.validate().map_err(OtpError::InvalidConfig)?;

    let account_name = urlencoding::encode(&config.account_name);
    let mut params = vec![format!("secret={}", config.secret)];
    let label = if config.issuer.is_empty() {
        account_name.into_owned()
    } else {
        let issuer = urlencoding::encode(&config.issuer);
        params.push(format!("issuer={}", issuer));
        format!("{}:{}", issuer, account_name)
    };
    params.push(format!("algorithm={}", config.algorithm));
    params.push(format!("digits={}", config.digits));
    params.push(format!("period={}", config.period));

    Ok(format!("otpauth://totp/{}?{}", label, params.join("&")))
}

/// Read a configuration back from a provisioning URI.
///
/// Missing `algorithm`, `digits` and `period` fall back to SHA1, 6 and 30.
/// Unknown parameters are ignored.
pub fn parse_uri<S: AsRef<str>>(uri: S) -> Result<TotpConfig, UriParseError> {
    let uri = uri.as_ref();
    let url = Url::parse(uri).map_err(UriParseError::Url)?;
    if url.scheme() != "otpauth" {
        return Err(UriParseError::Scheme(url.scheme().to_string()));
    }
    if url.host() != Some(Host::Domain("totp")) {
        return Err(UriParseError::Host(
            url.host_str().unwrap_or_default().to_string(),
        ));
    }

    let mut config = TotpConfig::new(String::new(), String::new(), String::new());

    let path = raw_label(uri);
    let (path_issuer, account_name) = match path.split_once(':') {
        Some((issuer, account_name)) => (Some(issuer), account_name),
        None => (None, path),
    };
    let path_issuer = path_issuer
        .map(|issuer| {
            urlencoding::decode(issuer)
                .map(|decoded| decoded.into_owned())
                .map_err(|_| UriParseError::IssuerDecoding(issuer.to_string()))
        })
        .transpose()?;
    config.account_name = urlencoding::decode(account_name)
        .map_err(|_| UriParseError::AccountNameDecoding(account_name.to_string()))?
        .into_owned();

    let mut param_issuer: Option<String> = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "secret" => config.secret = value.into_owned(),
            "issuer" => param_issuer = Some(value.into_owned()),
            "algorithm" => {
                config.algorithm = value
                    .parse::<Algorithm>()
                    .map_err(|_| UriParseError::Algorithm(value.to_string()))?
            }
            "digits" => {
                config.digits = value
                    .parse::<usize>()
                    .map_err(|_| UriParseError::Digits(value.to_string()))?
            }
            "period" => {
                config.period = value
                    .parse::<u64>()
                    .map_err(|_| UriParseError::Period(value.to_string()))?
            }
            _ => {}
        }
    }

    config.issuer = match (path_issuer, param_issuer) {
        (Some(path), Some(param)) if path != param => {
            return Err(UriParseError::IssuerMismatch(path, param))
        }
        (Some(issuer), _) | (None, Some(issuer)) => issuer,
        (None, None) => String::new(),
    };

    config.validate()?;
    Ok(config)
}

// Url::path() resolves dot segments, which would turn an account named ".." into nothing.
fn raw_label(uri: &str) -> &str {
    let after_scheme = uri.split_once("://").map_or(uri, |(_, rest)| rest);
    let path = after_scheme.split_once('/').map_or("", |(_, path)| path);
    let end = path.find(|c| c == '?' || c == '#').unwrap_or(path.len());
    path[..end].trim_start_matches('/')
}
