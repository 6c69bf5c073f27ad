//! Prints the current codes for every algorithm, then the provisioning URI an
//! authenticator app would scan. With `--features qr` the URI is also written to
//! `totp_secret.png`.

use hmac_otp::{counter_bytes, generate, Algorithm, Secret, Totp};

fn main() {
    let secret = Secret::from_raw(&b"12345678901234567890"[..]);

    let totp = Totp::with_defaults(&secret).unwrap();
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let counter = counter_bytes(now, 0, 30).unwrap();
    println!("unixtime={} T={:?}", now, counter);
    for algorithm in [Algorithm::SHA1, Algorithm::SHA256, Algorithm::SHA512] {
        println!(
            "{}\t{}",
            algorithm,
            generate(algorithm, secret.as_bytes(), &counter, 6).unwrap()
        );
    }
    println!("next step in {}s", totp.ttl().unwrap());

    let mut config = totp.to_config("TOTPexample".to_string(), "user1@example.com".to_string());
    config.algorithm = Algorithm::SHA512;
    println!("secret base32 {}", config.secret);
    let uri = config.to_uri().unwrap();
    println!("{}", uri);

    #[cfg(feature = "qr")]
    {
        let png = config.to_qr_png().unwrap();
        std::fs::write("totp_secret.png", png).unwrap();
        println!("wrote totp_secret.png");
    }
}
