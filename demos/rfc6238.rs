//! Reproduces the test vector table of rfc-6238 Appendix B.

use hmac_otp::{counter_bytes, generate, Algorithm};

const TIMES: [u64; 6] = [59, 1111111109, 1111111111, 1234567890, 2000000000, 20000000000];

fn seed(algorithm: Algorithm) -> Vec<u8> {
    b"1234567890"
        .iter()
        .cycle()
        .take(algorithm.digest_size())
        .copied()
        .collect()
}

fn main() {
    println!("+-------------+------------------+----------+--------+");
    println!("|  Time (sec) | Value of T (Hex) |   TOTP   |  Mode  |");
    println!("+-------------+------------------+----------+--------+");
    for time in TIMES {
        let counter = counter_bytes(time, 0, 30).unwrap();
        for algorithm in [Algorithm::SHA1, Algorithm::SHA256, Algorithm::SHA512] {
            let code = generate(algorithm, &seed(algorithm), &counter, 8).unwrap();
            println!(
                "| {:>11} | {:016X} | {} | {:<6} |",
                time,
                u64::from_be_bytes(counter),
                code,
                algorithm
            );
        }
    }
}
