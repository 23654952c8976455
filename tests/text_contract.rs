//! Integration tests for the text-in/text-out contract of each code.
//!
//! These tests go through the string helpers only, the way a caller that
//! reads literals and prints results would use the crate.

use channel_codes::cs::ecc::{cdma_decode, cdma_encode, crc_remainder, hamming_encode};
use channel_codes::Error;

/// Spread three bits and recover them with the same code.
#[test]
fn test_cdma_round_trip() {
    let code = "(1, -1, 1, 1)";
    let signal = cdma_encode(code, "(1, -1, -1)").expect("encode failed");
    assert_eq!(signal, "(1,-1,1,1,-1,1,-1,-1,-1,1,-1,-1)");

    let (raw, signs) = cdma_decode(code, &signal).expect("decode failed");
    assert_eq!(raw, "1.00, -1.00, -1.00");
    assert_eq!(signs, "1, -1, -1");
}

/// Two devices transmit at once; each decodes only its own bits.
#[test]
fn test_cdma_two_devices_on_one_channel() {
    let code_a = "(1,1,1,1)";
    let code_b = "(1,-1,1,-1)";

    let tx_a = cdma_encode(code_a, "(1,-1)").unwrap();
    let tx_b = cdma_encode(code_b, "(1,1)").unwrap();

    // Sum the two chip streams chip by chip.
    let parse = |s: &str| -> Vec<i32> {
        s.trim_matches(|c: char| c == '(' || c == ')')
            .split(',')
            .map(|t| t.parse().unwrap())
            .collect()
    };
    let channel: Vec<String> = parse(&tx_a)
        .iter()
        .zip(parse(&tx_b))
        .map(|(a, b)| (a + b).to_string())
        .collect();
    let channel = format!("({})", channel.join(","));

    assert_eq!(cdma_decode(code_a, &channel).unwrap().1, "1, -1");
    assert_eq!(cdma_decode(code_b, &channel).unwrap().1, "1, 1");
}

/// Append the remainder, then check the transmitted frame divides evenly.
#[test]
fn test_crc_frame_check() {
    let data = "100110101111010010001";
    let (remainder, trace) = crc_remainder(data, "1011").expect("crc failed");
    assert_eq!(remainder, "101");
    assert!(trace.len() > 2);

    let frame = format!("{}{}", data, remainder);
    let (check, _) = crc_remainder(&frame, "1011").unwrap();
    assert_eq!(check, "000");
}

#[test]
fn test_hamming_is_deterministic() {
    let first = hamming_encode("1011").unwrap();
    let second = hamming_encode("1011").unwrap();
    assert_eq!(first, second);
    assert_eq!(first.0, "0110011");
}

#[test]
fn test_malformed_input_is_typed() {
    assert!(matches!(cdma_encode("()", "(1)"), Err(Error::InvalidInput(_))));
    assert!(matches!(
        cdma_decode("(1,-1)", "(1,one)"),
        Err(Error::Format { .. })
    ));
    assert!(matches!(crc_remainder("1011", "1"), Err(Error::InvalidInput(_))));
    assert!(matches!(hamming_encode("2"), Err(Error::Format { .. })));
}
