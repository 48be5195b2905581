use lzwcodec::lzw::{decode,encode,Encoder};
use lzwcodec::FIRST_PHRASE_CODE;
use proptest::prelude::*;

proptest! {
    /// Decoding the codes gives back the input.
    #[test]
    fn prop_roundtrip(input in prop::collection::vec(any::<u8>(), 1..2000)) {
        let codes = encode(&input);
        prop_assert_eq!(decode(&codes).unwrap(), input);
    }

    /// Long runs from a small alphabet hit the not-yet-bound code often.
    #[test]
    fn prop_roundtrip_repetitive(input in prop::collection::vec(0u8..3, 1..2000)) {
        let codes = encode(&input);
        prop_assert!(codes.len() <= input.len());
        prop_assert_eq!(decode(&codes).unwrap(), input);
    }

    /// Same input, same output.
    #[test]
    fn prop_deterministic(input: Vec<u8>) {
        prop_assert_eq!(encode(&input), encode(&input));
        if !input.is_empty() {
            let codes = encode(&input);
            prop_assert_eq!(decode(&codes), decode(&codes));
        }
    }

    /// Codes emitted never exceed the dictionary, and the dictionary grows by one
    /// code per emission starting from the first phrase code.
    #[test]
    fn prop_monotonic_codes(input in prop::collection::vec(0u8..4, 0..500)) {
        let mut coder = Encoder::new();
        let mut expected_next = FIRST_PHRASE_CODE;
        for sym in &input {
            if let Some(code) = coder.push(*sym) {
                prop_assert!(code < expected_next);
                expected_next += 1;
            }
            prop_assert_eq!(coder.next_code(), expected_next);
        }
    }

    /// Re-encoding a decoded stream reproduces the stream.
    #[test]
    fn prop_reencode(input in prop::collection::vec(any::<u8>(), 1..500)) {
        let codes = encode(&input);
        let expanded = decode(&codes).unwrap();
        prop_assert_eq!(encode(&expanded), codes);
    }
}
