use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::Codec;
use crate::error::ValueError;

/// Standard padded base64; encoding keeps base64's own letter case.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64;

impl Codec for Base64 {
    type Item = Vec<u8>;

    fn kind(&self) -> String {
        "bytesBase64".to_string()
    }

    fn decode(&self, input: &str) -> Result<Vec<u8>, ValueError> {
        STANDARD
            .decode(input)
            .map_err(|err| ValueError::invalid("bytesBase64", input, err))
    }

    fn encode(&self, item: &Vec<u8>) -> String {
        STANDARD.encode(item)
    }
}

/// Hex digits of either case on input, upper case on output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hex;

impl Codec for Hex {
    type Item = Vec<u8>;

    fn kind(&self) -> String {
        "bytesHex".to_string()
    }

    fn decode(&self, input: &str) -> Result<Vec<u8>, ValueError> {
        hex::decode(input).map_err(|err| ValueError::invalid("bytesHex", input, err))
    }

    fn encode(&self, item: &Vec<u8>) -> String {
        hex::encode_upper(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_accepts_mixed_case_and_prints_upper() {
        let bytes = Hex.decode("deADbeEF").unwrap();
        assert_eq!(bytes, vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(Hex.encode(&bytes), "DEADBEEF");
    }

    #[test]
    fn hex_rejects_bad_digits_and_odd_length() {
        assert!(Hex.decode("xyz").is_err());
        assert!(Hex.decode("abc").is_err());
    }

    #[test]
    fn base64_is_padded_standard() {
        assert_eq!(Base64.encode(&b"hi?".to_vec()), "aGk/");
        assert_eq!(Base64.decode("aGk/").unwrap(), b"hi?");
        assert_eq!(Base64.decode("aGk").map_err(|_| ()), Err(()));
    }

    #[test]
    fn empty_input_is_an_empty_element() {
        assert_eq!(Hex.decode("").unwrap(), Vec::<u8>::new());
        assert_eq!(Base64.decode("").unwrap(), Vec::<u8>::new());
    }
}
