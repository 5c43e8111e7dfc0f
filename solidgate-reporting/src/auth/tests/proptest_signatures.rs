use base64::{Engine, engine::general_purpose::STANDARD};
use proptest::prelude::*;

use crate::auth::{Channel, RequestSigner, encode_body};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_signature_is_deterministic(
        public_key in "[a-zA-Z0-9_]{1,48}",
        private_key in "[a-zA-Z0-9_]{0,64}",
        body in any::<Vec<u8>>(),
    ) {
        let first = RequestSigner::new(Channel::new("a", &public_key, &private_key));
        let second = RequestSigner::new(Channel::new("b", &public_key, &private_key));

        prop_assert_eq!(first.sign(&body).unwrap(), second.sign(&body).unwrap());
    }

    #[test]
    fn test_signature_decodes_to_hex_digest(
        public_key in "[a-zA-Z0-9_]{1,48}",
        private_key in "[a-zA-Z0-9_]{1,64}",
        body in any::<Vec<u8>>(),
    ) {
        let signer = RequestSigner::new(Channel::new("shop", &public_key, &private_key));
        let decoded = STANDARD.decode(signer.sign(&body).unwrap()).unwrap();

        prop_assert_eq!(decoded.len(), 128);
        prop_assert!(hex::decode(&decoded).is_ok());
    }

    #[test]
    fn test_encoded_body_is_ascii_and_parses_back(
        cursor in "\\PC{0,32}",
        date in "[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}",
    ) {
        let value = serde_json::json!({ "date_from": date, "next_page_iterator": cursor });
        let bytes = encode_body(&value).unwrap();

        prop_assert!(bytes.is_ascii());
        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        prop_assert_eq!(parsed, value);
    }
}
