use keeper_share::{
    SecretDigest, ShamirError, Share, codec, format_for_transport, is_valid_transport_format,
    parse_from_transport, split,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct KeeperPacket {
    keeper: String,
    share: Share,
    digest: SecretDigest,
}

#[test]
fn test_share_serializes_as_encoded_string() {
    let share = Share {
        threshold: 2,
        index: 9,
        data: vec![0xca, 0xfe],
    };
    let json = serde_json::to_string(&share).unwrap();
    assert_eq!(json, "\"0209cafe\"");

    let back: Share = serde_json::from_str(&json).unwrap();
    assert_eq!(back, share);

    assert!(serde_json::from_str::<Share>("\"02\"").is_err());
}

#[test]
fn test_packet_round_trip() {
    let secret = b"packet secret";
    let shares = split(secret, 3, 2).unwrap();
    let packet = KeeperPacket {
        keeper: "Alice".into(),
        share: shares[0].clone(),
        digest: SecretDigest::of(secret),
    };

    let json = serde_json::to_string(&packet).unwrap();
    let back: KeeperPacket = serde_json::from_str(&json).unwrap();
    assert_eq!(back, packet);
}

#[test]
fn test_encoded_form_is_lowercase_hex() {
    let shares = split(&[0xAB; 8], 3, 2).unwrap();
    for share in &shares {
        let encoded = codec::encode(share);
        assert_eq!(encoded.len(), 2 * (2 + 8));
        assert!(encoded.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
        assert!(codec::validate(&encoded));
        assert_eq!(codec::share_identifier(&encoded), share.identifier());
    }
}

#[test]
fn test_reencoding_is_idempotent() {
    for encoded in ["020101", "ff01000102", "0aff7f7f7f7f"] {
        let share = codec::decode(encoded).unwrap();
        assert_eq!(codec::encode(&share), encoded);
    }
}

#[test]
fn test_decode_is_not_validate() {
    // Structurally decodable, but threshold 1 and index 0 fail validation
    let share = codec::decode("0100aa").unwrap();
    assert_eq!((share.threshold, share.index), (1, 0));
    assert!(!codec::validate("0100aa"));

    assert!(matches!(
        codec::decode("02"),
        Err(ShamirError::MalformedEncoding(_))
    ));
}

#[test]
fn test_transport_round_trip_with_real_share() {
    let shares = split(b"qr payload", 5, 3).unwrap();
    for (keeper, share) in shares.iter().enumerate() {
        let encoded = codec::encode(share);
        let wrapped = format_for_transport(&encoded, keeper);
        assert!(is_valid_transport_format(&wrapped));

        let parsed = parse_from_transport(&wrapped).unwrap();
        assert_eq!(parsed.keeper_index, keeper);
        assert_eq!(parsed.share, encoded);
        assert_eq!(&parsed.decode().unwrap(), share);
    }
}

#[test]
fn test_transport_validity() {
    assert!(!is_valid_transport_format("0201ff"));
    assert!(!is_valid_transport_format("K1_0201ff"));
    assert!(!is_valid_transport_format("K1-0201fz"));
    assert!(is_valid_transport_format("K7-0201FF"));
}
