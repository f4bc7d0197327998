#![no_main]

use keeper_share::{RecoverySession, codec, transport};
use libfuzzer_sys::fuzz_target;

// Fuzzing target for the text surfaces keepers paste into
//
// Feeds arbitrary strings to the codec, the transport parser and a recovery
// session. None of them may panic, and anything validate accepts must decode
// and re-encode to the same lowercase text.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = codec::share_identifier(text);
    let _ = codec::normalize(text);

    if codec::validate(text) {
        let share = codec::decode(text).expect("validated share must decode");
        assert_eq!(codec::encode(&share), text.to_ascii_lowercase());
    } else {
        let _ = codec::decode(text);
    }

    let _ = transport::is_valid_transport_format(text);
    if let Ok(parsed) = transport::parse_from_transport(text) {
        let wrapped = transport::format_for_transport(&parsed.share, parsed.keeper_index);
        assert_eq!(transport::parse_from_transport(&wrapped).as_ref(), Ok(&parsed));
        let _ = parsed.decode();
    }

    let mut session = RecoverySession::new();
    for line in text.lines() {
        let _ = session.add_piece(line);
    }
    if session.is_ready() {
        let _ = session.recover();
    }
});
