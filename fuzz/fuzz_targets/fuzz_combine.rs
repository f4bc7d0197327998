#![no_main]

use keeper_share::{Share, combine};
use libfuzzer_sys::fuzz_target;

// Fuzzing target for combine
//
// Builds arbitrary shares from the fuzzer input: zero and duplicate indices,
// mismatched thresholds, mismatched or empty payloads. combine must always
// return a Result and never panic.
fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let mut shares = Vec::new();
    let mut offset = 0;

    // 1-20 shares keeps iterations fast
    let num_shares = (data[offset] % 20).max(1);
    offset += 1;

    for _ in 0..num_shares {
        if offset + 3 > data.len() {
            break;
        }

        let threshold = data[offset];
        let index = data[offset + 1];
        let data_len = (data[offset + 2] as usize).min(64);
        offset += 3;

        let end = (offset + data_len).min(data.len());
        let mut share_data = data[offset..end].to_vec();
        share_data.resize(data_len, 0);
        offset = end;

        shares.push(Share {
            threshold,
            index,
            data: share_data,
        });
    }

    let _result = combine(&shares);

    if !shares.is_empty() {
        let _result = combine(&shares[0..1]);

        let duplicate_shares = vec![shares[0].clone(), shares[0].clone()];
        let _result = combine(&duplicate_shares);

        let mut zero_index_shares = shares.clone();
        zero_index_shares[0].index = 0;
        let _result = combine(&zero_index_shares);
    }
});
