#![no_main]
use libfuzzer_sys::fuzz_target;
use bmpfilter::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, encoding and decoding again must produce identical pixels
    let Ok(decoded) = decode_bmp(data, enough::Unstoppable) else {
        return;
    };

    let Ok(reencoded) = encode_bmp(&decoded, enough::Unstoppable) else {
        return;
    };
    let Ok(decoded2) = decode_bmp(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.header(), decoded2.header());
    assert_eq!(decoded.width(), decoded2.width());
    assert_eq!(decoded.height(), decoded2.height());
    assert!(
        decoded.pixels().pixels().eq(decoded2.pixels().pixels()),
        "roundtrip pixel mismatch"
    );

    // A second encode is stable byte-for-byte
    let Ok(reencoded2) = encode_bmp(&decoded2, enough::Unstoppable) else {
        panic!("second encode failed");
    };
    assert_eq!(reencoded, reencoded2);
});
