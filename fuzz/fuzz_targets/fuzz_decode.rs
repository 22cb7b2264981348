#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic
    let Ok(mut bitmap) = bmpfilter::decode_bmp(data, enough::Unstoppable) else {
        return;
    };

    // Filters must never panic on anything the decoder accepts
    let _ = bmpfilter::median(&mut bitmap, 3, enough::Unstoppable);
    let _ = bmpfilter::gamma(&mut bitmap, 2.2, enough::Unstoppable);
});
