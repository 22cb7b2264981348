#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(width: i32, height: i32, bpp: u16, offset: u32) -> Vec<u8> {
    let mut h = vec![0u8; 54];
    h[0] = b'B'; h[1] = b'M';
    h[10..14].copy_from_slice(&offset.to_le_bytes()); // data offset
    h[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    h[18..22].copy_from_slice(&width.to_le_bytes());
    h[22..26].copy_from_slice(&height.to_le_bytes());
    h[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    h[28..30].copy_from_slice(&bpp.to_le_bytes());
    h
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 24-bit 2x2, no padding between rows
    let mut bmp24 = header(2, 2, 24, 54);
    bmp24.extend_from_slice(&[0xff, 0, 0, 0, 0xff, 0, 0, 0, 0xff, 0x80, 0x80, 0x80]);
    fs::write(format!("{dir}/bmp24_2x2.bmp"), bmp24).unwrap();

    // 24-bit 1x1 with a gap before the pixel data
    let mut gap = header(1, 1, 24, 58);
    gap.extend_from_slice(&[1, 2, 3, 4, 10, 20, 30]);
    fs::write(format!("{dir}/bmp24_gap.bmp"), gap).unwrap();

    // 8-bit 3x2 with gray palette and row padding
    let mut bmp8 = header(3, 2, 8, 1078);
    for i in 0..=255u8 {
        bmp8.extend_from_slice(&[i, i, i, 0]);
    }
    bmp8.extend_from_slice(&[0x00, 0x40, 0x80, 0, 0xc0, 0xff, 0x64, 0]);
    fs::write(format!("{dir}/bmp8_3x2.bmp"), bmp8).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/bpp4.bmp"), header(1, 1, 4, 54)).unwrap();

    println!("Generated seed corpus in {dir}/");
}
