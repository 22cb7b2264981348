use bmpfilter::*;

/// A token that is already cancelled.
struct AlreadyStopped;

impl Stop for AlreadyStopped {
    fn check(&self) -> Result<(), StopReason> {
        Err(StopReason::Cancelled)
    }
}

fn noise_bitmap(w: u32, h: u32) -> Bitmap {
    let mut state: u32 = 0xDEAD_BEEF;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state as u8
    };
    let pixels = (0..w * h)
        .map(|_| Pixel {
            b: next(),
            g: next(),
            r: next(),
        })
        .collect();
    Bitmap::from_pixels(w, h, pixels).unwrap()
}

fn uniform_bitmap(w: u32, h: u32, px: Pixel) -> Bitmap {
    Bitmap::from_pixels(w, h, vec![px; (w * h) as usize]).unwrap()
}

fn gray_bitmap(w: u32, rows: &[&[u8]]) -> Bitmap {
    let pixels = rows
        .iter()
        .flat_map(|r| r.iter())
        .map(|&v| Pixel { b: v, g: v, r: v })
        .collect();
    Bitmap::from_pixels(w, rows.len() as u32, pixels).unwrap()
}

fn all_pixels(bitmap: &Bitmap) -> Vec<Pixel> {
    bitmap.pixels().pixels().collect()
}

// ── Invert ──────────────────────────────────────────────────────────

#[test]
fn invert_complements_each_channel() {
    // 2x2, 24-bit, uncompressed, rows top to bottom.
    let mut file = vec![0u8; 54];
    file[0..2].copy_from_slice(b"BM");
    file[2..6].copy_from_slice(&66u32.to_le_bytes());
    file[10..14].copy_from_slice(&54u32.to_le_bytes());
    file[14..18].copy_from_slice(&40u32.to_le_bytes());
    file[18..22].copy_from_slice(&2i32.to_le_bytes());
    file[22..26].copy_from_slice(&2i32.to_le_bytes());
    file[26..28].copy_from_slice(&1u16.to_le_bytes());
    file[28..30].copy_from_slice(&24u16.to_le_bytes());
    let pixel_bytes = [0u8, 1, 2, 127, 128, 129, 200, 50, 255, 10, 20, 30];
    file.extend_from_slice(&pixel_bytes);

    let mut bitmap = decode_bmp(&file, Unstoppable).unwrap();
    invert(&mut bitmap, Unstoppable).unwrap();
    let encoded = encode_bmp(&bitmap, Unstoppable).unwrap();

    assert_eq!(&encoded[..54], &file[..54]);
    for (out, orig) in encoded[54..].iter().zip(pixel_bytes) {
        assert_eq!(*out, !orig);
    }
}

#[test]
fn invert_twice_is_identity() {
    let mut bitmap = noise_bitmap(7, 5);
    let original = all_pixels(&bitmap);
    invert(&mut bitmap, Unstoppable).unwrap();
    assert_ne!(all_pixels(&bitmap), original);
    invert(&mut bitmap, Unstoppable).unwrap();
    assert_eq!(all_pixels(&bitmap), original);
}

// ── Grayscale ───────────────────────────────────────────────────────

#[test]
fn grayscale_uses_floored_average() {
    let mut bitmap = Bitmap::from_pixels(
        2,
        1,
        vec![Pixel { b: 3, g: 2, r: 0 }, Pixel { b: 255, g: 255, r: 254 }],
    )
    .unwrap();
    grayscale(&mut bitmap, Unstoppable).unwrap();
    assert_eq!(bitmap.pixel(0, 0), Some(Pixel { b: 1, g: 1, r: 1 }));
    assert_eq!(bitmap.pixel(1, 0), Some(Pixel { b: 254, g: 254, r: 254 }));
}

#[test]
fn grayscale_is_idempotent() {
    let mut bitmap = noise_bitmap(9, 4);
    grayscale(&mut bitmap, Unstoppable).unwrap();
    let once = all_pixels(&bitmap);
    assert!(once.iter().all(|p| p.r == p.g && p.g == p.b));
    grayscale(&mut bitmap, Unstoppable).unwrap();
    assert_eq!(all_pixels(&bitmap), once);
}

// ── Median ──────────────────────────────────────────────────────────

#[test]
fn median_keeps_uniform_image() {
    let px = Pixel {
        b: 17,
        g: 99,
        r: 240,
    };
    for (w, h) in [(1, 1), (3, 2), (8, 5)] {
        for window in [1, 3, 5, 7] {
            let mut bitmap = uniform_bitmap(w, h, px);
            median(&mut bitmap, window, Unstoppable).unwrap();
            assert!(
                all_pixels(&bitmap).iter().all(|p| *p == px),
                "{w}x{h} window {window}"
            );
        }
    }
}

#[test]
fn median_even_window_matches_next_odd() {
    let mut four = noise_bitmap(11, 9);
    let mut five = four.clone();
    median(&mut four, 4, Unstoppable).unwrap();
    median(&mut five, 5, Unstoppable).unwrap();
    assert_eq!(all_pixels(&four), all_pixels(&five));
}

#[test]
fn median_window_one_is_identity() {
    let mut bitmap = noise_bitmap(6, 6);
    let original = all_pixels(&bitmap);
    median(&mut bitmap, 1, Unstoppable).unwrap();
    assert_eq!(all_pixels(&bitmap), original);
}

#[test]
fn median_removes_isolated_speck() {
    let mut bitmap = gray_bitmap(
        3,
        &[
            &[10, 10, 10], //
            &[10, 255, 10],
            &[10, 10, 10],
        ],
    );
    median(&mut bitmap, 3, Unstoppable).unwrap();
    assert!(all_pixels(&bitmap).iter().all(|p| p.r == 10));
}

#[test]
fn median_replicates_edges() {
    // Left column 0, right column 100. With edge replication the 3x3 window
    // at a left-edge pixel sees six 0s and three 100s.
    let mut bitmap = gray_bitmap(2, &[&[0, 100], &[0, 100]]);
    median(&mut bitmap, 3, Unstoppable).unwrap();
    assert_eq!(bitmap.pixel(0, 0).unwrap().r, 0);
    assert_eq!(bitmap.pixel(1, 1).unwrap().r, 100);
}

#[test]
fn median_filters_channels_independently() {
    // Three pixels in a row: the median of each channel comes from a
    // different source pixel.
    let mut bitmap = Bitmap::from_pixels(
        3,
        1,
        vec![
            Pixel { b: 1, g: 50, r: 9 },
            Pixel { b: 5, g: 10, r: 1 },
            Pixel { b: 9, g: 30, r: 5 },
        ],
    )
    .unwrap();
    median(&mut bitmap, 3, Unstoppable).unwrap();
    // Middle pixel's window (rows replicated) has b {1,5,9}, g {50,10,30},
    // r {9,1,5}, each three times.
    assert_eq!(bitmap.pixel(1, 0), Some(Pixel { b: 5, g: 30, r: 5 }));
}

#[test]
fn median_rejects_zero_window() {
    let mut bitmap = noise_bitmap(2, 2);
    let original = all_pixels(&bitmap);
    assert!(matches!(
        median(&mut bitmap, 0, Unstoppable),
        Err(BitmapError::InvalidParameter(_))
    ));
    assert_eq!(all_pixels(&bitmap), original);
}

#[test]
fn median_window_larger_than_image() {
    let mut bitmap = gray_bitmap(2, &[&[0, 10], &[20, 30]]);
    median(&mut bitmap, 9, Unstoppable).unwrap();
    // The 9x9 window at (0, 0) sees 25 copies of 0, 20 of 10, 20 of 20 and
    // 16 of 30; element 40 of the sorted window is 10.
    assert_eq!(bitmap.pixel(0, 0).unwrap().r, 10);
}

#[test]
fn median_rejects_window_too_large_to_pad() {
    let mut bitmap = noise_bitmap(1, 1);
    let original = all_pixels(&bitmap);
    for window in [u32::MAX, u32::MAX - 1, 100_001] {
        assert!(
            matches!(
                median(&mut bitmap, window, Unstoppable),
                Err(BitmapError::LimitExceeded(_))
            ),
            "window {window}"
        );
    }
    assert_eq!(all_pixels(&bitmap), original);
}

// ── Gamma ───────────────────────────────────────────────────────────

#[test]
fn gamma_one_keeps_channels() {
    let mut bitmap = noise_bitmap(16, 16);
    let original = all_pixels(&bitmap);
    gamma(&mut bitmap, 1.0, Unstoppable).unwrap();
    for (after, before) in all_pixels(&bitmap).iter().zip(&original) {
        assert!(before.r.abs_diff(after.r) <= 1);
        assert!(before.g.abs_diff(after.g) <= 1);
        assert!(before.b.abs_diff(after.b) <= 1);
    }
}

#[test]
fn gamma_two_takes_square_root() {
    let mut bitmap = gray_bitmap(3, &[&[0, 64, 255]]);
    gamma(&mut bitmap, 2.0, Unstoppable).unwrap();
    assert_eq!(bitmap.pixel(0, 0).unwrap().r, 0);
    assert_eq!(bitmap.pixel(1, 0).unwrap().r, 127);
    assert_eq!(bitmap.pixel(2, 0).unwrap().r, 255);
}

#[test]
fn gamma_rejects_non_positive() {
    for g in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let mut bitmap = noise_bitmap(2, 2);
        assert!(
            matches!(
                gamma(&mut bitmap, g, Unstoppable),
                Err(BitmapError::InvalidParameter(_))
            ),
            "gamma {g}"
        );
    }
}

// ── Dispatch ────────────────────────────────────────────────────────

#[test]
fn filter_enum_matches_free_functions() {
    let base = noise_bitmap(5, 5);
    let cases: [(Filter, fn(&mut Bitmap) -> Result<(), BitmapError>); 4] = [
        (Filter::Invert, |b| invert(b, Unstoppable)),
        (Filter::Grayscale, |b| grayscale(b, Unstoppable)),
        (Filter::Median { window: 3 }, |b| median(b, 3, Unstoppable)),
        (Filter::Gamma { gamma: 2.2 }, |b| gamma(b, 2.2, Unstoppable)),
    ];
    for (filter, f) in cases {
        let mut via_enum = base.clone();
        let mut via_fn = base.clone();
        filter.apply(&mut via_enum, Unstoppable).unwrap();
        f(&mut via_fn).unwrap();
        assert_eq!(all_pixels(&via_enum), all_pixels(&via_fn), "{filter}");
    }
}

#[test]
fn every_filter_honors_cancellation() {
    let filters = [
        Filter::Invert,
        Filter::Grayscale,
        Filter::Median { window: 3 },
        Filter::Gamma { gamma: 2.2 },
    ];
    for filter in filters {
        let mut bitmap = noise_bitmap(4, 4);
        let result = filter.apply(&mut bitmap, AlreadyStopped);
        assert!(
            matches!(result, Err(BitmapError::Cancelled(StopReason::Cancelled))),
            "{filter}"
        );
    }
}

#[test]
fn filter_display_names() {
    assert_eq!(Filter::Invert.to_string(), "invert");
    assert_eq!(Filter::Median { window: 4 }.to_string(), "median (window 4)");
    assert_eq!(Filter::Gamma { gamma: 2.2 }.to_string(), "gamma (2.2)");
}
