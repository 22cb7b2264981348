use bmpfilter::*;

fn sample() -> Bitmap {
    let pixels = (0..12u8)
        .map(|i| Pixel {
            b: i,
            g: i * 2,
            r: 255 - i,
        })
        .collect();
    Bitmap::from_pixels(4, 3, pixels).unwrap()
}

#[test]
fn write_then_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.bmp");

    let bitmap = sample();
    write_bmp(&path, &bitmap).unwrap();
    let read = read_bmp(&path).unwrap();

    assert_eq!(read.header(), bitmap.header());
    assert_eq!(
        read.pixels().pixels().collect::<Vec<_>>(),
        bitmap.pixels().pixels().collect::<Vec<_>>()
    );
    assert_eq!(
        std::fs::read(&path).unwrap(),
        encode_bmp(&bitmap, Unstoppable).unwrap()
    );
}

#[test]
fn file_roundtrip_is_byte_exact() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bmp");
    let output = dir.path().join("out.bmp");
    std::fs::write(&input, encode_bmp(&sample(), Unstoppable).unwrap()).unwrap();

    let bitmap = read_bmp(&input).unwrap();
    write_bmp(&output, &bitmap).unwrap();
    assert_eq!(
        std::fs::read(&input).unwrap(),
        std::fs::read(&output).unwrap()
    );
}

#[test]
fn write_replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.bmp");
    std::fs::write(&path, b"stale contents that are longer than nothing").unwrap();

    let mut bitmap = sample();
    invert(&mut bitmap, Unstoppable).unwrap();
    write_bmp(&path, &bitmap).unwrap();

    let read = read_bmp(&path).unwrap();
    assert_eq!(read.pixel(0, 0), Some(Pixel { b: 255, g: 255, r: 0 }));
    // Only the target remains in the directory; no temp file is left over.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_bmp(dir.path().join("nope.bmp"));
    assert!(matches!(result, Err(BitmapError::Io(_))));
}

#[test]
fn unwritable_output_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("out.bmp");
    let result = write_bmp(&path, &sample());
    assert!(matches!(result, Err(BitmapError::Io(_))));
    assert!(!path.exists());
}
