use super::*;

fn frame(width: u32, height: u32, px: [u8; 4], premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: px.repeat((width * height) as usize),
        premultiplied,
    }
}

#[test]
fn png_round_trips_straight_pixels() {
    let bytes = encode_png(&frame(3, 2, [255, 0, 0, 128], false)).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(2, 1).0, [255, 0, 0, 128]);
}

#[test]
fn premultiplied_frames_are_stored_straight() {
    let bytes = encode_png(&frame(1, 1, [128, 0, 0, 128], true)).unwrap();
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 128]);
}

#[test]
fn mismatched_buffer_is_an_encode_error() {
    let mut f = frame(2, 2, [0, 0, 0, 0], false);
    f.data.pop();
    assert!(matches!(encode_png(&f), Err(SealError::Encode(_))));
}

#[test]
fn write_png_creates_parent_dirs() {
    let dir = std::env::temp_dir().join(format!("sealgen-png-{}", std::process::id()));
    let path = dir.join("nested").join("seal.png");
    let _ = std::fs::remove_dir_all(&dir);

    let bytes = encode_png(&frame(2, 2, [0, 0, 255, 255], false)).unwrap();
    let written = write_png(&path, &bytes).unwrap();
    assert_eq!(written, path);
    assert_eq!(std::fs::read(&path).unwrap(), bytes);

    let _ = std::fs::remove_dir_all(&dir);
}
