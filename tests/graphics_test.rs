use gamebin::graphics::winpal::{write_winpal, WinPalOptions, WINPAL_VERSION};
use gamebin::graphics::{Bgr555, ColorCodec, Palette, Rgb, Rgb32};
use gamebin::DataWriter;
use std::io::{Cursor, Read, Seek, SeekFrom};

fn encode_one<C: ColorCodec>(codec: &C, color: Rgb) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    let mut writer = DataWriter::new(&mut buf);
    codec.encode(&mut writer, color).unwrap();
    buf.into_inner()
}

#[test]
fn test_bgr555_layout() {
    assert_eq!(encode_one(&Bgr555, Rgb::new(255, 0, 0)), vec![0x1F, 0x00]);
    assert_eq!(encode_one(&Bgr555, Rgb::new(0, 255, 0)), vec![0xE0, 0x03]);
    assert_eq!(encode_one(&Bgr555, Rgb::new(0, 0, 255)), vec![0x00, 0x7C]);
}

#[test]
fn test_bgr555_roundtrip_extremes() {
    for color in [
        Rgb::new(0, 0, 0),
        Rgb::new(255, 255, 255),
        Rgb::new(255, 0, 255),
    ] {
        let bytes = encode_one(&Bgr555, color);
        let decoded = Bgr555.decode(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(decoded, color);
    }
}

#[test]
fn test_bgr555_roundtrip_quantizes_to_five_bits() {
    let bytes = encode_one(&Bgr555, Rgb::new(128, 64, 32));
    let decoded = Bgr555.decode(&mut Cursor::new(bytes)).unwrap();
    for (got, want) in [
        (decoded.r, 128u8),
        (decoded.g, 64),
        (decoded.b, 32),
    ] {
        let diff = (i16::from(got) - i16::from(want)).abs();
        assert!(diff <= 8, "channel drift {diff} exceeds 5-bit quantization");
    }
}

#[test]
fn test_rgb32_layout_and_roundtrip() {
    let bytes = encode_one(&Rgb32, Rgb::new(1, 2, 3));
    assert_eq!(bytes, vec![1, 2, 3, 0]);
    let decoded = Rgb32.decode(&mut Cursor::new(bytes)).unwrap();
    assert_eq!(decoded, Rgb::new(1, 2, 3));
}

fn two_color_palette() -> Palette {
    let mut palette = Palette::new();
    palette.extend([Rgb::new(255, 0, 0), Rgb::new(0, 255, 0)]);
    palette
}

#[test]
fn test_winpal_golden_layout() {
    let mut buf = Cursor::new(Vec::new());
    write_winpal(&mut buf, &two_color_palette(), &WinPalOptions::default()).unwrap();

    assert_eq!(WINPAL_VERSION, 300);
    assert_eq!(
        buf.into_inner(),
        vec![
            b'R', b'I', b'F', b'F', //
            0x18, 0x00, 0x00, 0x00, // 0x10 + 2 colors * 4
            b'P', b'A', b'L', b' ', //
            b'd', b'a', b't', b'a', //
            0x0C, 0x00, 0x00, 0x00, // 0x04 + 2 colors * 4
            0x2C, 0x01, // version 300
            0x02, 0x00, // color count
            0xFF, 0x00, 0x00, 0x00, //
            0x00, 0xFF, 0x00, 0x00, //
        ]
    );
}

#[test]
fn test_winpal_gimp_compatibility_dword() {
    let options = WinPalOptions::default();
    let mut plain = Cursor::new(Vec::new());
    write_winpal(&mut plain, &two_color_palette(), &options).unwrap();

    let gimp_options = WinPalOptions {
        gimp_compatibility: true,
    };
    let mut gimp = Cursor::new(Vec::new());
    write_winpal(&mut gimp, &two_color_palette(), &gimp_options).unwrap();

    let plain = plain.into_inner();
    let gimp = gimp.into_inner();
    assert_eq!(gimp.len(), plain.len() + 4);
    // Size fields are identical; the extra dword sits after the color count.
    assert_eq!(&gimp[..24], &plain[..24]);
    assert_eq!(&gimp[24..28], &[0, 0, 0, 0]);
    assert_eq!(&gimp[28..], &plain[24..]);
}

#[test]
fn test_winpal_empty_palette() {
    let mut buf = Cursor::new(Vec::new());
    write_winpal(&mut buf, &Palette::new(), &WinPalOptions::default()).unwrap();
    let bytes = buf.into_inner();
    assert_eq!(bytes.len(), 24);
    assert_eq!(&bytes[4..8], &[0x10, 0x00, 0x00, 0x00]);
    assert_eq!(&bytes[22..24], &[0x00, 0x00]);
}

#[test]
fn test_winpal_through_file_sink() {
    let mut memory = Cursor::new(Vec::new());
    write_winpal(&mut memory, &two_color_palette(), &WinPalOptions::default()).unwrap();

    let mut file = tempfile::tempfile().unwrap();
    write_winpal(&mut file, &two_color_palette(), &WinPalOptions::default()).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let mut from_file = Vec::new();
    file.read_to_end(&mut from_file).unwrap();
    assert_eq!(from_file, memory.into_inner());
}
