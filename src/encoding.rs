use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Text encoding schemes supported by the writer.
///
/// `Latin1` maps code points above U+00FF to `?`, the usual lossy behavior of
/// single-byte game-format encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Latin1,
}

impl TextEncoding {
    /// Encode `text` into bytes under this scheme.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Utf16Le => encode_utf16::<LittleEndian>(text),
            TextEncoding::Utf16Be => encode_utf16::<BigEndian>(text),
            TextEncoding::Latin1 => text
                .chars()
                .map(|c| if (c as u32) <= 0xFF { c as u32 as u8 } else { b'?' })
                .collect(),
        }
    }

    /// Byte sequence of the NUL terminator under this scheme.
    pub fn terminator(self) -> &'static [u8] {
        match self {
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => &[0, 0],
            TextEncoding::Utf8 | TextEncoding::Latin1 => &[0],
        }
    }
}

fn encode_utf16<B: ByteOrder>(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for unit in text.encode_utf16() {
        let mut buf = [0u8; 2];
        B::write_u16(&mut buf, unit);
        out.extend_from_slice(&buf);
    }
    out
}
