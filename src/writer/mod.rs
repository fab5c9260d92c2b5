//! Endianness-aware binary writer over an abstract [`Sink`].
//!
//! # Endianness
//! [`DataWriter::endianness`] is read before every multi-byte numeric write,
//! never frozen at construction — byte order may legally change between calls
//! on the same writer.
//!
//! # Documented data-loss edge cases
//! Two behaviors silently drop bytes and are kept byte-exact because existing
//! game files depend on them:
//!   - [`DataWriter::write_text`] with a `max_size` clamps the encoded bytes,
//!     possibly in the middle of a multi-byte sequence; a requested terminator
//!     still lands on the clamped tail.
//!   - [`DataWriter::write_fixed_text`] with a terminator overwrites the last
//!     bytes of the fixed buffer, clobbering content when the size is tight.

use std::io;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use thiserror::Error;

use crate::encoding::TextEncoding;
use crate::sink::Sink;

/// Reused chunk buffer size for [`DataWriter::write_repeated`]: 5 KiB.
const REPEAT_CHUNK: usize = 5 * 1024;

/// Byte order of multi-byte numeric writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("Unsupported type: {0:?}")]
    UnsupportedType(FieldKind),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Primitive kinds dispatched by [`DataWriter::write_dynamic`].
///
/// `F32`/`F64` are named so callers get an explicit
/// [`WriteError::UnsupportedType`] instead of a silent reinterpretation;
/// floating-point fields have no sanctioned wire layout here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    Char,
    Text,
    F32,
    F64,
}

impl FieldKind {
    /// True for the eight integer kinds usable as a string size prefix.
    pub fn is_integer(self) -> bool {
        !matches!(
            self,
            FieldKind::Char | FieldKind::Text | FieldKind::F32 | FieldKind::F64
        )
    }
}

/// Runtime value routed by [`DataWriter::write_dynamic`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Unsigned(u64),
    Signed(i64),
    Char(char),
    Text(String),
}

impl FieldValue {
    fn to_unsigned(&self, max: u64) -> Result<u64, WriteError> {
        let value = match *self {
            FieldValue::Unsigned(v) => v,
            FieldValue::Signed(v) if v >= 0 => v as u64,
            FieldValue::Signed(_) => {
                return Err(WriteError::InvalidArgument(
                    "negative value for unsigned field",
                ))
            }
            _ => return Err(WriteError::InvalidArgument("expected a numeric value")),
        };
        if value > max {
            return Err(WriteError::InvalidArgument(
                "value out of range for field width",
            ));
        }
        Ok(value)
    }

    fn to_signed(&self, min: i64, max: i64) -> Result<i64, WriteError> {
        let value = match *self {
            FieldValue::Signed(v) => v,
            FieldValue::Unsigned(v) => i64::try_from(v).map_err(|_| {
                WriteError::InvalidArgument("value out of range for field width")
            })?,
            _ => return Err(WriteError::InvalidArgument("expected a numeric value")),
        };
        if value < min || value > max {
            return Err(WriteError::InvalidArgument(
                "value out of range for field width",
            ));
        }
        Ok(value)
    }
}

/// Serializes primitives, text and filler bytes into a borrowed [`Sink`].
///
/// Defaults: little-endian, UTF-8. Both settings are plain public fields and
/// may be changed between calls.
pub struct DataWriter<'a, S: Sink + ?Sized> {
    sink: &'a mut S,
    pub endianness: Endianness,
    pub default_encoding: TextEncoding,
}

impl<'a, S: Sink + ?Sized> DataWriter<'a, S> {
    pub fn new(sink: &'a mut S) -> Self {
        Self {
            sink,
            endianness: Endianness::Little,
            default_encoding: TextEncoding::Utf8,
        }
    }

    // ── Integers ────────────────────────────────────────────────────────────

    pub fn write_u8(&mut self, value: u8) -> Result<(), WriteError> {
        self.sink.write_bytes(&[value])?;
        Ok(())
    }

    pub fn write_i8(&mut self, value: i8) -> Result<(), WriteError> {
        self.write_u8(value as u8)
    }

    pub fn write_u16(&mut self, value: u16) -> Result<(), WriteError> {
        self.write_number(u64::from(value), 2)
    }

    pub fn write_i16(&mut self, value: i16) -> Result<(), WriteError> {
        self.write_u16(value as u16)
    }

    pub fn write_u32(&mut self, value: u32) -> Result<(), WriteError> {
        self.write_number(u64::from(value), 4)
    }

    pub fn write_i32(&mut self, value: i32) -> Result<(), WriteError> {
        self.write_u32(value as u32)
    }

    pub fn write_u64(&mut self, value: u64) -> Result<(), WriteError> {
        self.write_number(value, 8)
    }

    pub fn write_i64(&mut self, value: i64) -> Result<(), WriteError> {
        self.write_u64(value as u64)
    }

    /// Emits exactly `num_bytes` bytes of `value` under the endianness in
    /// effect at this call.
    fn write_number(&mut self, value: u64, num_bytes: usize) -> Result<(), WriteError> {
        let mut buf = [0u8; 8];
        match self.endianness {
            Endianness::Little => LittleEndian::write_uint(&mut buf, value, num_bytes),
            Endianness::Big => BigEndian::write_uint(&mut buf, value, num_bytes),
        }
        self.sink.write_bytes(&buf[..num_bytes])?;
        Ok(())
    }

    // ── Raw bytes ───────────────────────────────────────────────────────────

    pub fn write_bytes(&mut self, buf: &[u8]) -> Result<(), WriteError> {
        self.sink.write_bytes(buf)?;
        Ok(())
    }

    // ── Text ────────────────────────────────────────────────────────────────

    /// Encode one char with `encoding`, or the default when `None`.
    pub fn write_char(
        &mut self,
        ch: char,
        encoding: Option<TextEncoding>,
    ) -> Result<(), WriteError> {
        let enc = encoding.unwrap_or(self.default_encoding);
        let mut tmp = [0u8; 4];
        let bytes = enc.encode(ch.encode_utf8(&mut tmp));
        self.write_bytes(&bytes)
    }

    /// Write a text string, optionally NUL-terminated and size-clamped.
    ///
    /// When `max_size` is `Some(n)` and the encoded bytes (terminator
    /// included) exceed `n`, the output is clamped to `n` bytes — this may cut
    /// a multi-byte sequence, and a requested terminator overwrites the
    /// clamped tail. Intentional; see the module docs.
    pub fn write_text(
        &mut self,
        text: &str,
        null_terminator: bool,
        encoding: Option<TextEncoding>,
        max_size: Option<usize>,
    ) -> Result<(), WriteError> {
        let enc = encoding.unwrap_or(self.default_encoding);
        let mut size = enc.encode(text).len();
        if null_terminator {
            size += enc.terminator().len();
        }
        if let Some(max) = max_size {
            size = size.min(max);
        }
        self.write_fixed_text(text, size, null_terminator, Some(enc))
    }

    /// Write a text string into exactly `fixed_size` bytes.
    ///
    /// The encoded buffer is truncated or zero-extended to `fixed_size`. A
    /// requested terminator overwrites the *last* terminator-width bytes of
    /// the buffer, clobbering content when the size is tight.
    pub fn write_fixed_text(
        &mut self,
        text: &str,
        fixed_size: usize,
        null_terminator: bool,
        encoding: Option<TextEncoding>,
    ) -> Result<(), WriteError> {
        let enc = encoding.unwrap_or(self.default_encoding);
        let terminator = enc.terminator();
        if null_terminator && terminator.len() > fixed_size {
            return Err(WriteError::InvalidArgument(
                "terminator wider than fixed size",
            ));
        }

        let mut buffer = enc.encode(text);
        buffer.resize(fixed_size, 0);
        if null_terminator {
            buffer[fixed_size - terminator.len()..].copy_from_slice(terminator);
        }
        self.write_bytes(&buffer)
    }

    /// Write a length-prefixed text string.
    ///
    /// The (terminator-extended, clamped) byte length is written first using
    /// the integer width named by `size_kind`, then the bytes themselves.
    pub fn write_sized_text(
        &mut self,
        text: &str,
        size_kind: FieldKind,
        null_terminator: bool,
        encoding: Option<TextEncoding>,
        max_size: Option<usize>,
    ) -> Result<(), WriteError> {
        if !size_kind.is_integer() {
            return Err(WriteError::UnsupportedType(size_kind));
        }

        let enc = encoding.unwrap_or(self.default_encoding);
        let mut size = enc.encode(text).len();
        if null_terminator {
            size += enc.terminator().len();
        }
        if let Some(max) = max_size {
            size = size.min(max);
        }

        self.write_dynamic(size_kind, &FieldValue::Unsigned(size as u64))?;
        self.write_fixed_text(text, size, null_terminator, Some(enc))
    }

    // ── Dynamic dispatch ────────────────────────────────────────────────────

    /// Coerce `value` to the primitive named by `kind` and route it to the
    /// matching typed write.
    pub fn write_dynamic(
        &mut self,
        kind: FieldKind,
        value: &FieldValue,
    ) -> Result<(), WriteError> {
        match kind {
            FieldKind::U8 => {
                let v = value.to_unsigned(u64::from(u8::MAX))? as u8;
                self.write_u8(v)
            }
            FieldKind::I8 => {
                let v = value.to_signed(i64::from(i8::MIN), i64::from(i8::MAX))? as i8;
                self.write_i8(v)
            }
            FieldKind::U16 => {
                let v = value.to_unsigned(u64::from(u16::MAX))? as u16;
                self.write_u16(v)
            }
            FieldKind::I16 => {
                let v = value.to_signed(i64::from(i16::MIN), i64::from(i16::MAX))? as i16;
                self.write_i16(v)
            }
            FieldKind::U32 => {
                let v = value.to_unsigned(u64::from(u32::MAX))? as u32;
                self.write_u32(v)
            }
            FieldKind::I32 => {
                let v = value.to_signed(i64::from(i32::MIN), i64::from(i32::MAX))? as i32;
                self.write_i32(v)
            }
            FieldKind::U64 => self.write_u64(value.to_unsigned(u64::MAX)?),
            FieldKind::I64 => self.write_i64(value.to_signed(i64::MIN, i64::MAX)?),
            FieldKind::Char => match value {
                FieldValue::Char(c) => self.write_char(*c, None),
                _ => Err(WriteError::InvalidArgument("expected a char value")),
            },
            FieldKind::Text => match value {
                FieldValue::Text(s) => self.write_text(s, false, None, None),
                _ => Err(WriteError::InvalidArgument("expected a text value")),
            },
            FieldKind::F32 | FieldKind::F64 => Err(WriteError::UnsupportedType(kind)),
        }
    }

    // ── Filler bytes ────────────────────────────────────────────────────────

    /// Write `value` exactly `times` times through a reused bounded chunk
    /// buffer — never allocates `times` bytes at once.
    pub fn write_repeated(&mut self, value: u8, times: u64) -> Result<(), WriteError> {
        let buf = [value; REPEAT_CHUNK];
        let mut remaining = times;
        while remaining > 0 {
            let chunk = remaining.min(REPEAT_CHUNK as u64) as usize;
            self.sink.write_bytes(&buf[..chunk])?;
            remaining -= chunk as u64;
        }
        Ok(())
    }

    /// Append `value` at the sink's end until its total length reaches
    /// `target_len`. No-op when the sink is already at or beyond it.
    ///
    /// Interior bytes are never rewritten, even when the write position sits
    /// somewhere in the middle of the sink.
    pub fn write_until_length(&mut self, value: u8, target_len: u64) -> Result<(), WriteError> {
        let len = self.sink.total_len()?;
        if target_len <= len {
            return Ok(());
        }
        self.sink.seek_to_end()?;
        self.write_repeated(value, target_len - len)
    }

    /// Repeat `value` until the position is a multiple of `alignment`.
    ///
    /// `absolute` selects the position from the start of the underlying
    /// storage instead of this sink's own. No-op when `alignment <= 1` or the
    /// position is already aligned.
    pub fn write_padding(
        &mut self,
        value: u8,
        alignment: u64,
        absolute: bool,
    ) -> Result<(), WriteError> {
        if alignment <= 1 {
            return Ok(());
        }

        let position = if absolute {
            self.sink.absolute_position()?
        } else {
            self.sink.position()?
        };
        let times = alignment - position % alignment;
        if times != alignment {
            // Else it's already aligned.
            self.write_repeated(value, times)?;
        }
        Ok(())
    }
}
