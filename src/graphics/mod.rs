//! Color codecs and the palette container.
//!
//! Encoding goes through the [`DataWriter`]; decoding reads straight off any
//! `io::Read`. Both codecs here store bytes low-to-high regardless of the
//! writer's numeric endianness, matching the console formats they come from.

use std::io::{self, Read};

use byteorder::ReadBytesExt;

use crate::sink::Sink;
use crate::writer::{DataWriter, WriteError};

pub mod winpal;

/// 24-bit color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Fixed-layout pixel codec.
pub trait ColorCodec {
    fn encode<S: Sink + ?Sized>(
        &self,
        writer: &mut DataWriter<'_, S>,
        color: Rgb,
    ) -> Result<(), WriteError>;

    fn decode<R: Read>(&self, reader: &mut R) -> io::Result<Rgb>;
}

/// 15-bit BGR color: five bits per channel, red in the low bits, stored as
/// two bytes low-to-high.
pub struct Bgr555;

impl ColorCodec for Bgr555 {
    fn encode<S: Sink + ?Sized>(
        &self,
        writer: &mut DataWriter<'_, S>,
        color: Rgb,
    ) -> Result<(), WriteError> {
        let packed = u32::from(rescale(color.r.into(), 0xFF, 0x1F))
            | (u32::from(rescale(color.g.into(), 0xFF, 0x1F)) << 5)
            | (u32::from(rescale(color.b.into(), 0xFF, 0x1F)) << 10);

        writer.write_u8((packed & 0xFF) as u8)?;
        writer.write_u8((packed >> 8) as u8)
    }

    fn decode<R: Read>(&self, reader: &mut R) -> io::Result<Rgb> {
        let data = u32::from(reader.read_u8()?) | (u32::from(reader.read_u8()?) << 8);
        Ok(Rgb {
            r: rescale(data & 0x1F, 0x1F, 0xFF),
            g: rescale((data >> 5) & 0x1F, 0x1F, 0xFF),
            b: rescale((data >> 10) & 0x1F, 0x1F, 0xFF),
        })
    }
}

/// 24-bit RGB padded with one zero byte to 32 bits.
pub struct Rgb32;

impl ColorCodec for Rgb32 {
    fn encode<S: Sink + ?Sized>(
        &self,
        writer: &mut DataWriter<'_, S>,
        color: Rgb,
    ) -> Result<(), WriteError> {
        writer.write_u8(color.r)?;
        writer.write_u8(color.g)?;
        writer.write_u8(color.b)?;
        writer.write_u8(0x00)
    }

    fn decode<R: Read>(&self, reader: &mut R) -> io::Result<Rgb> {
        let r = reader.read_u8()?;
        let g = reader.read_u8()?;
        let b = reader.read_u8()?;
        reader.read_u8()?; // padding to 32 bits
        Ok(Rgb { r, g, b })
    }
}

/// Linear rescale of a channel value between bit depths.
fn rescale(value: u32, from_max: u32, to_max: u32) -> u8 {
    (value * to_max / from_max) as u8
}

/// Ordered color container.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, color: Rgb) {
        self.colors.push(color);
    }

    pub fn extend<I: IntoIterator<Item = Rgb>>(&mut self, colors: I) {
        self.colors.extend(colors);
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
