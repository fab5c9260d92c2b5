//! Palette → RIFF `PAL ` serialization.
//!
//! Layout (all little-endian):
//!
//! ```text
//! "RIFF"  u32(0x10 + 4n)  "PAL "  "data"  u32(0x04 + 4n)
//! u16(version)  u16(n)  [ u32(0) when gimp_compatibility ]  n × RGB32
//! ```

use crate::graphics::{ColorCodec, Palette, Rgb32};
use crate::sink::Sink;
use crate::writer::{DataWriter, WriteError};

/// Version word of the `data` chunk.
pub const WINPAL_VERSION: u16 = 300;

#[derive(Debug, Clone, Default)]
pub struct WinPalOptions {
    /// GIMP expects an extra zero dword after the color count. The RIFF size
    /// fields do not account for those four bytes; readers that honor them
    /// stay compatible either way.
    pub gimp_compatibility: bool,
}

/// Serialize `palette` as a RIFF `PAL ` file into `sink`.
pub fn write_winpal<S: Sink + ?Sized>(
    sink: &mut S,
    palette: &Palette,
    options: &WinPalOptions,
) -> Result<(), WriteError> {
    let mut writer = DataWriter::new(sink);
    let palette_size = (palette.len() * 4) as u32;

    writer.write_text("RIFF", false, None, None)?;
    writer.write_u32(0x10 + palette_size)?;

    writer.write_text("PAL ", false, None, None)?;
    writer.write_text("data", false, None, None)?;
    writer.write_u32(0x04 + palette_size)?;
    writer.write_u16(WINPAL_VERSION)?;
    writer.write_u16(palette.len() as u16)?;

    if options.gimp_compatibility {
        writer.write_u32(0)?;
    }

    for &color in palette.colors() {
        Rgb32.encode(&mut writer, color)?;
    }

    Ok(())
}
