//! RIFF `PAL ` (Microsoft palette) format definition.

use std::collections::HashMap;
use std::io::{self, Cursor, Read};

use super::{FormatDefinition, ValidationScore};

pub struct WinPalFormat;

impl FormatDefinition for WinPalFormat {
    fn name(&self) -> &'static str {
        "winpal"
    }

    fn score_by_tags(&self, tags: &HashMap<String, String>) -> io::Result<ValidationScore> {
        Ok(match tags.get("riff").map(String::as_str) {
            Some("PAL ") => ValidationScore::Sure,
            _ => match tags.get("type").map(String::as_str) {
                Some("palette") => ValidationScore::ShouldBe,
                _ => ValidationScore::Invalid,
            },
        })
    }

    fn score_by_content(&self, stream: &mut Cursor<&[u8]>) -> io::Result<ValidationScore> {
        let mut header = [0u8; 12];
        let mut filled = 0;
        while filled < header.len() {
            let n = stream.read(&mut header[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }

        Ok(if filled < 4 || &header[..4] != b"RIFF" {
            ValidationScore::Invalid
        } else if filled == 12 && &header[8..12] == b"PAL " {
            ValidationScore::Sure
        } else {
            // A RIFF container, but not provably a palette.
            ValidationScore::CouldBe
        })
    }

    fn score_by_name(&self, _path: &str, filename: &str) -> io::Result<ValidationScore> {
        Ok(if filename.to_ascii_lowercase().ends_with(".pal") {
            ValidationScore::ShouldBe
        } else {
            ValidationScore::Invalid
        })
    }
}
