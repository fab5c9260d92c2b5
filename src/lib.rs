pub mod detect;
pub mod encoding;
pub mod graphics;
pub mod sink;
pub mod writer;

pub use detect::{DetectionReport, FileCandidate, FormatDefinition, Validation, ValidationScore};
pub use encoding::TextEncoding;
pub use sink::Sink;
pub use writer::{DataWriter, Endianness, FieldKind, FieldValue, WriteError};
