use std::io::{self, Seek, SeekFrom, Write};

/// Abstract append/seek-capable byte destination.
///
/// A [`DataWriter`](crate::writer::DataWriter) borrows a sink for the duration
/// of each call and never owns it; the caller opens and closes the underlying
/// resource. Concurrent writers over one sink are unrepresentable — the
/// `&mut` borrow serializes access.
pub trait Sink {
    /// Append `buf` at the current write position.
    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()>;

    /// Current write position, in bytes from the start of this sink.
    fn position(&mut self) -> io::Result<u64>;

    /// Position from the start of the underlying storage.
    ///
    /// Equal to [`position`](Sink::position) unless the sink is a window into
    /// a larger stream.
    fn absolute_position(&mut self) -> io::Result<u64> {
        self.position()
    }

    /// Total sink length in bytes.
    fn total_len(&mut self) -> io::Result<u64>;

    /// Move the write position to the end of the sink, returning it.
    fn seek_to_end(&mut self) -> io::Result<u64>;
}

impl<T: Write + Seek> Sink for T {
    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()> {
        self.write_all(buf)
    }

    fn position(&mut self) -> io::Result<u64> {
        self.stream_position()
    }

    fn total_len(&mut self) -> io::Result<u64> {
        let pos = self.stream_position()?;
        let len = self.seek(SeekFrom::End(0))?;
        if pos != len {
            self.seek(SeekFrom::Start(pos))?;
        }
        Ok(len)
    }

    fn seek_to_end(&mut self) -> io::Result<u64> {
        self.seek(SeekFrom::End(0))
    }
}
