//! Byte-level access to an MTZ stream.

use std::io::{BufReader, ErrorKind, Read, Seek, SeekFrom};

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};

use crate::error::{FormatError, MtzError, Result};
use crate::record::RECORD_LEN;

/// Buffered cursor over an MTZ file.
///
/// Tracks the byte position so truncation errors can name where the stream
/// ended. All multi-byte numbers are little-endian.
pub struct MtzCursor<R: Read + Seek> {
    inner: BufReader<R>,
    position: u64,
}

impl<R: Read + Seek> MtzCursor<R> {
    /// Wrap a stream positioned at its start.
    pub fn new(reader: R) -> Self {
        Self {
            inner: BufReader::new(reader),
            position: 0,
        }
    }

    /// Current byte offset.
    #[must_use]
    pub fn tell(&self) -> u64 {
        self.position
    }

    /// Move to an absolute byte offset.
    pub fn seek(&mut self, offset: u64) -> Result<()> {
        self.position = self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    /// Read exactly `N` bytes.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        let start = self.position;
        self.inner
            .read_exact(&mut buf)
            .map_err(|e| truncated(e, start))?;
        self.position += N as u64;
        Ok(buf)
    }

    /// Read one 80-byte header record.
    pub fn read_record(&mut self) -> Result<[u8; RECORD_LEN]> {
        self.read_array::<RECORD_LEN>()
    }

    /// Read one little-endian int32.
    pub fn read_i32(&mut self) -> Result<i32> {
        let start = self.position;
        let value = self
            .inner
            .read_i32::<LittleEndian>()
            .map_err(|e| truncated(e, start))?;
        self.position += 4;
        Ok(value)
    }

    /// Read `count` little-endian int32 values.
    pub fn read_i32s(&mut self, count: usize) -> Result<Vec<i32>> {
        let bytes = self.read_words(count)?;
        let mut values = vec![0i32; count];
        LittleEndian::read_i32_into(&bytes, &mut values);
        Ok(values)
    }

    /// Read `count` little-endian float32 values.
    pub fn read_f32s(&mut self, count: usize) -> Result<Vec<f32>> {
        let bytes = self.read_words(count)?;
        let mut values = vec![0f32; count];
        LittleEndian::read_f32_into(&bytes, &mut values);
        Ok(values)
    }

    /// Read `count` 4-byte words as raw bytes.
    ///
    /// Counts come from the file, so the buffer grows with the bytes actually
    /// present rather than being sized up front.
    fn read_words(&mut self, count: usize) -> Result<Vec<u8>> {
        let start = self.position;
        let len = u64::try_from(count)
            .ok()
            .and_then(|count| count.checked_mul(4))
            .ok_or(FormatError::Truncated { offset: start })?;
        let mut bytes = Vec::new();
        let read = (&mut self.inner).take(len).read_to_end(&mut bytes)?;
        self.position += read as u64;
        if read as u64 != len {
            return Err(FormatError::Truncated {
                offset: self.position,
            }
            .into());
        }
        Ok(bytes)
    }
}

fn truncated(error: std::io::Error, offset: u64) -> MtzError {
    if error.kind() == ErrorKind::UnexpectedEof {
        FormatError::Truncated { offset }.into()
    } else {
        MtzError::Io(error)
    }
}
