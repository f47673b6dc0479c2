//! Fixed-field binary encoding for model snapshots.
//!
//! Every integer is an `i32` and every float an IEEE-754 `f64`, both
//! little-endian, written one field at a time. Strings are an `i32` byte
//! length followed by UTF-8 bytes. There is no header, padding, or checksum,
//! so a snapshot is byte-for-byte reproducible from the parameters.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{Result, SentiraError};

/// Size of an encoded `f64`.
pub const F64_SIZE: usize = 8;

/// Size of an encoded `i32`.
pub const I32_SIZE: usize = 4;

fn truncated(err: io::Error) -> SentiraError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        SentiraError::corrupted("unexpected end of model data")
    } else {
        SentiraError::Io(err)
    }
}

/// Writes model fields in little-endian order.
pub struct ModelWriter<W: Write> {
    writer: W,
    position: u64,
}

impl<W: Write> ModelWriter<W> {
    pub fn new(writer: W) -> Self {
        ModelWriter {
            writer,
            position: 0,
        }
    }

    /// Write a u8 value.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.writer.write_u8(value)?;
        self.position += 1;
        Ok(())
    }

    /// Write an i32 value.
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.writer.write_i32::<LittleEndian>(value)?;
        self.position += I32_SIZE as u64;
        Ok(())
    }

    /// Write a length or count as an i32.
    pub fn write_len(&mut self, value: usize) -> Result<()> {
        let value = i32::try_from(value)
            .map_err(|_| SentiraError::other(format!("Length {value} does not fit in an i32")))?;
        self.write_i32(value)
    }

    /// Write an f64 value.
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.writer.write_f64::<LittleEndian>(value)?;
        self.position += F64_SIZE as u64;
        Ok(())
    }

    /// Write every value of `values` without a length prefix.
    pub fn write_f64s(&mut self, values: &[f64]) -> Result<()> {
        for &value in values {
            self.write_f64(value)?;
        }
        Ok(())
    }

    /// Write a string with an i32 byte-length prefix.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        let bytes = value.as_bytes();
        self.write_len(bytes.len())?;
        self.writer.write_all(bytes)?;
        self.position += bytes.len() as u64;
        Ok(())
    }

    /// Bytes written so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Reads model fields written by [`ModelWriter`].
///
/// A snapshot that ends early is reported as [`SentiraError::Corrupted`].
pub struct ModelReader<R: Read> {
    reader: R,
    position: u64,
}

impl<R: Read> ModelReader<R> {
    pub fn new(reader: R) -> Self {
        ModelReader {
            reader,
            position: 0,
        }
    }

    /// Read a u8 value.
    pub fn read_u8(&mut self) -> Result<u8> {
        let value = self.reader.read_u8().map_err(truncated)?;
        self.position += 1;
        Ok(value)
    }

    /// Read an i32 value.
    pub fn read_i32(&mut self) -> Result<i32> {
        let value = self.reader.read_i32::<LittleEndian>().map_err(truncated)?;
        self.position += I32_SIZE as u64;
        Ok(value)
    }

    /// Read an i32 that must be a non-negative length or count.
    pub fn read_len(&mut self) -> Result<usize> {
        let value = self.read_i32()?;
        usize::try_from(value)
            .map_err(|_| SentiraError::corrupted(format!("negative length {value}")))
    }

    /// Read an f64 value.
    pub fn read_f64(&mut self) -> Result<f64> {
        let value = self.reader.read_f64::<LittleEndian>().map_err(truncated)?;
        self.position += F64_SIZE as u64;
        Ok(value)
    }

    /// Read exactly `count` f64 values.
    pub fn read_f64s(&mut self, count: usize) -> Result<Vec<f64>> {
        let mut values = Vec::with_capacity(count.min(1 << 16));
        for _ in 0..count {
            values.push(self.read_f64()?);
        }
        Ok(values)
    }

    /// Read a string with an i32 byte-length prefix.
    pub fn read_string(&mut self) -> Result<String> {
        let length = self.read_len()?;
        let mut bytes = Vec::new();
        (&mut self.reader)
            .take(length as u64)
            .read_to_end(&mut bytes)?;
        if bytes.len() != length {
            return Err(SentiraError::corrupted("unexpected end of model data"));
        }
        self.position += length as u64;

        String::from_utf8(bytes).map_err(|e| SentiraError::corrupted(format!("Invalid UTF-8: {e}")))
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Check that the snapshot has no bytes left.
    pub fn finish(mut self) -> Result<()> {
        let mut probe = [0u8; 1];
        match self.reader.read(&mut probe)? {
            0 => Ok(()),
            _ => Err(SentiraError::corrupted(format!(
                "trailing bytes after offset {}",
                self.position
            ))),
        }
    }
}
