//! Binary index file format.
//!
//! The file is a plain concatenation of entries in term order, with no header,
//! footer or version tag:
//!
//! ```text
//! entry := term_len:u32le  term:[u8; term_len]  count:u32le  doc_id:i32le * count
//! ```
//!
//! End of file is the only terminator. Reading validates every length prefix
//! against the bytes that are actually left before allocating anything, so a
//! truncated or corrupt file produces a [`QuiverError::MalformedRecord`] that
//! names the offending byte offset.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use log::{debug, info};

use crate::error::{QuiverError, Result};
use crate::index::posting::{DocId, PostingEntry};

/// Streams posting entries into any writer.
pub struct IndexWriter<W: Write> {
    writer: W,
    position: u64,
    entries: u64,
}

impl<W: Write> IndexWriter<W> {
    /// Create a new index writer.
    pub fn new(writer: W) -> Self {
        IndexWriter {
            writer,
            position: 0,
            entries: 0,
        }
    }

    /// Write a u32 value (little-endian).
    fn write_u32(&mut self, value: u32) -> Result<()> {
        self.writer.write_u32::<LittleEndian>(value)?;
        self.position += 4;
        Ok(())
    }

    /// Write an i32 value (little-endian).
    fn write_i32(&mut self, value: i32) -> Result<()> {
        self.writer.write_i32::<LittleEndian>(value)?;
        self.position += 4;
        Ok(())
    }

    /// Write raw bytes without length prefix.
    fn write_raw(&mut self, value: &[u8]) -> Result<()> {
        self.writer.write_all(value)?;
        self.position += value.len() as u64;
        Ok(())
    }

    /// Append one entry.
    pub fn write_entry(&mut self, entry: &PostingEntry) -> Result<()> {
        let term_len = u32::try_from(entry.term.len()).map_err(|_| {
            QuiverError::malformed_record(format!(
                "term of {} bytes does not fit the index format",
                entry.term.len()
            ))
        })?;
        let count = u32::try_from(entry.doc_ids.len()).map_err(|_| {
            QuiverError::malformed_record(format!(
                "term {:?} has too many documents ({})",
                entry.term_lossy(),
                entry.doc_ids.len()
            ))
        })?;

        self.write_u32(term_len)?;
        self.write_raw(&entry.term)?;
        self.write_u32(count)?;
        for &doc_id in &entry.doc_ids {
            self.write_i32(doc_id)?;
        }

        self.entries += 1;
        Ok(())
    }

    /// Bytes written so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Entries written so far.
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Reads posting entries from an in-memory index image.
#[derive(Debug)]
pub struct IndexReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> IndexReader<'a> {
    /// Create a new reader over `data`.
    pub fn new(data: &'a [u8]) -> Self {
        IndexReader { data, position: 0 }
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check if the whole buffer has been consumed.
    pub fn is_eof(&self) -> bool {
        self.position >= self.data.len()
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Take `len` bytes, failing if fewer are left.
    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(QuiverError::malformed_record(format!(
                "truncated index: {what} needs {len} bytes at offset {}, only {} left",
                self.position,
                self.remaining()
            )));
        }
        let data = self.data;
        let slice = &data[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }

    fn read_u32(&mut self, what: &str) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4, what)?))
    }

    /// Read the next entry, or `None` at a clean end of file.
    pub fn read_entry(&mut self) -> Result<Option<PostingEntry>> {
        if self.is_eof() {
            return Ok(None);
        }

        let term_len = self.read_u32("term length")? as usize;
        let term = self.take(term_len, "term")?.to_vec();

        let count = self.read_u32("document count")? as usize;
        let byte_len = count.checked_mul(4).ok_or_else(|| {
            QuiverError::malformed_record(format!(
                "document count {count} overflows at offset {}",
                self.position
            ))
        })?;
        let raw = self.take(byte_len, "document ids")?;

        let mut doc_ids = vec![0 as DocId; count];
        LittleEndian::read_i32_into(raw, &mut doc_ids);

        Ok(Some(PostingEntry { term, doc_ids }))
    }

    /// Read all remaining entries.
    pub fn read_all(&mut self) -> Result<Vec<PostingEntry>> {
        let mut entries = Vec::new();
        while let Some(entry) = self.read_entry()? {
            entries.push(entry);
        }
        Ok(entries)
    }
}

/// Check the ordering invariants every index must satisfy.
///
/// Terms are non-empty, unique and strictly increasing; document ids within an
/// entry are non-negative and strictly increasing.
pub fn validate_entries(entries: &[PostingEntry]) -> Result<()> {
    for (i, entry) in entries.iter().enumerate() {
        if entry.term.is_empty() {
            return Err(QuiverError::malformed_record(format!(
                "entry {i} has an empty term"
            )));
        }
        if i > 0 && entries[i - 1].term >= entry.term {
            return Err(QuiverError::malformed_record(format!(
                "entry {i} ({:?}) is not sorted after {:?}",
                entry.term_lossy(),
                entries[i - 1].term_lossy()
            )));
        }
        if let Some(&first) = entry.doc_ids.first()
            && first < 0
        {
            return Err(QuiverError::malformed_record(format!(
                "term {:?} has negative document id {first}",
                entry.term_lossy()
            )));
        }
        if entry.doc_ids.windows(2).any(|w| w[0] >= w[1]) {
            return Err(QuiverError::malformed_record(format!(
                "document ids of term {:?} are not strictly increasing",
                entry.term_lossy()
            )));
        }
    }
    Ok(())
}

/// Serialize entries into a byte vector.
pub fn encode(entries: &[PostingEntry]) -> Result<Vec<u8>> {
    let mut writer = IndexWriter::new(Vec::new());
    for entry in entries {
        writer.write_entry(entry)?;
    }
    writer.finish()
}

/// Deserialize and validate an index image.
pub fn decode(data: &[u8]) -> Result<Vec<PostingEntry>> {
    let entries = IndexReader::new(data).read_all()?;
    validate_entries(&entries)?;
    Ok(entries)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write an index file.
///
/// Entries go to a temporary sibling file that is renamed over `path` only
/// after everything has been written and synced. If any step fails the
/// temporary file is removed and `path` is left untouched. Returns the file
/// size.
pub fn write_index_file(path: &Path, entries: &[PostingEntry]) -> Result<u64> {
    validate_entries(entries)?;

    let tmp = temp_path(path);
    let bytes = match write_and_rename(&tmp, path, entries) {
        Ok(bytes) => bytes,
        Err(e) => {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                debug!("could not remove {}: {cleanup}", tmp.display());
            }
            return Err(e);
        }
    };

    info!(
        "Wrote {} entries ({} bytes) to {}",
        entries.len(),
        bytes,
        path.display()
    );
    Ok(bytes)
}

fn write_and_rename(tmp: &Path, path: &Path, entries: &[PostingEntry]) -> Result<u64> {
    let file = File::create(tmp).with_context(|| format!("failed to create {}", tmp.display()))?;
    let mut writer = IndexWriter::new(BufWriter::new(file));
    for entry in entries {
        writer.write_entry(entry)?;
    }
    let bytes = writer.position();
    let file = writer
        .finish()?
        .into_inner()
        .map_err(|e| QuiverError::Io(e.into_error()))?;
    file.sync_all()?;
    drop(file);

    fs::rename(tmp, path)
        .with_context(|| format!("failed to move index into place at {}", path.display()))?;
    Ok(bytes)
}

/// Load a whole index file into memory.
pub fn read_index_file(path: &Path) -> Result<Vec<PostingEntry>> {
    let data =
        fs::read(path).with_context(|| format!("failed to read index {}", path.display()))?;
    debug!("Read {} bytes from {}", data.len(), path.display());
    decode(&data)
}
