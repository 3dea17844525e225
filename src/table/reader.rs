//! Range Table Reader
//!
//! Opens range tables and serves random-access record reads.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use bytes::{Buf, Bytes};
use parking_lot::Mutex;

use crate::config::{Config, ReadStrategy, ValidationPolicy};
use crate::error::{LocaleError, Result};

use super::validation;
use super::{Payload, RangeRecord, PAYLOAD_OFFSET, RECORD_SIZE};

/// Where record bytes come from
enum Source {
    /// Open file; the cursor is shared, so every probe holds the lock
    File(Mutex<BufReader<File>>),
    /// Whole table in memory
    Memory(Bytes),
}

/// Read-only handle on a range table
///
/// The table is never mutated after open, so one handle can serve any number
/// of threads.
pub struct RangeTable {
    path: PathBuf,
    source: Source,
    record_count: u64,
    file_size: u64,
}

impl RangeTable {
    /// Open a table with the default strategy (seek) and strict validation
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with(path, &Config::default())
    }

    /// Open a table using the read strategy and validation policy in `config`.
    /// `config.database_path` is ignored in favour of `path`.
    pub fn open_with(path: &Path, config: &Config) -> Result<Self> {
        let mut file = File::open(path)?;
        let file_size = file.metadata()?.len();
        let record_count = record_count_for(file_size)?;

        let source = match config.read_strategy {
            ReadStrategy::Seek => Source::File(Mutex::new(BufReader::new(file))),
            ReadStrategy::InMemory => {
                let mut data = Vec::with_capacity(file_size as usize);
                file.read_to_end(&mut data)?;
                Source::Memory(Bytes::from(data))
            }
        };

        let table = Self {
            path: path.to_path_buf(),
            source,
            record_count,
            file_size,
        };

        if config.validation == ValidationPolicy::Strict {
            validation::check(&table)?;
        }

        tracing::debug!(
            path = %table.path.display(),
            records = record_count,
            strategy = ?config.read_strategy,
            validation = ?config.validation,
            "Opened range table"
        );

        Ok(table)
    }

    /// Build a table over bytes already in memory
    pub fn from_bytes(data: impl Into<Bytes>, policy: ValidationPolicy) -> Result<Self> {
        let data = data.into();
        let file_size = data.len() as u64;
        let record_count = record_count_for(file_size)?;

        let table = Self {
            path: PathBuf::from("<memory>"),
            source: Source::Memory(data),
            record_count,
            file_size,
        };

        if policy == ValidationPolicy::Strict {
            validation::check(&table)?;
        }
        Ok(table)
    }

    /// Number of records (file size / 5)
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Read record `index`
    pub fn read_record(&self, index: u64) -> Result<RangeRecord> {
        self.check_index(index)?;
        let mut buf = [0u8; RECORD_SIZE as usize];
        self.read_at(index * RECORD_SIZE, &mut buf)?;
        RangeRecord::decode(&buf)
    }

    /// Bounds of range `index`: its start, and the start of the next record
    /// as the exclusive end (`None` for the last record).
    pub fn range_bounds(&self, index: u64) -> Result<(u32, Option<u32>)> {
        self.check_index(index)?;
        let offset = index * RECORD_SIZE;

        if index + 1 == self.record_count {
            let mut buf = [0u8; 4];
            self.read_at(offset, &mut buf)?;
            return Ok((u32::from_be_bytes(buf), None));
        }

        // start(i) | payload(i) | start(i+1)
        let mut buf = [0u8; RECORD_SIZE as usize + 4];
        self.read_at(offset, &mut buf)?;
        let mut cursor = &buf[..];
        let start = cursor.get_u32();
        cursor.advance(1);
        let end = cursor.get_u32();
        Ok((start, Some(end)))
    }

    /// Payload byte of record `index`
    pub fn payload(&self, index: u64) -> Result<Payload> {
        self.check_index(index)?;
        let mut buf = [0u8; 1];
        self.read_at(index * RECORD_SIZE + PAYLOAD_OFFSET, &mut buf)?;
        Ok(Payload::from_byte(buf[0]))
    }

    /// Path the table was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the table in bytes
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Whether the table was loaded into memory
    pub fn is_in_memory(&self) -> bool {
        matches!(self.source, Source::Memory(_))
    }

    /// Visit every record in order, passing its index and raw bytes.
    ///
    /// The file lock is held for the whole scan.
    pub(crate) fn scan<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(u64, &[u8]) -> Result<()>,
    {
        match &self.source {
            Source::Memory(data) => {
                for (index, chunk) in data.chunks_exact(RECORD_SIZE as usize).enumerate() {
                    visit(index as u64, chunk)?;
                }
            }
            Source::File(file) => {
                let mut file = file.lock();
                file.seek(SeekFrom::Start(0))?;
                let mut buf = [0u8; RECORD_SIZE as usize];
                for index in 0..self.record_count {
                    file.read_exact(&mut buf)?;
                    visit(index, &buf)?;
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn check_index(&self, index: u64) -> Result<()> {
        if index >= self.record_count {
            return Err(LocaleError::Format(format!(
                "record index {} out of range (table has {} records)",
                index, self.record_count
            )));
        }
        Ok(())
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        match &self.source {
            Source::File(file) => {
                let mut file = file.lock();
                file.seek(SeekFrom::Start(offset))?;
                file.read_exact(buf)?;
            }
            Source::Memory(data) => {
                let start = offset as usize;
                let end = start + buf.len();
                let bytes = data.get(start..end).ok_or_else(|| {
                    LocaleError::Format(format!("read past end of table at offset {}", offset))
                })?;
                buf.copy_from_slice(bytes);
            }
        }
        Ok(())
    }
}

/// Record count for a table of `file_size` bytes
fn record_count_for(file_size: u64) -> Result<u64> {
    if file_size % RECORD_SIZE != 0 {
        return Err(LocaleError::Format(format!(
            "table size {} is not a multiple of the {}-byte record size",
            file_size, RECORD_SIZE
        )));
    }
    if file_size == 0 {
        return Err(LocaleError::Format("table has no records".to_string()));
    }
    Ok(file_size / RECORD_SIZE)
}
