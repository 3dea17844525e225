//! Range Table Builder
//!
//! Writes sorted range records to a new table file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use bytes::BytesMut;

use crate::address::{format_ipv4, parse_ipv4};
use crate::error::{LocaleError, Result};

use super::{MatchType, Payload, RangeRecord, RECORD_SIZE};

/// Summary of a finished table
#[derive(Debug, Clone)]
pub struct TableSummary {
    pub path: PathBuf,
    pub record_count: u64,
    pub file_size: u64,
    /// CRC32 of the whole file
    pub checksum: u32,
}

/// Builder for creating range tables from ascending range starts
pub struct RangeTableBuilder {
    /// Output file path
    path: PathBuf,
    /// Buffered writer for performance
    writer: BufWriter<File>,
    /// Scratch buffer for one encoded record
    scratch: BytesMut,
    record_count: u64,
    /// Start of the most recently added range
    last_start: Option<u32>,
    /// Running CRC of everything written
    hasher: crc32fast::Hasher,
}

impl RangeTableBuilder {
    /// Create a new builder, truncating any file at `path`.
    ///
    /// Call `add()` in ascending start order, beginning at 0.0.0.0, then
    /// `finish()`.
    pub fn new(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            scratch: BytesMut::with_capacity(RECORD_SIZE as usize),
            record_count: 0,
            last_start: None,
            hasher: crc32fast::Hasher::new(),
        })
    }

    /// Add a range starting at `start` and running up to the next range
    pub fn add(&mut self, start: u32, country: u8, match_type: MatchType) -> Result<()> {
        let payload = Payload::new(country, match_type)?;
        self.add_record(RangeRecord { start, payload })
    }

    /// Add an already-packed record
    pub fn add_record(&mut self, record: RangeRecord) -> Result<()> {
        match self.last_start {
            None if record.start != 0 => {
                return Err(LocaleError::InvalidInput(format!(
                    "first range must start at 0.0.0.0, got {}",
                    format_ipv4(record.start)
                )));
            }
            Some(prev) if record.start <= prev => {
                return Err(LocaleError::InvalidInput(format!(
                    "range start {} is not after previous start {}",
                    format_ipv4(record.start),
                    format_ipv4(prev)
                )));
            }
            _ => {}
        }

        self.scratch.clear();
        record.encode(&mut self.scratch);
        self.writer.write_all(&self.scratch)?;
        self.hasher.update(&self.scratch);

        self.last_start = Some(record.start);
        self.record_count += 1;
        Ok(())
    }

    /// Add every range listed in `reader`.
    ///
    /// Each line is `start_ip,country,match_type`; blank lines and lines
    /// starting with `#` are skipped. Returns the number of ranges added.
    pub fn import_csv<R: BufRead>(&mut self, reader: R) -> Result<u64> {
        let mut added = 0;
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != 3 {
                return Err(LocaleError::InvalidInput(format!(
                    "line {}: expected 3 fields, got {}",
                    line_no + 1,
                    fields.len()
                )));
            }

            let start = parse_ipv4(fields[0])?;
            let country: u8 = fields[1].parse().map_err(|_| {
                LocaleError::InvalidInput(format!(
                    "line {}: bad country code {:?}",
                    line_no + 1,
                    fields[1]
                ))
            })?;
            let match_type: MatchType = fields[2].parse()?;

            self.add(start, country, match_type)?;
            added += 1;
        }
        Ok(added)
    }

    /// Number of records added so far
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Flush and sync the table, returning its summary
    pub fn finish(self) -> Result<TableSummary> {
        if self.record_count == 0 {
            drop(self.writer);
            fs::remove_file(&self.path)?;
            return Err(LocaleError::Format(
                "cannot finish a range table with no records".to_string(),
            ));
        }

        let file = self.writer.into_inner().map_err(|e| {
            LocaleError::Io(e.into_error())
        })?;
        file.sync_all()?;
        let file_size = file.metadata()?.len();

        tracing::debug!(
            path = %self.path.display(),
            records = self.record_count,
            "Finished range table"
        );

        Ok(TableSummary {
            path: self.path,
            record_count: self.record_count,
            file_size,
            checksum: self.hasher.finalize(),
        })
    }
}
