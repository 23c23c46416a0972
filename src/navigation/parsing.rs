//! Navigation record reader
use log::{debug, warn};

use crate::{
    error::RecordError,
    header::Header,
    layout::Layout,
    navigation::EphemerisRecord,
    prelude::{Constellation, SV},
    token::tokens,
};

use std::io::{BufRead, Lines};

/// [RecordReader] assembles navigation records, one epoch line followed
/// by its continuation lines, and maps their numeric content onto the
/// fields described by the revision [Layout].
///
/// Each record is either accepted, or rejected with a [RecordError]:
/// a rejection never interrupts the reader.
/// A record left incomplete by the end of file is dropped silently (it is not
/// followed by any other record).
/// Records of constellations other than GPS and QZSS, found in mixed files,
/// are consumed then discarded.
pub struct RecordReader<R: BufRead> {
    lines: Lines<R>,
    layout: &'static Layout,
    /// Constellation of the PRN only identifiers (old revisions)
    constellation: Constellation,
    /// Last line number read (1-based, header included)
    line: usize,
    /// Epoch line that interrupted the previous record
    pending: Option<(usize, String)>,
    /// I/O error that terminated the iteration
    io_error: Option<std::io::Error>,
}

impl<R: BufRead> RecordReader<R> {
    /// Builds a [RecordReader] for the body that follows `header`.
    /// Returns None if no [Layout] is known for this revision.
    pub fn new(reader: R, header: &Header) -> Option<Self> {
        let layout = Layout::lookup(header.version)?;
        Some(Self {
            lines: reader.lines(),
            layout,
            constellation: header.constellation,
            line: header.lines,
            pending: None,
            io_error: None,
        })
    }

    /// Returns the I/O error that terminated the iteration, if any
    pub fn take_io_error(&mut self) -> Option<std::io::Error> {
        self.io_error.take()
    }

    fn next_line(&mut self) -> Option<(usize, String)> {
        match self.lines.next()? {
            Ok(line) => {
                self.line += 1;
                Some((self.line, line))
            },
            Err(e) => {
                self.io_error = Some(e);
                None
            },
        }
    }

    /// Interprets one complete record.
    /// Each value must sit in its own column: a blank or malformed column
    /// followed by other values would shift every later field.
    fn build(
        &self,
        line: usize,
        sv: SV,
        epoch_line: &str,
        continuation: &[String],
    ) -> Result<EphemerisRecord, RecordError> {
        let toc = self
            .layout
            .parse_toc(epoch_line)
            .ok_or_else(|| RecordError::EpochParsing {
                line,
                content: epoch_line.to_string(),
            })?;

        let slots = self.layout.value_slots(epoch_line, continuation);
        let filled = slots
            .iter()
            .rposition(|slot| !slot.is_empty())
            .map_or(0, |last| last + 1);

        let (min, max) = self.layout.accepted_tokens();
        let mismatch = |found| RecordError::FieldCountMismatch {
            line,
            sv,
            min,
            max,
            found,
        };

        let found = slots[..filled]
            .iter()
            .map(|slot| tokens(slot).count())
            .sum::<usize>();
        if !self.layout.accepts(found) {
            return Err(mismatch(found));
        }

        let mut values = Vec::with_capacity(filled);
        for slot in &slots[..filled] {
            let mut slot_tokens = tokens(slot);
            match (slot_tokens.next(), slot_tokens.next()) {
                (Some(value), None) => values.push(value),
                _ => {
                    debug!("line {}: {} misaligned value \"{}\"", line, sv, slot);
                    return Err(mismatch(values.len()));
                },
            }
        }

        let mut record = EphemerisRecord::new(sv, toc);
        for (field, value) in self.layout.fields.iter().zip(values.iter()) {
            match value {
                Ok(value) => record.set(*field, *value),
                Err(e) => warn!("line {}: {} {}: {}", line, sv, field, e),
            }
        }

        let reserved = values.len().saturating_sub(self.layout.fields.len());
        if reserved > 0 {
            debug!("line {}: {} discarded {} reserved value(s)", line, sv, reserved);
        }

        Ok(record)
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<EphemerisRecord, RecordError>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (line, epoch_line) = match self.pending.take() {
                Some(pending) => pending,
                None => self.next_line()?,
            };

            if epoch_line.trim().is_empty() {
                continue;
            }
            if !self.layout.is_epoch_line(&epoch_line) {
                debug!("line {}: not an epoch line, skipped", line);
                continue;
            }

            let sv = self.layout.parse_sv(&epoch_line, self.constellation);
            let expected = match sv {
                Some(sv) => self.layout.continuation_lines(sv.constellation),
                None => self.layout.continuation_lines,
            };

            let mut continuation = Vec::with_capacity(expected);

            while continuation.len() < expected {
                let (n, next) = match self.next_line() {
                    Some(next) => next,
                    None => {
                        warn!(
                            "line {}: incomplete record at end of file ({}/{} lines), dropped",
                            line,
                            continuation.len(),
                            expected
                        );
                        return None;
                    },
                };
                if self.layout.is_epoch_line(&next) {
                    self.pending = Some((n, next));
                    let error = RecordError::TruncatedRecord {
                        line,
                        collected: continuation.len(),
                        expected,
                    };
                    warn!("{}", error);
                    return Some(Err(error));
                }
                continuation.push(next);
            }

            let sv = match sv {
                Some(sv) => sv,
                None => {
                    let error = RecordError::SvParsing {
                        line,
                        content: self.layout.sv.slice(&epoch_line).to_string(),
                    };
                    warn!("{}", error);
                    return Some(Err(error));
                },
            };

            if !matches!(sv.constellation, Constellation::GPS | Constellation::QZSS) {
                debug!("line {}: {} is not supported, skipped", line, sv);
                continue;
            }

            let record = self.build(line, sv, &epoch_line, &continuation);
            match &record {
                Ok(record) => debug!("line {}: {} {} accepted", line, record.sv, record.toc),
                Err(e) => warn!("{}", e),
            }
            return Some(record);
        }
    }
}
