/*!
# Descriptor-driven CSV I/O

[`CsvReader`] and [`CsvWriter`] apply a [`CsvDescriptor`] to actual CSV data.
Tokenizing and quoting are left to the `csv` crate; this module handles the
charset, the null sentinel and the per-column conversions.

Files carry no header row: column position alone decides the field.
*/

use crate::{
    descriptor::CsvDescriptor,
    errors::{CodecError, CodecResult},
    record::{Record, Value},
};
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Terminator, WriterBuilder};
use std::io::{Cursor, Read, Write};
use tracing::debug;

impl CsvDescriptor {
    /// Reader producing records of the target type from `source`
    pub fn reader<R: Read>(&self, source: R) -> CodecResult<CsvReader<'_>> {
        CsvReader::new(self, source)
    }

    /// Writer emitting rows for records of the target type into `sink`
    pub fn writer<W: Write>(&self, sink: W) -> CsvWriter<'_, W> {
        CsvWriter::new(self, sink)
    }
}

// Every supported separator is ASCII.
fn delimiter(descriptor: &CsvDescriptor) -> u8 {
    descriptor.separator() as u8
}

/// Iterator over the records of a CSV source
pub struct CsvReader<'d> {
    descriptor: &'d CsvDescriptor,
    rows: StringRecordsIntoIter<Cursor<Vec<u8>>>,
    row: usize,
}

impl<'d> CsvReader<'d> {
    /// Consume `source`, decoding it with the descriptor's charset
    pub fn new<R: Read>(descriptor: &'d CsvDescriptor, mut source: R) -> CodecResult<Self> {
        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;

        let charset = descriptor.charset();
        let (text, malformed) = charset.decode_with_bom_removal(&bytes);
        if malformed {
            return Err(CodecError::Malformed(charset.name()));
        }

        let rows = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter(descriptor))
            .from_reader(Cursor::new(text.into_owned().into_bytes()))
            .into_records();

        Ok(Self {
            descriptor,
            rows,
            row: 0,
        })
    }

    /// Read every remaining record, stopping at the first failure
    pub fn read_all(self) -> CodecResult<Vec<Box<dyn Record>>> {
        self.collect()
    }

    fn decode(&self, cells: &StringRecord) -> CodecResult<Box<dyn Record>> {
        let columns = self.descriptor.columns();
        if cells.len() != columns.len() {
            return Err(CodecError::ColumnCount {
                row: self.row,
                expected: columns.len(),
                found: cells.len(),
            });
        }

        let target_type = self.descriptor.target_type();
        let mut record = target_type
            .instantiate()
            .ok_or_else(|| CodecError::Instantiation(target_type.name().to_string()))?;

        for (column, cell) in columns.iter().zip(cells.iter()) {
            let value = if cell == self.descriptor.null_value() {
                Value::Null
            } else {
                column.parse(cell).map_err(|message| CodecError::Conversion {
                    row: self.row,
                    field: column.field_name().to_string(),
                    message,
                })?
            };
            record
                .set(column.field_name(), value)
                .map_err(|message| CodecError::Conversion {
                    row: self.row,
                    field: column.field_name().to_string(),
                    message,
                })?;
        }

        if self.descriptor.debug() {
            debug!(row = self.row, cells = ?cells, "decoded CSV row");
        }
        Ok(record)
    }
}

impl Iterator for CsvReader<'_> {
    type Item = CodecResult<Box<dyn Record>>;

    fn next(&mut self) -> Option<Self::Item> {
        let cells = match self.rows.next()? {
            Ok(cells) => cells,
            Err(e) => return Some(Err(e.into())),
        };
        self.row += 1;
        Some(self.decode(&cells))
    }
}

/// Buffered writer; rows reach the sink encoded when [`CsvWriter::finish`] is called
pub struct CsvWriter<'d, W: Write> {
    descriptor: &'d CsvDescriptor,
    rows: csv::Writer<Vec<u8>>,
    sink: W,
    row: usize,
}

impl<'d, W: Write> CsvWriter<'d, W> {
    pub fn new(descriptor: &'d CsvDescriptor, sink: W) -> Self {
        let rows = WriterBuilder::new()
            .has_headers(false)
            .delimiter(delimiter(descriptor))
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        Self {
            descriptor,
            rows,
            sink,
            row: 0,
        }
    }

    /// Append one record as a row
    pub fn write(&mut self, record: &dyn Record) -> CodecResult<()> {
        self.row += 1;
        let mut cells = Vec::with_capacity(self.descriptor.column_count());

        for column in self.descriptor.columns() {
            let value = record
                .get(column.field_name())
                .ok_or_else(|| CodecError::Conversion {
                    row: self.row,
                    field: column.field_name().to_string(),
                    message: "field not readable".to_string(),
                })?;
            let cell = if value.is_null() {
                self.descriptor.null_value().to_string()
            } else {
                column.format(&value).map_err(|message| CodecError::Conversion {
                    row: self.row,
                    field: column.field_name().to_string(),
                    message,
                })?
            };
            cells.push(cell);
        }

        if self.descriptor.debug() {
            debug!(row = self.row, cells = ?cells, "encoded CSV row");
        }
        self.rows.write_record(&cells)?;
        Ok(())
    }

    /// Write every record in order
    pub fn write_all<'r, I>(&mut self, records: I) -> CodecResult<()>
    where
        I: IntoIterator<Item = &'r dyn Record>,
    {
        for record in records {
            self.write(record)?;
        }
        Ok(())
    }

    /// Encode buffered rows with the descriptor's charset and hand back the sink
    pub fn finish(self) -> CodecResult<W> {
        let Self {
            descriptor,
            rows,
            mut sink,
            ..
        } = self;

        let bytes = rows.into_inner().map_err(|e| CodecError::Io(e.into_error()))?;
        let text = String::from_utf8(bytes)
            .map_err(|e| CodecError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

        let (encoded, _, unmappable) = descriptor.charset().encode(&text);
        if unmappable {
            return Err(CodecError::Unmappable(descriptor.charset().name()));
        }

        sink.write_all(&encoded)?;
        sink.flush()?;
        Ok(sink)
    }
}
