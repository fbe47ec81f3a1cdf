//! Synthetic MTZ file builder for integration tests.

#![allow(dead_code)]

use std::path::Path;

use mtz_header::{
    BatchHeader, ColumnCounts, ColumnRecord, ColumnType, DatasetName, HeaderRecord, MAGIC,
    NUMBER_FORMAT,
};

/// Byte offset of the first header record in built files.
pub const HEADER_START: usize = 80;

/// One batch of the batch block.
#[derive(Debug, Clone)]
pub struct BatchFixture {
    pub serial: i32,
    pub title: String,
    pub integers: Vec<i32>,
    pub reals: Vec<f32>,
    pub axes: Vec<String>,
    /// Overrides the length triple written into the `BH` record.
    pub header_lengths: Option<[i32; 3]>,
    /// Overrides the length triple written into the binary block.
    pub stream_lengths: Option<[i32; 3]>,
}

impl BatchFixture {
    pub fn new(serial: i32) -> Self {
        Self {
            serial,
            title: format!("batch {serial}"),
            integers: vec![serial * 10, 0, 1],
            reals: vec![0.5, 1.0, 90.0],
            axes: vec!["PHI".to_string()],
            header_lengths: None,
            stream_lengths: None,
        }
    }

    pub fn lengths(&self) -> [i32; 3] {
        let nintegers = self.integers.len() as i32 + 3;
        let nreals = self.reals.len() as i32;
        [nintegers + nreals, nintegers, nreals]
    }

    fn write(&self, bytes: &mut Vec<u8>) {
        let [nwords, nintegers, nreals] = self.header_lengths.unwrap_or(self.lengths());
        push(
            bytes,
            &HeaderRecord::Bh(BatchHeader {
                serial: self.serial,
                nwords,
                nintegers,
                nreals,
            }),
        );
        push(bytes, &HeaderRecord::Title(self.title.clone()));
        for value in self.stream_lengths.unwrap_or(self.lengths()) {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        for value in &self.integers {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        for value in &self.reals {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        push(bytes, &HeaderRecord::Bhch(self.axes.clone()));
    }
}

enum Line {
    Record(HeaderRecord),
    Raw(String),
}

/// Builder for a complete MTZ file header.
#[derive(Default)]
pub struct MtzFixture {
    lines: Vec<Line>,
    history: Vec<String>,
    batches: Vec<BatchFixture>,
}

impl MtzFixture {
    /// `VERS`, `TITLE` and `NCOL` with the given counts.
    pub fn minimal(columns: i32, batches: i32) -> Self {
        Self::default()
            .record(HeaderRecord::Vers("MTZ:V1.1".to_string()))
            .record(HeaderRecord::Title("synthetic".to_string()))
            .record(HeaderRecord::Ncol(ColumnCounts {
                columns,
                reflections: 0,
                batches,
            }))
    }

    pub fn record(mut self, record: HeaderRecord) -> Self {
        self.lines.push(Line::Record(record));
        self
    }

    /// Add a line that bypasses record encoding.
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(Line::Raw(line.to_string()));
        self
    }

    pub fn column(self, label: &str, column_type: ColumnType, dataset_id: i32) -> Self {
        self.record(HeaderRecord::Column(ColumnRecord {
            label: label.to_string(),
            column_type,
            min: 0.0,
            max: 10.0,
            dataset_id,
        }))
    }

    pub fn dataset(self, id: i32, name: &str) -> Self {
        self.record(HeaderRecord::Dataset(DatasetName {
            id,
            name: name.to_string(),
        }))
    }

    pub fn history(mut self, line: &str) -> Self {
        self.history.push(line.to_string());
        self
    }

    pub fn batch(mut self, batch: BatchFixture) -> Self {
        self.batches.push(batch);
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAGIC);
        let word_offset = (HEADER_START / 4 + 1) as i32;
        bytes.extend_from_slice(&word_offset.to_le_bytes());
        bytes.extend_from_slice(&NUMBER_FORMAT);
        // Reflection data would live here.
        bytes.resize(HEADER_START, 0);

        for line in &self.lines {
            match line {
                Line::Record(record) => push(&mut bytes, record),
                Line::Raw(text) => push_raw(&mut bytes, text),
            }
        }
        push(&mut bytes, &HeaderRecord::End);

        if !self.history.is_empty() {
            push(&mut bytes, &HeaderRecord::MtzHist(self.history.len()));
            for line in &self.history {
                push_raw(&mut bytes, line);
            }
        }
        if !self.batches.is_empty() {
            push(&mut bytes, &HeaderRecord::MtzBats);
            for batch in &self.batches {
                batch.write(&mut bytes);
            }
        }
        push(&mut bytes, &HeaderRecord::MtzEndOfHeaders);
        bytes
    }

    pub fn write_to(&self, path: &Path) {
        std::fs::write(path, self.to_bytes()).expect("write fixture");
    }
}

fn push(bytes: &mut Vec<u8>, record: &HeaderRecord) {
    bytes.extend_from_slice(&record.encode().expect("encodable record"));
}

fn push_raw(bytes: &mut Vec<u8>, text: &str) {
    let mut line = [b' '; 80];
    line[..text.len()].copy_from_slice(text.as_bytes());
    bytes.extend_from_slice(&line);
}
