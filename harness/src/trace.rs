//! Trace data files.
//!
//! One line per phase in sweep order, two whitespace separated signed
//! decimal columns: `sin cos`.
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use sincos::Sample;

use crate::Error;

/// Sample by sample trace writer.
///
/// Suited as a sink that cannot return errors: the first I/O error is kept,
/// later samples are dropped and [`Writer::finish`] reports it.
pub struct Writer<W: Write> {
    inner: W,
    count: usize,
    error: Option<io::Error>,
}

impl<W: Write> Writer<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            count: 0,
            error: None,
        }
    }

    pub fn push(&mut self, sample: Sample) {
        if self.error.is_some() {
            return;
        }
        match writeln!(self.inner, "{} {}", sample.sin, sample.cos) {
            Ok(()) => self.count += 1,
            Err(e) => self.error = Some(e),
        }
    }

    /// Flush and return the number of samples written.
    pub fn finish(mut self) -> Result<usize, Error> {
        if let Some(e) = self.error.take() {
            return Err(e.into());
        }
        self.inner.flush()?;
        Ok(self.count)
    }
}

pub fn write<W: Write>(
    writer: W,
    samples: impl IntoIterator<Item = Sample>,
) -> Result<usize, Error> {
    let mut writer = Writer::new(writer);
    for s in samples {
        writer.push(s);
    }
    writer.finish()
}

pub fn read<R: BufRead>(reader: R) -> Result<Vec<Sample>, Error> {
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let line = line?;
            let mut cols = line.split_whitespace();
            let (Some(sin), Some(cos), None) =
                (cols.next(), cols.next(), cols.next())
            else {
                return Err(Error::Columns(i + 1));
            };
            let parse = |v: &str| -> Result<i32, Error> {
                v.parse().map_err(|source| Error::Value {
                    line: i + 1,
                    source,
                })
            };
            Ok(Sample {
                sin: parse(sin)?,
                cos: parse(cos)?,
            })
        })
        .collect()
}

pub fn write_file(
    path: impl AsRef<Path>,
    samples: impl IntoIterator<Item = Sample>,
) -> Result<usize, Error> {
    write(BufWriter::new(File::create(path)?), samples)
}

pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<Sample>, Error> {
    read(BufReader::new(File::open(path)?))
}
