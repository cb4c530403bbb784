use std::{fmt::Display, fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::Result;

use located_error::LocatedError;

pub mod error;
pub use error::WriterError;

/// THE field separator used for this generic writer.
pub const WRITER_SEPARATOR: &str = "\t";

/// A generic, line-oriented table writer.
/// - source: Boxed `BufWriter` (can either handle file-writing, or any in-memory sink).
/// - lines : number of lines written so far.
pub struct GenericWriter<'a> {
    source: BufWriter<Box<dyn Write + 'a>>,
    lines : usize,
}

impl<'a> GenericWriter<'a> {
    /// Instantiate a new `GenericWriter`, linked to a file. Any existing file is truncated.
    ///
    /// # Errors
    /// if `path` is either an invalid file, or the user does not have the proper
    /// UNIX permissions to write at this location.
    pub fn create(path: &Path) -> Result<GenericWriter<'a>> {
        let file = File::create(path)
            .map_err(|source| WriterError::CreateFile { path: path.to_path_buf(), source })
            .loc("While creating output file")?;
        Ok(Self::from_writer(file))
    }

    /// Instantiate a new `GenericWriter` on top of any sink.
    pub fn from_writer(sink: impl Write + 'a) -> GenericWriter<'a> {
        GenericWriter { source: BufWriter::new(Box::new(sink)), lines: 0 }
    }

    /// Write a single line.
    ///
    /// # Errors
    /// - If the inner writer returns an I/O error.
    pub fn write_line<T: Display + ?Sized>(&mut self, line: &T) -> Result<()> {
        writeln!(self.source, "{line}")
            .map_err(WriterError::IOError)
            .loc("While writing line into file")?;
        self.lines += 1;
        Ok(())
    }

    /// Write a single line, made of `fields` joined by [`WRITER_SEPARATOR`].
    ///
    /// # Errors
    /// - If the inner writer returns an I/O error.
    pub fn write_fields<T, I>(&mut self, fields: T) -> Result<()>
    where   T: IntoIterator<Item = I>,
            I: Display,
    {
        let write = || -> std::io::Result<()> {
            for (i, field) in fields.into_iter().enumerate() {
                if i > 0 {
                    self.source.write_all(WRITER_SEPARATOR.as_bytes())?;
                }
                write!(self.source, "{field}")?;
            }
            writeln!(self.source)
        };
        write().map_err(WriterError::IOError).loc("While writing fields into file")?;
        self.lines += 1;
        Ok(())
    }

    /// Flush the buffer contents and release the underlying sink.
    /// Returns the number of lines that were written.
    ///
    /// # Errors
    /// - If flushing the buffer fails. Dropping a `GenericWriter` without calling `finish()` silently
    ///   ignores such errors.
    pub fn finish(mut self) -> Result<usize> {
        self.source.flush()
            .map_err(WriterError::IOError)
            .loc("While flushing buffer contents of Writer")?;
        Ok(self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_file() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let path   = tmpdir.path().join("variants.filtered.tmp");

        let mut writer = GenericWriter::create(&path)?;
        writer.write_line("gene\tpatient_ID")?;
        writer.write_fields(["TP53", "P1_T"])?;
        writer.write_line("KRAS\tP2_T")?;
        assert_eq!(writer.finish()?, 3);

        let got = std::fs::read_to_string(&path)?;
        assert_eq!(got, "gene\tpatient_ID\nTP53\tP1_T\nKRAS\tP2_T\n");
        Ok(())
    }

    #[test]
    fn write_mixed_fields() -> Result<()> {
        let mut sink = Vec::new();
        {
            let mut writer = GenericWriter::from_writer(&mut sink);
            writer.write_fields([&"BRAF" as &dyn Display, &2usize, &0.5f64])?;
            writer.finish()?;
        }
        assert_eq!(String::from_utf8(sink)?, "BRAF\t2\t0.5\n");
        Ok(())
    }
}
