//! Generic Buffered Reader
use std::{
    fs::File,
    io::{BufRead, BufReader, Error as IoError, Read},
    path::Path,
};

#[cfg(not(feature = "flate2"))]
use std::io::ErrorKind;

#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

#[derive(Debug)]
pub enum BufferedReader {
    /// Readable navigation file
    PlainFile(BufReader<File>),
    /// gzip compressed navigation file
    #[cfg(feature = "flate2")]
    GzFile(BufReader<GzDecoder<File>>),
}

impl BufferedReader {
    /// Opens a navigation file, gzip compressed or not (`.gz` extension)
    pub fn new(path: &Path) -> std::io::Result<Self> {
        let f = File::open(path)?;
        let gzip = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("gz"))
            .unwrap_or(false);
        if gzip {
            Self::gzip(f)
        } else {
            Ok(Self::PlainFile(BufReader::new(f)))
        }
    }

    #[cfg(feature = "flate2")]
    fn gzip(f: File) -> std::io::Result<Self> {
        Ok(Self::GzFile(BufReader::new(GzDecoder::new(f))))
    }

    #[cfg(not(feature = "flate2"))]
    fn gzip(_: File) -> std::io::Result<Self> {
        Err(IoError::new(
            ErrorKind::Unsupported,
            "gzip compressed data require the flate2 build feature",
        ))
    }
}

impl Read for BufferedReader {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, IoError> {
        match self {
            Self::PlainFile(h) => h.read(buf),
            #[cfg(feature = "flate2")]
            Self::GzFile(h) => h.read(buf),
        }
    }
}

impl BufRead for BufferedReader {
    fn fill_buf(&mut self) -> Result<&[u8], IoError> {
        match self {
            Self::PlainFile(h) => h.fill_buf(),
            #[cfg(feature = "flate2")]
            Self::GzFile(h) => h.fill_buf(),
        }
    }
    fn consume(&mut self, s: usize) {
        match self {
            Self::PlainFile(h) => h.consume(s),
            #[cfg(feature = "flate2")]
            Self::GzFile(h) => h.consume(s),
        }
    }
}
