//! I/O endpoint backends
//!
//! The concrete resource behind a handle is either a buffered disk file or
//! a serial port. Both variants expose one read/write/size/flush/close
//! surface so the verb layer never branches on the kind; the enum stays
//! closed so a new backend is a compile-time-checked addition.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use crate::serial::SerialTransport;

/// Buffered state for a disk file.
///
/// Input mode carries a reader, Output/Append modes carry a writer, never
/// both at once.
pub struct FileBackend {
    reader: Option<BufReader<File>>,
    writer: Option<BufWriter<File>>,
}

impl FileBackend {
    /// Wrap a file opened for input
    pub fn for_input(file: File) -> Self {
        Self {
            reader: Some(BufReader::new(file)),
            writer: None,
        }
    }

    /// Wrap a file opened for output or append
    pub fn for_output(file: File) -> Self {
        Self {
            reader: None,
            writer: Some(BufWriter::new(file)),
        }
    }

    fn os_file(&self) -> Option<&File> {
        match (&self.reader, &self.writer) {
            (Some(reader), _) => Some(reader.get_ref()),
            (_, Some(writer)) => Some(writer.get_ref()),
            (None, None) => None,
        }
    }
}

/// An open serial connection with its local read buffer.
///
/// Serial links are duplex: reads always go through the buffered reader,
/// writes go straight to the transport with no local buffering.
pub struct SerialBackend {
    port_name: String,
    reader: BufReader<Box<dyn SerialTransport>>,
}

impl SerialBackend {
    pub fn new(port_name: String, transport: Box<dyn SerialTransport>) -> Self {
        Self {
            port_name,
            reader: BufReader::new(transport),
        }
    }

    /// OS name of the underlying port, e.g. `COM3`
    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

/// The concrete resource a handle is connected to
pub enum Backend {
    File(FileBackend),
    Serial(SerialBackend),
}

impl Backend {
    pub fn is_serial(&self) -> bool {
        matches!(self, Backend::Serial(_))
    }

    /// Whether this endpoint can be read from
    pub fn has_reader(&self) -> bool {
        match self {
            Backend::File(file) => file.reader.is_some(),
            Backend::Serial(_) => true,
        }
    }

    /// Whether this endpoint can be written to
    pub fn can_write(&self) -> bool {
        match self {
            Backend::File(file) => file.writer.is_some(),
            Backend::Serial(_) => true,
        }
    }

    /// The buffered reader, if this endpoint has one
    pub fn reader(&mut self) -> Option<&mut dyn BufRead> {
        match self {
            Backend::File(file) => file
                .reader
                .as_mut()
                .map(|reader| reader as &mut dyn BufRead),
            Backend::Serial(serial) => Some(&mut serial.reader),
        }
    }

    /// Write bytes to the endpoint.
    ///
    /// File output goes through the write buffer and is only durable after
    /// a flush; serial output goes straight to the transport.
    pub fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        match self {
            Backend::File(file) => match file.writer.as_mut() {
                Some(writer) => writer.write_all(bytes),
                None => Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    "file not open for output",
                )),
            },
            Backend::Serial(serial) => serial.reader.get_mut().write_all(bytes),
        }
    }

    /// Byte size of the endpoint.
    ///
    /// Files report the OS file length. Serial ports have no meaningful
    /// size, so they report the bytes currently sitting in the local read
    /// buffer as a best-effort approximation.
    pub fn size(&self) -> io::Result<u64> {
        match self {
            Backend::File(file) => match file.os_file() {
                Some(os_file) => Ok(os_file.metadata()?.len()),
                None => Ok(0),
            },
            Backend::Serial(serial) => Ok(serial.reader.buffer().len() as u64),
        }
    }

    /// Flush pending buffered output, if any
    pub fn flush(&mut self) -> io::Result<()> {
        match self {
            Backend::File(file) => match file.writer.as_mut() {
                Some(writer) => writer.flush(),
                None => Ok(()),
            },
            Backend::Serial(_) => Ok(()),
        }
    }

    /// Flush pending output and release the underlying resource
    pub fn close(mut self) -> io::Result<()> {
        self.flush()?;
        match &mut self {
            Backend::File(_) => Ok(()),
            Backend::Serial(serial) => serial.reader.get_mut().close(),
        }
    }
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::File(file) => f
                .debug_struct("File")
                .field("reader", &file.reader.is_some())
                .field("writer", &file.writer.is_some())
                .finish(),
            Backend::Serial(serial) => f
                .debug_struct("Serial")
                .field("port", &serial.port_name)
                .finish(),
        }
    }
}
