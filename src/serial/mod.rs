//! Serial transport capability interface
//!
//! The runtime consumes serial devices through the small capability surface
//! defined here (open by name, read, write, close) so the handle table never
//! depends on a concrete transport. The default provider talks to the OS
//! serial devices through the `serialport` crate.

use std::io::{self, Read, Write};
use std::time::Duration;

/// Byte stream over an open serial connection.
///
/// Serial links are duplex, so every transport is both readable and
/// writable regardless of the mode the OPEN statement asked for.
pub trait SerialTransport: Read + Write {
    /// Release the transport. Errors are reported by the caller, never raised.
    fn close(&mut self) -> io::Result<()>;
}

/// Opens serial connections by OS port name (e.g. `COM3`).
pub trait SerialProvider {
    fn open(&self, port_name: &str) -> io::Result<Box<dyn SerialTransport>>;
}

/// Provider backed by the operating system's serial devices.
#[derive(Debug, Default)]
pub struct HardwareSerialProvider;

// The serialport crate defaults to a zero timeout, which turns every read
// into an immediate timeout error. i32::MAX milliseconds stays within the
// range the OS poll call accepts.
const READ_TIMEOUT: Duration = Duration::from_millis(i32::MAX as u64);

// Line settings (baud, parity, bits, stop) from the OPEN name are accepted
// but not interpreted; ports open with these defaults. Known limitation.
const DEFAULT_BAUD: u32 = 9600;

impl SerialProvider for HardwareSerialProvider {
    fn open(&self, port_name: &str) -> io::Result<Box<dyn SerialTransport>> {
        let port = serialport::new(port_name, DEFAULT_BAUD)
            .timeout(READ_TIMEOUT)
            .open()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        Ok(Box::new(HardwarePort(port)))
    }
}

struct HardwarePort(Box<dyn serialport::SerialPort>);

impl Read for HardwarePort {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl Write for HardwarePort {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl SerialTransport for HardwarePort {
    fn close(&mut self) -> io::Result<()> {
        // Dropping the port closes the OS handle
        Ok(())
    }
}
