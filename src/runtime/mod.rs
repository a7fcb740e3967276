//! BASIC-facing file statement verbs
//!
//! The outward layer of the runtime. Internal code is `Result`-typed; every
//! verb here translates failures into a diagnostic on the log channel plus
//! a degraded return value (empty string, zero, or a no-op) so the BASIC
//! program's control flow always continues.

use std::io::Read;

use crate::backend::Backend;
use crate::error::FileIoError;
use crate::format;
use crate::resolver::{self, OpenMode};
use crate::serial::{HardwareSerialProvider, SerialProvider};
use crate::table::HandleTable;

/// File statement runtime context.
///
/// Owns the handle table and the serial provider for one interpreter
/// session. Single-threaded by contract: no verb suspends, reads and writes
/// block until the OS or transport call returns, and callers needing
/// concurrency must serialize access externally.
pub struct FileRuntime {
    table: HandleTable,
    serial: Box<dyn SerialProvider>,
}

impl FileRuntime {
    /// Create a runtime wired to the OS serial devices
    pub fn new() -> Self {
        Self::with_serial_provider(Box::new(HardwareSerialProvider))
    }

    /// Create a runtime with a caller-supplied serial provider
    pub fn with_serial_provider(serial: Box<dyn SerialProvider>) -> Self {
        Self {
            table: HandleTable::new(),
            serial,
        }
    }

    /// The handle table backing this runtime
    pub fn table(&self) -> &HandleTable {
        &self.table
    }

    /// OPEN name FOR mode AS #number
    pub fn open(&mut self, name: &str, number: i32, mode: OpenMode) {
        // Checked before resolving so a busy number cannot truncate the
        // target of an Output open
        if self.table.is_open(number) {
            log::warn!("OPEN: {}", FileIoError::AlreadyOpen(number));
            return;
        }
        match resolver::resolve(name, mode, self.serial.as_ref()) {
            Ok(backend) => {
                if let Err(e) = self.table.open(number, backend) {
                    log::warn!("OPEN: {}", e);
                }
            }
            Err(e) => log::warn!("OPEN #{}: {}", number, e),
        }
    }

    /// OPEN with the one-letter mode syntax ("I", "O", "A", "R")
    pub fn open_short(&mut self, name: &str, number: i32, mode: &str) {
        match OpenMode::from_short(mode) {
            Some(mode) => self.open(name, number, mode),
            None => log::warn!(
                "OPEN #{}: {}",
                number,
                FileIoError::BadMode(mode.to_string())
            ),
        }
    }

    /// CLOSE #number
    pub fn close(&mut self, number: i32) {
        if let Err(e) = self.table.close(number) {
            log::warn!("CLOSE: {}", e);
        }
    }

    /// CLOSE with no argument: release every open handle.
    ///
    /// Best-effort bulk teardown for session shutdown; individual failures
    /// are reported and the sweep continues.
    pub fn close_all(&mut self) {
        for e in self.table.close_all() {
            log::warn!("CLOSE: {}", e);
        }
    }

    /// EOF(number) as a BASIC truth value: -1 exhausted, 0 otherwise.
    ///
    /// Serial handles always report 0; a live device has no natural end, so
    /// callers stop via counts or timeouts instead.
    pub fn eof(&self, number: i32) -> i32 {
        if self.hit_eof(number) {
            -1
        } else {
            0
        }
    }

    /// LOF(number): byte size of the endpoint, 0 when not open
    pub fn lof(&self, number: i32) -> i64 {
        let handle = match self.table.get(number) {
            Ok(handle) => handle,
            Err(e) => {
                log::warn!("LOF: {}", e);
                return 0;
            }
        };
        match handle.backend().size() {
            Ok(size) => size as i64,
            Err(e) => {
                log::warn!("LOF #{}: {}", number, e);
                0
            }
        }
    }

    /// INPUT# / LINE INPUT#: one delimited line, terminator stripped.
    ///
    /// Reads through the next `\n`; one trailing `\n` and then one trailing
    /// `\r` are stripped, so `\n` and `\r\n` terminated lines read the same.
    /// End of stream latches the handle's EOF flag and whatever partial
    /// bytes were read (possibly none) are still returned.
    pub fn input_line(&mut self, number: i32) -> String {
        if self.hit_eof(number) {
            return String::new();
        }
        let handle = match self.table.get_mut(number) {
            Ok(handle) => handle,
            Err(_) => return String::new(),
        };
        let reader = match handle.backend_mut().reader() {
            Some(reader) => reader,
            None => return String::new(),
        };

        let mut line = Vec::new();
        let mut at_end = false;
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => at_end = true,
            Ok(_) => at_end = !line.ends_with(b"\n"),
            Err(e) => log::warn!("INPUT# {}: {}", number, e),
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if at_end {
            self.latch_eof(number);
        }
        String::from_utf8_lossy(&line).into_owned()
    }

    /// INPUT# into an integer variable; an empty line reads as 0
    pub fn input_integer(&mut self, number: i32) -> i32 {
        let line = self.input_line(number);
        if line.is_empty() {
            return 0;
        }
        format::parse_integer(&line)
    }

    /// INPUT# into a float variable; an empty line reads as 0
    pub fn input_float(&mut self, number: i32) -> f64 {
        let line = self.input_line(number);
        if line.is_empty() {
            return 0.0;
        }
        format::parse_float(&line)
    }

    /// INPUT$(count, #number): fixed-length read.
    ///
    /// File handles fill up to `count` bytes; exhausting the stream first
    /// latches EOF and the short result is reported but still delivered.
    /// Serial handles take a single buffered read so a quiet line cannot
    /// block a sized read past the first delivery, and never latch EOF.
    pub fn input_count(&mut self, count: i32, number: i32) -> String {
        if count < 1 {
            log::warn!("INPUT$ #{}: {}", number, FileIoError::BadLength(count));
            return String::new();
        }
        let serial = match self.table.get(number) {
            Ok(handle) => handle.is_serial(),
            Err(e) => {
                log::warn!("INPUT$: {}", e);
                return String::new();
            }
        };
        if !serial && self.hit_eof(number) {
            return String::new();
        }
        let handle = match self.table.get_mut(number) {
            Ok(handle) => handle,
            Err(_) => return String::new(),
        };
        let reader = match handle.backend_mut().reader() {
            Some(reader) => reader,
            None => return String::new(),
        };

        let wanted = count as usize;
        let mut buf = vec![0u8; wanted];
        let mut got = 0;
        let mut at_end = false;
        if serial {
            match reader.read(&mut buf) {
                Ok(n) => got = n,
                Err(e) => log::warn!("INPUT$ #{}: {}", number, e),
            }
        } else {
            while got < wanted {
                match reader.read(&mut buf[got..]) {
                    Ok(0) => {
                        at_end = true;
                        break;
                    }
                    Ok(n) => got += n,
                    Err(e) => {
                        log::warn!("INPUT$ #{}: {}", number, e);
                        break;
                    }
                }
            }
        }
        if at_end {
            self.latch_eof(number);
        }
        if got < wanted {
            log::warn!(
                "INPUT$ #{}: {}",
                number,
                FileIoError::ShortRead { wanted, got }
            );
        }
        buf.truncate(got);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// PRINT#: write a string verbatim
    pub fn print(&mut self, number: i32, value: &str) {
        let handle = match self.table.get_mut(number) {
            Ok(handle) => handle,
            Err(e) => {
                log::warn!("PRINT#: {}", e);
                return;
            }
        };
        if !handle.backend().can_write() {
            log::warn!("PRINT# {}: file not open for output", number);
            return;
        }
        let result = handle.backend_mut().write(value.as_bytes());
        if let Err(e) = result {
            match handle.backend() {
                Backend::Serial(serial) => {
                    log::warn!("PRINT# {} on port {}: {}", number, serial.port_name(), e)
                }
                Backend::File(_) => log::warn!("PRINT# {}: {}", number, e),
            }
        }
    }

    /// PRINT# an integer in its canonical text form
    pub fn print_int(&mut self, number: i32, value: i32) {
        self.print(number, &format::int_to_string(value));
    }

    /// PRINT# a float in its canonical text form
    pub fn print_float(&mut self, number: i32, value: f64) {
        self.print(number, &format::float_to_string(value));
    }

    /// PRINT# line terminator
    pub fn newline(&mut self, number: i32) {
        self.print(number, "\n");
    }

    fn hit_eof(&self, number: i32) -> bool {
        let handle = match self.table.get(number) {
            Ok(handle) => handle,
            Err(e) => {
                log::warn!("EOF: {}", e);
                return true;
            }
        };
        if handle.is_serial() {
            return false;
        }
        if handle.eof() {
            return true;
        }
        if !handle.backend().has_reader() {
            log::warn!("EOF: file #{} not open for input", number);
            return true;
        }
        false
    }

    fn latch_eof(&mut self, number: i32) {
        // NotOpen here is reported, never propagated
        if let Err(e) = self.table.set_eof(number) {
            log::warn!("EOF: {}", e);
        }
    }
}

impl Default for FileRuntime {
    fn default() -> Self {
        Self::new()
    }
}
