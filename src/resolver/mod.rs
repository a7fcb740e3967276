//! Endpoint name resolution
//!
//! Decides whether an OPEN target is a serial device (`COMn[:options]`,
//! case-insensitive) or a filesystem path, and builds the matching backend.
//! A `COM` prefix always claims the name; serial devices open regardless of
//! the requested mode because the link is duplex.

use std::fs::{File, OpenOptions};

use crate::backend::{Backend, FileBackend, SerialBackend};
use crate::error::{FileIoError, Result};
use crate::serial::SerialProvider;

/// Open modes accepted by the OPEN statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    Input,
    Output,
    Append,
    /// Record-style random access, reserved; opening under it reports an
    /// unsupported mode
    Random,
}

impl OpenMode {
    /// Decode the integer-coded form used by compiled OPEN statements
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(OpenMode::Input),
            1 => Some(OpenMode::Output),
            2 => Some(OpenMode::Append),
            3 => Some(OpenMode::Random),
            _ => None,
        }
    }

    /// Decode the one-letter form of the short OPEN syntax, case-insensitive
    pub fn from_short(mode: &str) -> Option<Self> {
        match mode.to_ascii_lowercase().as_str() {
            "i" => Some(OpenMode::Input),
            "o" => Some(OpenMode::Output),
            "a" => Some(OpenMode::Append),
            "r" => Some(OpenMode::Random),
            _ => None,
        }
    }
}

/// A parsed `COMn[:options]` device name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialName {
    pub port_number: u32,
    /// Raw text after the `:`, upper-cased; carried but not interpreted
    pub options: String,
}

impl SerialName {
    /// OS-level port name, e.g. `COM3`
    pub fn port_name(&self) -> String {
        format!("COM{}", self.port_number)
    }
}

/// Match `name` against the serial-device pattern.
///
/// `None` means the name is a plain filesystem path. A `COM` prefix always
/// claims the name, so `COMMAND.TXT` fails with `BadPortNumber` rather than
/// falling through to the filesystem.
pub fn parse_serial_name(name: &str) -> Option<Result<SerialName>> {
    let upper = name.to_ascii_uppercase();
    let rest = upper.strip_prefix("COM")?;
    let (port, options) = match rest.split_once(':') {
        Some((port, options)) => (port, options),
        None => (rest, ""),
    };
    match port.parse::<u32>() {
        Ok(port_number) => Some(Ok(SerialName {
            port_number,
            options: options.to_string(),
        })),
        Err(_) => Some(Err(FileIoError::BadPortNumber(port.to_string()))),
    }
}

/// Open a filesystem path under the given mode
pub fn open_file(name: &str, mode: OpenMode) -> Result<Backend> {
    let backend = match mode {
        OpenMode::Input => {
            let file = File::open(name)
                .map_err(|e| FileIoError::Transport(format!("{}: {}", name, e)))?;
            FileBackend::for_input(file)
        }
        OpenMode::Output => {
            let file = File::create(name)
                .map_err(|e| FileIoError::Transport(format!("{}: {}", name, e)))?;
            FileBackend::for_output(file)
        }
        OpenMode::Append => {
            let file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(name)
                .map_err(|e| FileIoError::Transport(format!("{}: {}", name, e)))?;
            FileBackend::for_output(file)
        }
        OpenMode::Random => {
            return Err(FileIoError::BadMode(format!("unsupported mode: {:?}", mode)))
        }
    };
    Ok(Backend::File(backend))
}

/// Resolve an OPEN target to a ready backend
pub fn resolve(name: &str, mode: OpenMode, serial: &dyn SerialProvider) -> Result<Backend> {
    if let Some(parsed) = parse_serial_name(name) {
        let device = parsed?;
        let port_name = device.port_name();
        if !device.options.is_empty() {
            // Baud/parity/bits/stop/flow-control fields are accepted but
            // not applied; the port opens with provider defaults
            log::warn!(
                "OPEN {}: mode options not interpreted: [{}]",
                port_name,
                device.options
            );
        }
        let transport = serial
            .open(&port_name)
            .map_err(|e| FileIoError::Transport(format!("port {}: {}", port_name, e)))?;
        return Ok(Backend::Serial(SerialBackend::new(port_name, transport)));
    }
    open_file(name, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;

    #[test]
    fn test_mode_codes() {
        assert_eq!(OpenMode::from_code(0), Some(OpenMode::Input));
        assert_eq!(OpenMode::from_code(1), Some(OpenMode::Output));
        assert_eq!(OpenMode::from_code(2), Some(OpenMode::Append));
        assert_eq!(OpenMode::from_code(3), Some(OpenMode::Random));
        assert_eq!(OpenMode::from_code(4), None);
        assert_eq!(OpenMode::from_code(-1), None);
    }

    #[test]
    fn test_mode_letters() {
        assert_eq!(OpenMode::from_short("i"), Some(OpenMode::Input));
        assert_eq!(OpenMode::from_short("O"), Some(OpenMode::Output));
        assert_eq!(OpenMode::from_short("a"), Some(OpenMode::Append));
        assert_eq!(OpenMode::from_short("R"), Some(OpenMode::Random));
        assert_eq!(OpenMode::from_short("x"), None);
        assert_eq!(OpenMode::from_short(""), None);
    }

    #[test]
    fn test_plain_paths_are_not_serial() {
        assert!(parse_serial_name("data.txt").is_none());
        assert!(parse_serial_name("/tmp/report.out").is_none());
        assert!(parse_serial_name("comet/tail.txt").is_none());
    }

    #[test]
    fn test_serial_names_parse() {
        let device = parse_serial_name("COM3").unwrap().unwrap();
        assert_eq!(device.port_number, 3);
        assert_eq!(device.options, "");
        assert_eq!(device.port_name(), "COM3");

        // Case-insensitive prefix, options split at the first colon
        let device = parse_serial_name("com3:9600,N,8,1,RS,CS0,DS0,CD0")
            .unwrap()
            .unwrap();
        assert_eq!(device.port_number, 3);
        assert_eq!(device.options, "9600,N,8,1,RS,CS0,DS0,CD0");
    }

    #[test]
    fn test_com_prefix_claims_the_name() {
        // A COM prefix with no parsable port is a bad device name, not a file
        assert_eq!(
            parse_serial_name("COMMAND.TXT").unwrap(),
            Err(FileIoError::BadPortNumber("MAND.TXT".to_string()))
        );
        assert_eq!(
            parse_serial_name("COM").unwrap(),
            Err(FileIoError::BadPortNumber(String::new()))
        );
        assert_eq!(
            parse_serial_name("COM:9600").unwrap(),
            Err(FileIoError::BadPortNumber(String::new()))
        );
    }

    #[test]
    fn prop_com_port_numbers_round_trip() {
        fn property(port: u32) -> bool {
            match parse_serial_name(&format!("com{}", port)) {
                Some(Ok(device)) => {
                    device.port_number == port && device.port_name() == format!("COM{}", port)
                }
                _ => false,
            }
        }

        let mut qc = quickcheck::QuickCheck::new().tests(30);
        qc.quickcheck(property as fn(u32) -> bool);
    }

    #[test]
    fn prop_option_text_is_carried_verbatim() {
        fn property(port: u32, options: String) -> TestResult {
            if !options.is_ascii() {
                return TestResult::discard();
            }
            let name = format!("COM{}:{}", port, options);
            match parse_serial_name(&name) {
                Some(Ok(device)) => TestResult::from_bool(
                    device.port_number == port
                        && device.options == options.to_ascii_uppercase(),
                ),
                _ => TestResult::failed(),
            }
        }

        let mut qc = quickcheck::QuickCheck::new().tests(30);
        qc.quickcheck(property as fn(u32, String) -> TestResult);
    }
}
