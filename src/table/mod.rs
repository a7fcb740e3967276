//! Handle table for BASIC file statements
//!
//! Maps caller-chosen handle numbers to open endpoints and owns their whole
//! lifecycle: at most one live handle exists per number, the EOF flag is
//! latched through `set_eof` only, and closing flushes before the entry is
//! removed. The table is an explicit context value owned by the caller's
//! session; access is single-threaded by contract.

use std::collections::HashMap;

use crate::backend::Backend;
use crate::error::{FileIoError, Result};

/// One open endpoint with its latched EOF flag
#[derive(Debug)]
pub struct Handle {
    number: i32,
    backend: Backend,
    eof: bool,
}

impl Handle {
    /// Caller-chosen handle number
    pub fn number(&self) -> i32 {
        self.number
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut Backend {
        &mut self.backend
    }

    pub fn is_serial(&self) -> bool {
        self.backend.is_serial()
    }

    /// Latched end-of-stream flag; true stays true until close
    pub fn eof(&self) -> bool {
        self.eof
    }
}

/// Table of open handles, the sole owner of every `Handle`
#[derive(Debug, Default)]
pub struct HandleTable {
    handles: HashMap<i32, Handle>,
}

impl HandleTable {
    /// Create an empty handle table
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }

    pub fn is_open(&self, number: i32) -> bool {
        self.handles.contains_key(&number)
    }

    pub fn open_count(&self) -> usize {
        self.handles.len()
    }

    /// Insert a freshly resolved backend under `number`.
    ///
    /// Fails with `AlreadyOpen` without touching the existing handle.
    pub fn open(&mut self, number: i32, backend: Backend) -> Result<()> {
        if self.handles.contains_key(&number) {
            return Err(FileIoError::AlreadyOpen(number));
        }
        self.handles.insert(
            number,
            Handle {
                number,
                backend,
                eof: false,
            },
        );
        Ok(())
    }

    pub fn get(&self, number: i32) -> Result<&Handle> {
        self.handles.get(&number).ok_or(FileIoError::NotOpen(number))
    }

    pub fn get_mut(&mut self, number: i32) -> Result<&mut Handle> {
        self.handles
            .get_mut(&number)
            .ok_or(FileIoError::NotOpen(number))
    }

    /// Latch the EOF flag on `number`. Idempotent.
    pub fn set_eof(&mut self, number: i32) -> Result<()> {
        let handle = self
            .handles
            .get_mut(&number)
            .ok_or(FileIoError::NotOpen(number))?;
        handle.eof = true;
        Ok(())
    }

    /// Flush pending output, release the backend, remove the entry
    pub fn close(&mut self, number: i32) -> Result<()> {
        let handle = self
            .handles
            .remove(&number)
            .ok_or(FileIoError::NotOpen(number))?;
        handle
            .backend
            .close()
            .map_err(|e| FileIoError::Transport(format!("close #{}: {}", number, e)))
    }

    /// Close every open handle, order unspecified.
    ///
    /// Individual close failures are collected, never raised; the table is
    /// empty afterwards either way.
    pub fn close_all(&mut self) -> Vec<FileIoError> {
        let numbers: Vec<i32> = self.handles.keys().copied().collect();
        let mut failures = Vec::new();
        for number in numbers {
            if let Err(e) = self.close(number) {
                failures.push(e);
            }
        }
        failures
    }
}
