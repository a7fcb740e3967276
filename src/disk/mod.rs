//! Disk and directory statements
//!
//! FILES, KILL, NAME, CHDIR, MKDIR and RMDIR. Pattern expansion is
//! delegated to the glob collaborator; every statement reports failures on
//! the diagnostic channel and continues.

use std::env;
use std::fs;

/// FILES pattern: print every match, returning the list
pub fn files(pattern: &str) -> Vec<String> {
    let mut matches = Vec::new();
    let paths = match glob::glob(pattern) {
        Ok(paths) => paths,
        Err(e) => {
            log::warn!("FILES {}: {}", pattern, e);
            return matches;
        }
    };
    for entry in paths {
        match entry {
            Ok(path) => {
                let name = path.display().to_string();
                println!("{}", name);
                matches.push(name);
            }
            Err(e) => log::warn!("FILES {}: {}", pattern, e),
        }
    }
    matches
}

/// KILL pattern: delete every matching file
pub fn kill(pattern: &str) {
    let paths = match glob::glob(pattern) {
        Ok(paths) => paths,
        Err(e) => {
            log::warn!("KILL {}: {}", pattern, e);
            return;
        }
    };
    for entry in paths {
        match entry {
            Ok(path) => {
                if let Err(e) = fs::remove_file(&path) {
                    log::warn!("KILL '{}': {}: {}", pattern, path.display(), e);
                }
            }
            Err(e) => log::warn!("KILL {}: {}", pattern, e),
        }
    }
}

/// NAME from AS to: rename a file
pub fn name(from: &str, to: &str) {
    if let Err(e) = fs::rename(from, to) {
        log::warn!("NAME '{}' AS '{}': {}", from, to, e);
    }
}

/// CHDIR dir: change the working directory
pub fn chdir(dir: &str) {
    if let Err(e) = env::set_current_dir(dir) {
        log::warn!("CHDIR '{}': {}", dir, e);
    }
}

/// MKDIR dir
pub fn mkdir(dir: &str) {
    if let Err(e) = fs::create_dir(dir) {
        log::warn!("MKDIR '{}': {}", dir, e);
    }
}

/// RMDIR dir: remove an empty directory
pub fn rmdir(dir: &str) {
    if let Err(e) = fs::remove_dir(dir) {
        log::warn!("RMDIR '{}': {}", dir, e);
    }
}
