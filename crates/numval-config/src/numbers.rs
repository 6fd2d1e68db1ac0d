use crate::{ConfigError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const MAX_NUMBERS_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Reads a newline-delimited list of candidate numbers.
///
/// Lines are returned untouched apart from the line terminator; filtering is
/// left to the normalizer.
pub fn read_numbers_file(path: &Path) -> Result<Vec<String>> {
    read_numbers_file_with_limit(path, MAX_NUMBERS_FILE_BYTES)
}

pub fn read_numbers_file_with_limit(path: &Path, limit: u64) -> Result<Vec<String>> {
    let read_err = |source: std::io::Error| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    };
    let too_large = || ConfigError::NumbersFileTooLarge {
        path: path.to_path_buf(),
        limit,
    };

    if !path.exists() {
        return Err(ConfigError::MissingNumbersFile(path.to_path_buf()));
    }

    let file = File::open(path).map_err(read_err)?;
    let len = file.metadata().map_err(read_err)?.len();
    if len > limit {
        return Err(too_large());
    }

    // The file can grow between the metadata check and the read.
    let mut contents = String::new();
    file.take(limit.saturating_add(1))
        .read_to_string(&mut contents)
        .map_err(read_err)?;
    if contents.len() as u64 > limit {
        return Err(too_large());
    }

    Ok(contents.lines().map(str::to_string).collect())
}
