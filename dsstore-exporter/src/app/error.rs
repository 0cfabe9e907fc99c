/*!
Errors that can happen during the application's runtime
*/

use std::{
    fmt::{Display, Formatter, Result},
    io::Error as IoError,
    path::PathBuf,
};

use dsstore_database::error::store::StoreError;

/// Errors that can happen during the application's runtime
#[derive(Debug)]
pub enum RuntimeError {
    InvalidOptions(String),
    CannotRead(IoError, PathBuf),
    DecodeError(StoreError),
    DiskError(IoError),
}

impl Display for RuntimeError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            RuntimeError::InvalidOptions(why) => write!(fmt, "Invalid options!\n{why}"),
            RuntimeError::CannotRead(why, path) => write!(fmt, "{why}: {path:?}"),
            RuntimeError::DecodeError(why) => write!(fmt, "Unable to decode file: {why}"),
            RuntimeError::DiskError(why) => write!(fmt, "{why}"),
        }
    }
}
