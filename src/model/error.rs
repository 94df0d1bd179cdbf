use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum CsiLogError {
    InvalidArguments(String),
    DirectoryCreation(PathBuf, std::io::Error),
    FileOpen(PathBuf, std::io::Error),
    IoError(std::io::Error),
    CsvError(csv::Error),
}

impl fmt::Display for CsiLogError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CsiLogError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            CsiLogError::DirectoryCreation(path, err) => {
                write!(f, "Error creating CSI log directory {}: {}", path.display(), err)
            }
            CsiLogError::FileOpen(path, err) => {
                write!(f, "Error opening CSI log file {}: {}", path.display(), err)
            }
            CsiLogError::IoError(err) => write!(f, "I/O error: {}", err),
            CsiLogError::CsvError(err) => write!(f, "CSV error: {}", err),
        }
    }
}

impl std::error::Error for CsiLogError {}

impl From<std::io::Error> for CsiLogError {
    fn from(err: std::io::Error) -> Self {
        CsiLogError::IoError(err)
    }
}

impl From<csv::Error> for CsiLogError {
    fn from(err: csv::Error) -> Self {
        CsiLogError::CsvError(err)
    }
}
