pub mod scanner;

pub use scanner::{read_lines_lossy, LogScanner, ScanError};
