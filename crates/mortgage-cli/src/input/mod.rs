pub mod file;
pub mod record;
pub mod stdin;

/// `--input` value that reads from stdin instead of a file.
pub const STDIN_PATH: &str = "-";
