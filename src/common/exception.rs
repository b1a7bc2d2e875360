use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HashTableError {
    #[error("Invalid capacity {0}: a table needs at least one bucket")]
    InvalidCapacity(usize),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Table error: {0}")]
    Table(#[from] HashTableError),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}
