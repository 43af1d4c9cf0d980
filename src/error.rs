use thiserror::Error;

pub type Result<T> = std::result::Result<T, GredError>;

#[derive(Error, Debug)]
pub enum GredError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("git exited with an error: {0}")]
    Git(String),
    #[error("git produced non-UTF-8 output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("Parse error: {0}")]
    Parse(String),
}
