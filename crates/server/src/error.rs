use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to fetch feed: {0}")]
    Network(#[from] reqwest::Error),
    #[error(transparent)]
    Data(#[from] waymark::Error),
    #[error("Failed to read feed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
