#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("no sample has been set")]
    NoSample,
    #[error("row {row} is out of bounds for a sample of height {height}")]
    Index { row: usize, height: usize },
    #[error("parameter `{name}` must be finite and strictly positive, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("failed to load the image")]
    Image(#[from] image::ImageError),
    #[error("I/O error")]
    Io(#[from] std::io::Error),
    #[error("failed to write the CSV profile")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
