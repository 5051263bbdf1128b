use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("VCF file size must be less than 5MB: {path} is {size} bytes")]
    FileTooLarge { path: String, size: u64 },

    #[error("Input is not valid UTF-8 text: {0}")]
    Encoding(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
