// Every variant states *where* things went wrong.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The image path '{}' does not exist.", .0.display())]
    PathNotFound(PathBuf),
    #[error("Could not load the image. Ensure the file is a valid image format.")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Invalid method '{0}'. Choose 'telea' or 'ns'.")]
    InvalidMethod(String),
    #[error("Inpainting failed: {0}")]
    Inpaint(String),
    #[error("Window init error: {0}")]
    WindowInit(String),
    #[error("Window update error: {0}")]
    WindowUpdate(String),
    #[error("The interactive session has already ended.")]
    SessionEnded,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_reference_wording() {
        let decode = Error::ImageDecode {
            path: PathBuf::from("data/example.png"),
            source: image::ImageError::IoError(std::io::Error::other("boom")),
        };
        assert_eq!(
            decode.to_string(),
            "Could not load the image. Ensure the file is a valid image format."
        );
        assert_eq!(
            Error::PathNotFound(PathBuf::from("data/example.png")).to_string(),
            "The image path 'data/example.png' does not exist."
        );
        assert_eq!(
            Error::InvalidMethod("blur".into()).to_string(),
            "Invalid method 'blur'. Choose 'telea' or 'ns'."
        );
    }
}
