use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("pdf error: {0}")]
    Pdf(#[from] printpdf::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
