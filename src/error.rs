use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to retrieve the page. Status code: {0}")]
    Status(StatusCode),
    #[error("Malformed price text: {text:?}")]
    Price { text: String },
    #[error("Report rendering failed: {0}")]
    Template(#[from] handlebars::RenderError),
    #[error("Report write failed: {0}")]
    Io(#[from] std::io::Error),
}
