// One error type for the whole tool.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed (no display, headless...)
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Pushing the chart buffer to the window failed
    #[error("Export error: {0}")]
    Export(#[from] image::ImageError), // Encoding or writing the PNG failed
    #[error("Fit error: {0}")]
    Fit(String), // Exponent fit got nothing usable
    #[error("Chart has no points to scale its axes to")]
    EmptyChart,
}
