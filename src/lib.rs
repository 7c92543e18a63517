pub mod api;
pub mod error;
pub mod iced_ui;
pub mod logging;
pub mod notify;
pub mod status;
pub mod transcript;
pub mod ui;

pub use error::BenbotError;

pub type Result<T> = std::result::Result<T, BenbotError>;
