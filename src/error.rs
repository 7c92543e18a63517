use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenbotError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("runtime error: {0}")]
    Runtime(String),
}

pub use crate::Result;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_error_display() {
        let err = BenbotError::Config("x".to_string());
        assert!(format!("{err}").contains("configuration error"));
        let err = BenbotError::Runtime("boom".to_string());
        assert!(format!("{err}").contains("boom"));
    }
}
