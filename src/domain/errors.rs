// ============================================================================
// Domain Errors
// ============================================================================
//
// A single validation error kind shared by every use case. Use cases return
// anyhow::Result so store failures propagate untouched; callers that need to
// tell a rule violation apart recover it with `downcast_ref::<AppError>()`.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct AppError {
    pub message: String,
}

impl AppError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Shorthand for `Err(AppError::new(..).into())` inside use cases
macro_rules! app_bail {
    ($($arg:tt)*) => {
        return Err(anyhow::Error::from($crate::domain::errors::AppError::new(format!($($arg)*))))
    };
}

pub(crate) use app_bail;

#[cfg(test)]
mod tests {
    use super::*;

    fn fails() -> anyhow::Result<()> {
        app_bail!("Could not find product {}", 42);
    }

    #[test]
    fn test_display_is_message() {
        let error = AppError::new("Could not find any customer with the given id");
        assert_eq!(error.to_string(), "Could not find any customer with the given id");
    }

    #[test]
    fn test_app_bail_downcasts() {
        let error = fails().unwrap_err();
        let app_error = error.downcast_ref::<AppError>().unwrap();
        assert_eq!(app_error.message, "Could not find product 42");
    }
}
