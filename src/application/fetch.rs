// Per-endpoint classification of read results
use crate::infrastructure::api_client::ApiError;

/// Outcome of one dashboard read after the endpoint's own 404 policy.
#[derive(Debug)]
pub enum Fetch<T> {
    Found(T),
    Missing,
    Failed(ApiError),
}

impl<T> Fetch<T> {
    /// For endpoints where 404 means "no dataset yet".
    pub fn missing_on_404(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Fetch::Found(value),
            Err(err) if err.is_not_found() => Fetch::Missing,
            Err(err) => Fetch::Failed(err),
        }
    }

    /// For endpoints that have no "missing" state; every error is a failure.
    pub fn strict(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Fetch::Found(value),
            Err(err) => Fetch::Failed(err),
        }
    }

    /// `Ok(None)` for a missing resource.
    pub fn resolve(self) -> Result<Option<T>, ApiError> {
        match self {
            Fetch::Found(value) => Ok(Some(value)),
            Fetch::Missing => Ok(None),
            Fetch::Failed(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::api_client::{HttpError, TransportError};

    fn http(status: u16) -> ApiError {
        HttpError {
            status,
            detail: "x".to_string(),
        }
        .into()
    }

    #[test]
    fn test_missing_on_404() {
        assert!(matches!(Fetch::<u8>::missing_on_404(Err(http(404))), Fetch::Missing));
        assert!(matches!(Fetch::<u8>::missing_on_404(Err(http(500))), Fetch::Failed(_)));
        assert!(matches!(Fetch::missing_on_404(Ok(1u8)), Fetch::Found(1)));
        let network = ApiError::Network(TransportError("down".to_string()));
        assert!(matches!(Fetch::<u8>::missing_on_404(Err(network)), Fetch::Failed(_)));
    }

    #[test]
    fn test_strict_treats_404_as_failure() {
        assert!(matches!(Fetch::<u8>::strict(Err(http(404))), Fetch::Failed(_)));
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Fetch::Found(3u8).resolve().unwrap(), Some(3));
        assert_eq!(Fetch::<u8>::Missing.resolve().unwrap(), None);
        assert!(Fetch::<u8>::Failed(http(500)).resolve().is_err());
    }
}
