//! Request extractors that keep rejections on the API error contract.

use crate::error::ApiError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

/// Query string extractor rejecting with the `{error, code}` body.
///
/// Axum's own `Query` answers bad input with a plain-text 400; this wrapper
/// maps the rejection to [`ApiError::InvalidRequest`] so missing or
/// undecodable parameters share the JSON error shape of every other failure.
#[derive(Debug, Clone, Copy)]
pub struct Query<T>(pub T);

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Query::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::InvalidRequest(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LangQuery, SchemeQuery};
    use axum::http::Request;

    fn parts(uri: &str) -> Parts {
        Request::builder()
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn test_query_extracts_valid_parameters() {
        let mut parts =
            parts("/api/v1/scheme?concept_scheme_iri=https%3A%2F%2Fexample.org%2Fs&lang=de");

        let Query(query) = Query::<SchemeQuery>::from_request_parts(&mut parts, &())
            .await
            .expect("should extract");
        assert_eq!(query.concept_scheme_iri, "https://example.org/s");
        assert_eq!(query.lang, "de");
    }

    #[tokio::test]
    async fn test_query_applies_serde_defaults() {
        let mut parts = parts("/api/v1/schemes");

        let Query(query) = Query::<LangQuery>::from_request_parts(&mut parts, &())
            .await
            .expect("should extract");
        assert_eq!(query.lang, "en");
    }

    #[tokio::test]
    async fn test_query_missing_parameter_maps_to_invalid_request() {
        let mut parts = parts("/api/v1/scheme?lang=en");

        let result = Query::<SchemeQuery>::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }
}
