//! Request plumbing shared by the HTTP clients.

use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::clients::{ClientError, Operation};

/// Appends `segments` to the API base URL, percent-encoding each one.
pub(crate) fn endpoint(base: &Url, operation: Operation, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ClientError::failed(operation, format!("API base URL {base} cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Maps a finished request to the operation's result.
///
/// 404 becomes [`ClientError::NotFound`] for operations that distinguish it,
/// any other non-2xx status or a body that does not decode becomes
/// [`ClientError::OperationFailed`].
pub(crate) async fn parse_response<T: DeserializeOwned>(
    operation: Operation,
    response: reqwest::Result<Response>,
) -> Result<T, ClientError> {
    let response = response.map_err(|e| {
        warn!(?operation, error = %e, "Request failed");
        ClientError::failed(operation, e)
    })?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND && operation.not_found_message().is_some() {
        return Err(ClientError::not_found(operation));
    }
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        warn!(?operation, %status, %body, "Backend returned an error");
        return Err(ClientError::failed(operation, format!("status {status}: {body}")));
    }

    response.json::<T>().await.map_err(|e| {
        warn!(?operation, error = %e, "Response body did not decode");
        ClientError::failed(operation, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments_onto_base() {
        let base = Url::parse("http://localhost:8000").unwrap();

        let url = endpoint(&base, Operation::FetchProduct, &["api", "products", "4901681517305"]).unwrap();

        assert_eq!(url.as_str(), "http://localhost:8000/api/products/4901681517305");
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let base = Url::parse("http://pos.example.com/backend/").unwrap();

        let url = endpoint(&base, Operation::ListProducts, &["api", "products"]).unwrap();

        assert_eq!(url.as_str(), "http://pos.example.com/backend/api/products");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let base = Url::parse("http://localhost:8000").unwrap();

        let url = endpoint(&base, Operation::SearchProducts, &["api", "products", "search", "green tea/500ml"]).unwrap();

        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/products/search/green%20tea%2F500ml"
        );
    }
}
