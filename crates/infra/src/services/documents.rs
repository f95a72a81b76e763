use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum FetchDocumentError {
    #[error("Unable to get the document: {0}")]
    Fetch(reqwest::Error),
    #[error("Unable to read the document body: {0}")]
    Read(reqwest::Error),
}

/// Downloads a document that an admin linked to, e.g. a music month file
/// uploaded as a chat attachment
pub async fn fetch_document(url: &str) -> Result<Vec<u8>, FetchDocumentError> {
    let res = reqwest::get(url)
        .await
        .and_then(|res| res.error_for_status())
        .map_err(|e| {
            warn!("Unable to fetch document from: {}. Error: {:?}", url, e);
            FetchDocumentError::Fetch(e)
        })?;

    let bytes = res.bytes().await.map_err(|e| {
        warn!("Unable to read document from: {}. Error: {:?}", url, e);
        FetchDocumentError::Read(e)
    })?;

    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetches_document_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/month.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"days":[]}"#))
            .mount(&server)
            .await;

        let bytes = fetch_document(&format!("{}/month.json", server.uri()))
            .await
            .unwrap();
        assert_eq!(bytes, br#"{"days":[]}"#.to_vec());
    }

    #[tokio::test]
    async fn missing_document_is_a_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let res = fetch_document(&format!("{}/month.json", server.uri())).await;
        assert!(matches!(res, Err(FetchDocumentError::Fetch(_))));
    }
}
