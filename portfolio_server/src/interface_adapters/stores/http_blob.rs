use async_trait::async_trait;
use reqwest::header::{ETAG, IF_MATCH, IF_NONE_MATCH};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::domain::entities::BlobObject;
use crate::domain::errors::StoreError;
use crate::domain::ports::BlobStore;

// Blob store backed by a hosted blob HTTP API:
// `{api_url}/{site_id}/{store}/{key}` with a bearer token.
// Versions are the ETags the service returns.
#[derive(Clone)]
pub struct HttpBlobStore {
    http: Client,
    base: Url,
    token: String,
}

impl HttpBlobStore {
    pub fn new(
        http: Client,
        api_url: &str,
        site_id: &str,
        store_name: &str,
        token: impl Into<String>,
    ) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(api_url)?;
        base.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(site_id)
            .push(store_name);
        Ok(Self {
            http,
            base,
            token: token.into(),
        })
    }

    fn url_for(&self, key: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(key);
        }
        url
    }
}

fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Unavailable(format!("blob transport error: {err}"))
}

fn etag_of(response: &reqwest::Response) -> Result<String, StoreError> {
    response
        .headers()
        .get(ETAG)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| StoreError::Unavailable("blob response carried no ETag".to_string()))
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn get(&self, key: &str) -> Result<Option<BlobObject>, StoreError> {
        let res = self
            .http
            .get(self.url_for(key))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(transport)?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(StoreError::Unavailable(format!(
                "blob read failed with status {status}"
            )));
        }

        let version = etag_of(&res)?;
        let data = res.bytes().await.map_err(transport)?.to_vec();
        Ok(Some(BlobObject { data, version }))
    }

    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        expected_version: Option<&str>,
    ) -> Result<String, StoreError> {
        let request = self
            .http
            .put(self.url_for(key))
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(data);
        let request = match expected_version {
            Some(version) => request.header(IF_MATCH, version),
            None => request.header(IF_NONE_MATCH, "*"),
        };

        let res = request.send().await.map_err(transport)?;
        let status = res.status();
        if status == StatusCode::PRECONDITION_FAILED {
            return Err(StoreError::Conflict);
        }
        if !status.is_success() {
            return Err(StoreError::Unavailable(format!(
                "blob write failed with status {status}"
            )));
        }

        etag_of(&res)
    }
}
