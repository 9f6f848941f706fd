use std::fmt;

use crm_api::{RelatedList, Resource};
use reqwest::{Client, StatusCode, Url};

use crate::form::OptionSink;
use crate::render::render_options;

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} answered {status}")]
    Status { url: Url, status: StatusCode },
    #[error("malformed related list: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T, E = LoadError> = std::result::Result<T, E>;

/// Fetches related lists for a client and renders them into selection fields.
///
/// Loads are independent: nothing orders overlapping calls, so when two loads
/// target the same field the one completing last decides its content.
#[derive(Clone, Debug)]
pub struct RelatedListLoader {
    client: Client,
    base: Url,
}

impl RelatedListLoader {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        Ok(RelatedListLoader {
            client,
            base: Url::parse(base_url)?,
        })
    }

    pub fn url_for(&self, resource: Resource, client_id: impl fmt::Display) -> Result<Url> {
        Ok(self.base.join(&resource.path(client_id))?)
    }

    pub async fn fetch(
        &self,
        resource: Resource,
        client_id: impl fmt::Display,
    ) -> Result<RelatedList> {
        let url = self.url_for(resource, client_id)?;
        tracing::debug!(%url, "fetching related list");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status { url, status });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch the list and replace the options of `resource`'s field.
    ///
    /// On failure the field keeps whatever it held before.
    pub async fn load<S>(
        &self,
        resource: Resource,
        client_id: impl fmt::Display,
        sink: &S,
    ) -> Result<()>
    where
        S: OptionSink + ?Sized,
    {
        let client_id = client_id.to_string();
        match self.fetch(resource, &client_id).await {
            Ok(list) => {
                let count = list.data.len();
                tracing::debug!(%resource, %client_id, count, "rendering options");
                sink.replace_options(resource.target_field(), render_options(&list.data));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%resource, %client_id, error = %err, "related list not loaded");
                Err(err)
            }
        }
    }

    pub async fn get_contracts<S>(&self, client_id: impl fmt::Display, sink: &S) -> Result<()>
    where
        S: OptionSink + ?Sized,
    {
        self.load(Resource::Contracts, client_id, sink).await
    }

    pub async fn get_sales<S>(&self, client_id: impl fmt::Display, sink: &S) -> Result<()>
    where
        S: OptionSink + ?Sized,
    {
        self.load(Resource::Sales, client_id, sink).await
    }
}
