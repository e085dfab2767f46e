// HTTP analysis adapter - Talks to the remote analysis service over multipart POST

mod contract;

pub use contract::ServiceContract;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::error::{ClientError, ClientResult};
use crate::ports::AnalysisPort;

/// Analysis service reached over HTTP
pub struct HttpAnalysisAdapter {
    client: Client,
    url: Url,
    contract: ServiceContract,
}

impl HttpAnalysisAdapter {
    /// Create a new adapter for the service rooted at `endpoint`
    pub fn new(endpoint: &Url, contract: ServiceContract) -> ClientResult<Self> {
        let client = Client::builder().build()?;
        Self::with_client(client, endpoint, contract)
    }

    /// Create an adapter around an existing client
    pub fn with_client(client: Client, endpoint: &Url, contract: ServiceContract) -> ClientResult<Self> {
        let url = contract
            .request_url(endpoint)
            .map_err(|e| ClientError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            url,
            contract,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn contract(&self) -> ServiceContract {
        self.contract
    }

    /// Multipart form with the video as a file part.
    ///
    /// The part shares the selected buffer. A declared type that is not a
    /// well-formed MIME string is dropped from the part rather than failing
    /// the submission.
    fn build_form(&self, media: &SelectedMedia) -> Form {
        let part = || {
            Part::stream_with_length(Body::from(media.binary().clone()), media.size() as u64)
                .file_name(media.display_name().to_string())
        };

        let part = match part().mime_str(media.declared_mime_type()) {
            Ok(part) => part,
            Err(e) => {
                warn!(
                    "Sending {} without a content type; '{}' is not a valid MIME type: {}",
                    media.display_name(),
                    media.declared_mime_type(),
                    e
                );
                part()
            }
        };

        Form::new().part(self.contract.field_name(), part)
    }
}

#[async_trait]
impl AnalysisPort for HttpAnalysisAdapter {
    async fn analyze(&self, media: &SelectedMedia) -> Result<Verdict, WorkflowError> {
        let form = self.build_form(media);

        info!(
            url = %self.url,
            field = self.contract.field_name(),
            bytes = media.size(),
            "Sending video for analysis"
        );

        let response = self
            .client
            .post(self.url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("Analysis request failed: {}", e);
                TransportError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Analysis service returned HTTP {}", status);
            return Err(TransportError::Status(status.as_u16()).into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        debug!("Received {} byte analysis response", body.len());

        self.contract.parse_verdict(&body).map_err(|e| {
            if let WorkflowError::Protocol { detail } = &e {
                warn!("Malformed analysis response: {}", detail);
            }
            e
        })
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.url, self.contract)
    }
}
