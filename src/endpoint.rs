use serde::Deserialize;
use log::{debug, trace, error, warn};

// ===== Message Types =====

#[derive(Debug, Clone, Deserialize)]
pub struct LinkedVideoResponse
{   pub url: String
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse
{   pub status: String
}

// ===== Generate Video Client =====

/// HTTP side of the form: one POST per submission, nothing else
#[derive(Debug, Clone)]
pub struct GenerateVideoClient
{   http_client: reqwest::Client
  , generate_url: reqwest::Url
  , health_url: reqwest::Url
  , contract: crate::ResponseContract
}

impl GenerateVideoClient
{   pub fn new(endpoint: &crate::EndpointConfig)
      -> Result<Self, crate::error::Error>
    {   debug!("Creating GenerateVideoClient for {}", endpoint.api_base);
        Ok(GenerateVideoClient
        {   http_client: reqwest::Client::new()
          , generate_url: endpoint.generate_url()?
          , health_url: endpoint.health_url()?
          , contract: endpoint.response_contract
        })
    }

    /// Send one generation request and decode the answer according
    /// to the configured contract
    pub async fn generate(
      &self
    , request: &crate::GenerationRequest
    ) -> Result<crate::MediaResponse, crate::error::Error>
    {   debug!(
          "Generating video for {} ({}, {})"
        , request.name
        , request.pose
        , request.ratio
        );
        trace!("Generate request: {:?}", request);

        let response = self.http_client
          .post(self.generate_url.clone())
          .json(request)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            crate::error::Error::HttpError(e.to_string())
          })?;

        let status = response.status();
        trace!("Generate response status: {}", status);

        if !status.is_success()
        {   let error_text = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            error!("Generate endpoint error {}: {}", status, error_text);
            return Err(crate::error::Error::ApiError(
              format!("{}: {}", status, error_text)
            ));
        }

        match self.contract
        {   crate::ResponseContract::Binary => {
              let body = response.bytes().await.map_err(|e| {
                error!("Failed to read video body: {}", e);
                crate::error::Error::HttpError(e.to_string())
              })?;
              if body.is_empty()
              {   error!("Endpoint returned an empty video");
                  return Err(crate::error::Error::ParseError(
                    "empty media body".to_string()
                  ));
              }
              debug!("Received {} video bytes", body.len());
              Ok(crate::MediaResponse::Bytes(body))
            }
          , crate::ResponseContract::Linked => {
              let linked: LinkedVideoResponse
                = response.json().await.map_err(|e| {
                  error!("Parse error: {}", e);
                  crate::error::Error::ParseError(e.to_string())
                })?;
              reqwest::Url::parse(&linked.url).map_err(|e| {
                error!("Endpoint returned a bad url {}: {}", linked.url, e);
                crate::error::Error::ParseError(
                  format!("invalid media url {}: {}", linked.url, e)
                )
              })?;
              debug!("Received video link {}", linked.url);
              Ok(crate::MediaResponse::Linked(linked.url))
            }
        }
    }

    /// Ask the backend whether it is up
    pub async fn health(&self) -> Result<bool, crate::error::Error>
    {   debug!("Checking health at {}", self.health_url);

        let response = self.http_client
          .get(self.health_url.clone())
          .send()
          .await
          .map_err(|e| {
            warn!("Health check failed: {}", e);
            crate::error::Error::HttpError(e.to_string())
          })?;

        let status = response.status();
        if !status.is_success()
        {   warn!("Health check returned {}", status);
            return Ok(false);
        }

        let health: HealthResponse
          = response.json().await.map_err(|e| {
            error!("Parse error: {}", e);
            crate::error::Error::ParseError(e.to_string())
          })?;

        trace!("Health status: {}", health.status);
        Ok(health.status == "alive")
    }
}
