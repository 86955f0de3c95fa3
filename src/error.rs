use std::fmt;

/// Custom error type for reincarnate operations
/// Implements Clone for sending through channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// One or more form fields failed validation
    Validation(crate::request::ValidationErrors)
  , /// A submission is already in flight
    SubmitInFlight
  , /// HTTP request error (connection, DNS, body read)
    HttpError(String)
  , /// Endpoint answered with a non-success status
    ApiError(String)
  , /// Response body did not match the configured contract
    ParseError(String)
  , /// Failed to materialise received media locally
    MediaError(String)
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// Generic error
    Other(String)
}

impl Error
{   /// True for failures that happened after the request left
    /// the controller (network, status, body, local media)
    pub fn is_transport(&self) -> bool
    {   matches!(
          self
        , Error::HttpError(_)
          | Error::ApiError(_)
          | Error::ParseError(_)
          | Error::MediaError(_)
        )
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::Validation(errors) => {
              write!(f, "Validation failed: {}", errors)
            }
          , Error::SubmitInFlight => {
              write!(f, "A generation request is already running")
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::ApiError(msg) => {
              write!(f, "API error: {}", msg)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::MediaError(msg) => {
              write!(f, "Media error: {}", msg)
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}
