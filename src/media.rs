//! Received media and the process-local handle that keeps it playable

use std::io::Write;
use std::path::{Path, PathBuf};
use bytes::Bytes;
use log::{debug, error, trace};
use tempfile::NamedTempFile;

/// What the endpoint sent back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaResponse
{   /// Raw video bytes
    Bytes(Bytes)
  , /// Link to a playable resource
    Linked(String)
}

/// Cloneable reference to a playable video
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaRef
{   /// Local file holding the received bytes
    File
    {   path: PathBuf
      , len: usize
    }
  , /// Remote resource
    Url(String)
}

impl MediaRef
{   pub fn url(&self) -> Option<&str>
    {   match self
        {   MediaRef::Url(url) => Some(url)
          , MediaRef::File { .. } => None
        }
    }

    pub fn path(&self) -> Option<&Path>
    {   match self
        {   MediaRef::File { path, .. } => Some(path)
          , MediaRef::Url(_) => None
        }
    }
}

impl std::fmt::Display for MediaRef
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
      -> std::fmt::Result
    {   match self
        {   MediaRef::File { path, len } => {
              write!(f, "{} ({} bytes)", path.display(), len)
            }
          , MediaRef::Url(url) => f.write_str(url)
        }
    }
}

/// Single owner of a received video.
///
/// The temp file backing a `Local` handle is removed when the handle
/// is released or dropped.
#[derive(Debug)]
pub enum MediaHandle
{   Local
    {   file: NamedTempFile
      , len: usize
    }
  , Remote
    {   url: String
    }
}

impl MediaHandle
{   /// Turn a response into something playable. Bytes are written to a
    /// fresh `.mp4` temp file in `media_dir` (or the system temp dir).
    pub fn acquire(
      response: MediaResponse
    , media_dir: Option<&Path>
    ) -> Result<Self, crate::error::Error>
    {   match response
        {   MediaResponse::Bytes(data) => {
              let mut builder = tempfile::Builder::new();
              builder.prefix("reincarnate-").suffix(".mp4");
              let created = match media_dir
              {   Some(dir) => builder.tempfile_in(dir)
                , None => builder.tempfile()
              };
              let mut file = created.map_err(|e| {
                error!("Could not create media file: {}", e);
                crate::error::Error::MediaError(e.to_string())
              })?;
              file.write_all(&data)
                .and_then(|_| file.flush())
                .map_err(|e| {
                  error!("Could not write media file: {}", e);
                  crate::error::Error::MediaError(e.to_string())
                })?;
              debug!(
                "Stored {} bytes at {}"
              , data.len()
              , file.path().display()
              );
              Ok(MediaHandle::Local
              {   file
                , len: data.len()
              })
            }
          , MediaResponse::Linked(url) => {
              trace!("Linked media: {}", url);
              Ok(MediaHandle::Remote { url })
            }
        }
    }

    pub fn media_ref(&self) -> MediaRef
    {   match self
        {   MediaHandle::Local { file, len } => MediaRef::File
            {   path: file.path().to_path_buf()
              , len: *len
            }
          , MediaHandle::Remote { url } => MediaRef::Url(url.clone())
        }
    }

    /// Give the resource back now instead of at drop
    pub fn release(self) -> Result<(), crate::error::Error>
    {   match self
        {   MediaHandle::Local { file, .. } => {
              let path = file.path().to_path_buf();
              file.close().map_err(|e| {
                error!(
                  "Could not remove {}: {}"
                , path.display()
                , e
                );
                crate::error::Error::MediaError(e.to_string())
              })?;
              debug!("Released {}", path.display());
              Ok(())
            }
          , MediaHandle::Remote { url } => {
              debug!("Released link {}", url);
              Ok(())
            }
        }
    }
}
