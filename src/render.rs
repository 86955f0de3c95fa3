//! Pure mapping from form state to what the user sees

use std::fmt;

pub const NO_VIDEO: &str = "No video available";

/// Result pane of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View
{   /// Request in flight
    Progress
  , /// A video is available
    Player
    {   media: crate::MediaRef
      , notice: Option<String>
    }
  , /// Nothing to show yet
    Placeholder
    {   notice: Option<String>
    }
}

pub fn render(snapshot: &crate::client::FormSnapshot) -> View
{   if snapshot.is_submitting
    {   return View::Progress;
    }
    match &snapshot.result
    {   Some(media) => View::Player
        {   media: media.clone()
          , notice: snapshot.failure.clone()
        }
      , None => View::Placeholder
        {   notice: snapshot.failure.clone()
        }
    }
}

/// Label of the submit control
pub fn submit_label(snapshot: &crate::client::FormSnapshot)
  -> &'static str
{   if snapshot.is_submitting
    {   "Generating..."
    } else
    {   "Generate"
    }
}

impl fmt::Display for View
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   match self
        {   View::Progress => f.write_str("Generating...")
          , View::Player { media, notice } => {
              if let Some(notice) = notice
              {   writeln!(f, "{}", notice)?;
              }
              match media
              {   crate::MediaRef::File { path, len } => write!(
                    f
                  , "Video saved to {} ({} bytes)"
                  , path.display()
                  , len
                  )
                , crate::MediaRef::Url(url) => {
                    write!(f, "Video available at {}", url)
                  }
              }
            }
          , View::Placeholder { notice } => {
              if let Some(notice) = notice
              {   writeln!(f, "{}", notice)?;
              }
              f.write_str(NO_VIDEO)
            }
        }
    }
}
