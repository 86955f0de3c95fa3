pub mod error;
pub mod config;
pub mod request;
pub mod media;
pub mod endpoint;
pub mod client;
pub mod render;
use serde::{Deserialize, Serialize};

pub use client::FormController;
pub use config::{EndpointConfig, ReincarnateConfig, ResponseContract};
pub use error::Error;
pub use media::{MediaHandle, MediaRef, MediaResponse};
pub use render::{render, submit_label, View};
pub use request::{
  validate, Field, FormFields, GenerationRequest, ValidationErrors
};

/*

reincarnate is an async-only client for a "generate video" endpoint:
fill in who to bring back, what they should say, a pose and a format,
submit, and get a playable video back.

reincarnate/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports and the controller interface
│   ├── main.rs         # Terminal form
│   ├── error.rs        # Error taxonomy
│   ├── config.rs       # Endpoint and media configuration
│   ├── request.rs      # Form fields and validation
│   ├── media.rs        # Received media and its local handle
│   ├── endpoint.rs     # HTTP collaborator
│   ├── client.rs       # Form controller (owns the event loop)
│   └── render.rs       # Snapshot -> view
└── tests/

*/

/// CONTROLLER API INTERFACE:

// ===== Submit =====

pub type SubmitReply = Result<crate::MediaRef, crate::error::Error>;
pub type SubmitReplySender
  = tokio::sync::mpsc::UnboundedSender<SubmitReply>;

pub struct SubmitArgs
{   pub fields: crate::FormFields
  , pub reply: SubmitReplySender
}

// ===== Snapshot =====

pub type SnapshotReply = crate::client::FormSnapshot;
pub type SnapshotReplySender
  = tokio::sync::mpsc::UnboundedSender<SnapshotReply>;

pub struct SnapshotArgs
{   pub reply: SnapshotReplySender
}

// ===== KillProcess =====

pub type KillProcessReply = Result<(), crate::error::Error>;
pub type KillProcessReplySender
  = tokio::sync::mpsc::UnboundedSender<KillProcessReply>;

pub struct KillProcessArgs
{   pub reply: KillProcessReplySender
}

// ===== FormHand (sender side) =====

pub struct FormHand
{   pub submit_tx
      : tokio::sync::mpsc::UnboundedSender<SubmitArgs>
  , pub snapshot_tx
      : tokio::sync::mpsc::UnboundedSender<SnapshotArgs>
  , pub kill_process_tx
      : tokio::sync::mpsc::UnboundedSender<KillProcessArgs>
}

// ===== FormFoot (receiver side) =====

pub struct FormFoot
{   pub submit_rx
      : tokio::sync::mpsc::UnboundedReceiver<SubmitArgs>
  , pub snapshot_rx
      : tokio::sync::mpsc::UnboundedReceiver<SnapshotArgs>
  , pub kill_process_rx
      : tokio::sync::mpsc::UnboundedReceiver<KillProcessArgs>
}

/// FORM CHOICES:

/// Body position of the generated subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pose
{   Seating
  , Standing
}

impl Pose
{   pub const ALL: [Pose; 2] = [Pose::Seating, Pose::Standing];

    pub fn as_str(&self) -> &'static str
    {   match self
        {   Pose::Seating => "seating"
          , Pose::Standing => "standing"
        }
    }
}

impl std::fmt::Display for Pose
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
      -> std::fmt::Result
    {   f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Pose
{   type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   let wanted = s.trim().to_ascii_lowercase();
        Pose::ALL.into_iter()
          .find(|p| p.as_str() == wanted)
          .ok_or_else(|| crate::error::Error::ParseError(
            format!("unknown pose: {}", s)
          ))
    }
}

/// Aspect ratio of the generated video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Ratio
{   /// 16:9
    #[serde(rename = "16:9")]
    Landscape
  , /// 9:16
    #[serde(rename = "9:16")]
    Portrait
}

impl Ratio
{   pub const ALL: [Ratio; 2] = [Ratio::Landscape, Ratio::Portrait];

    pub fn as_str(&self) -> &'static str
    {   match self
        {   Ratio::Landscape => "16:9"
          , Ratio::Portrait => "9:16"
        }
    }
}

impl std::fmt::Display for Ratio
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
      -> std::fmt::Result
    {   f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Ratio
{   type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   let wanted = s.trim();
        Ratio::ALL.into_iter()
          .find(|r| r.as_str() == wanted)
          .ok_or_else(|| crate::error::Error::ParseError(
            format!("unknown ratio: {}", s)
          ))
    }
}
