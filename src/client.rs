use std::path::PathBuf;
use tokio::sync::mpsc;
use log::{debug, trace, error, info, warn};
use crate::FormFoot;

/// Notice shown after a failed generation
pub const GENERIC_FAILURE: &str = "Video generation failed";

/// Read-only copy of the form state, for rendering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot
{   pub fields: crate::FormFields
  , pub validation_errors: crate::ValidationErrors
  , pub is_submitting: bool
  , pub result: Option<crate::MediaRef>
  , pub failure: Option<String>
}

impl FormSnapshot
{   /// The submit control is disabled while a request is in flight
    pub fn submit_enabled(&self) -> bool
    {   !self.is_submitting
    }
}

/// Outcome of a spawned generation request, routed back to the loop
struct Completion
{   outcome: Result<crate::MediaHandle, crate::error::Error>
  , reply: crate::SubmitReplySender
}

/// Form state machine, owned by the event loop
pub struct FormState
{   pub fields: crate::FormFields
  , pub validation_errors: crate::ValidationErrors
  , pub is_submitting: bool
  , pub result: Option<crate::MediaHandle>
  , pub failure: Option<String>
  , endpoint: crate::endpoint::GenerateVideoClient
  , media_dir: Option<PathBuf>
}

impl FormState
{   pub fn new(
      config: &crate::ReincarnateConfig
    ) -> Result<Self, crate::error::Error>
    {   debug!("Initializing FormState");
        let endpoint = crate::endpoint::GenerateVideoClient::new(
          &config.endpoint
        )?;
        Ok(FormState
        {   fields: crate::FormFields::default()
          , validation_errors: crate::ValidationErrors::new()
          , is_submitting: false
          , result: None
          , failure: None
          , endpoint
          , media_dir: config.media_dir.clone()
        })
    }

    pub fn snapshot(&self) -> FormSnapshot
    {   FormSnapshot
        {   fields: self.fields.clone()
          , validation_errors: self.validation_errors.clone()
          , is_submitting: self.is_submitting
          , result: self.result.as_ref().map(|h| h.media_ref())
          , failure: self.failure.clone()
        }
    }

    fn handle_submit(
      &mut self
    , cmd: crate::SubmitArgs
    , completion_tx: &mpsc::UnboundedSender<Completion>
    )
    {   if self.is_submitting
        {   debug!("Submit ignored, a request is in flight");
            let _ = cmd.reply.send(
              Err(crate::error::Error::SubmitInFlight)
            );
            return;
        }

        self.fields = cmd.fields;
        let request = match crate::validate(&self.fields)
        {   Ok(request) => request
          , Err(errors) => {
              self.validation_errors = errors.clone();
              let _ = cmd.reply.send(
                Err(crate::error::Error::Validation(errors))
              );
              return;
            }
        };

        self.validation_errors = crate::ValidationErrors::new();
        self.failure = None;
        self.is_submitting = true;

        let endpoint = self.endpoint.clone();
        let media_dir = self.media_dir.clone();
        let completion_tx = completion_tx.clone();
        let reply = cmd.reply;
        tokio::spawn(async move {
          let outcome = endpoint.generate(&request).await
            .and_then(|response| {
              crate::MediaHandle::acquire(
                response
              , media_dir.as_deref()
              )
            });
          if completion_tx.send(Completion { outcome, reply }).is_err()
          {   debug!("Form closed before generation finished");
          }
        });
    }

    fn handle_completion(&mut self, done: Completion)
    {   self.is_submitting = false;
        match done.outcome
        {   Ok(handle) => {
              let media = handle.media_ref();
              info!("Video ready: {}", media);
              if let Some(previous) = self.result.replace(handle)
              {   if let Err(e) = previous.release()
                  {   warn!("Previous video not released: {}", e);
                  }
              }
              let _ = done.reply.send(Ok(media));
            }
          , Err(e) => {
              error!("Error submitting form: {}", e);
              self.failure = Some(GENERIC_FAILURE.to_string());
              let _ = done.reply.send(Err(e));
            }
        }
    }

    fn teardown(&mut self) -> Result<(), crate::error::Error>
    {   match self.result.take()
        {   Some(handle) => {
              trace!("Releasing current video");
              handle.release()
            }
          , None => Ok(())
        }
    }
}

/// Public API for the generation form - owns the task
pub struct FormController
{   hand: crate::FormHand
  , _task_handle: tokio::task::JoinHandle<()>
}

impl FormController
{   /// Create and spawn a new form controller.
    /// Must be called from within a tokio runtime.
    pub fn new(
      config: crate::ReincarnateConfig
    ) -> Result<Self, crate::error::Error>
    {   debug!("Creating FormController with task ownership");
        config.validate()?;
        let state = FormState::new(&config)?;

        let (submit_tx, submit_rx)
          = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx)
          = mpsc::unbounded_channel();
        let (kill_process_tx, kill_process_rx)
          = mpsc::unbounded_channel();

        let hand = crate::FormHand
        {   submit_tx
          , snapshot_tx
          , kill_process_tx
        };

        let foot = crate::FormFoot
        {   submit_rx
          , snapshot_rx
          , kill_process_rx
        };

        let _task_handle = tokio::spawn(async move {
          run_form_loop(foot, state).await
        });

        Ok(FormController
        {   hand
          , _task_handle
        })
    }

    /// Submit the form - returns almost immediately
    pub async fn submit(
      &self
    , fields: crate::FormFields
    ) -> Result<
        mpsc::UnboundedReceiver<crate::SubmitReply>,
        crate::error::Error
      >
    {   debug!("submit queuing form for: {}", fields.name);
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::SubmitArgs
        {   fields
          , reply: reply_tx
        };

        self.hand.submit_tx
          .send(cmd)
          .map_err(|_| {
            error!("Form channel closed");
            crate::error::Error::Other(
              "Form disconnected".to_string()
            )
          })?;

        Ok(reply_rx)
    }

    /// Submit the form and wait for the outcome
    pub async fn submit_and_wait(
      &self
    , fields: crate::FormFields
    ) -> crate::SubmitReply
    {   let mut reply_rx = self.submit(fields).await?;
        reply_rx.recv().await
          .unwrap_or_else(|| {
            error!("Form dropped the submit reply");
            Err(crate::error::Error::Other(
              "Form disconnected".to_string()
            ))
          })
    }

    /// Current state of the form
    pub async fn snapshot(&self)
      -> Result<crate::SnapshotReply, crate::error::Error>
    {   trace!("snapshot queuing command");
        let (reply_tx, mut reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::SnapshotArgs
        {   reply: reply_tx
        };

        self.hand.snapshot_tx
          .send(cmd)
          .map_err(|_| {
            error!("Form channel closed");
            crate::error::Error::Other(
              "Form disconnected".to_string()
            )
          })?;

        reply_rx.recv().await
          .ok_or_else(|| {
            crate::error::Error::Other(
              "Form disconnected".to_string()
            )
          })
    }

    /// Release the current video and stop the form
    pub async fn shutdown(self)
      -> Result<(), crate::error::Error>
    {   debug!("Shutting down FormController");
        let (reply_tx, mut reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::KillProcessArgs
        {   reply: reply_tx
        };

        self.hand.kill_process_tx
          .send(cmd)
          .map_err(|_| {
            error!("Form channel already closed");
            crate::error::Error::Other(
              "Form already shutdown".to_string()
            )
          })?;

        if let Some(result) = reply_rx.recv().await
        {   debug!("Form shutdown confirmed");
            result
        } else
        {   error!("Form loop ended without confirming shutdown");
            Err(crate::error::Error::Other(
              "Form disconnected".to_string()
            ))
        }
    }
}

/// Main form event loop
///
/// Design: network work never runs inside a select arm.
/// Accepted submissions are spawned and report back on the
/// completion channel.
async fn run_form_loop(
  foot: crate::FormFoot
, mut state: FormState
)
{   debug!("Starting form event loop");
    let (completion_tx, mut completion_rx)
      = mpsc::unbounded_channel::<Completion>();
    let FormFoot
    {   mut submit_rx
      , mut snapshot_rx
      , mut kill_process_rx
    } = foot;

    loop
    { tokio::select!
      { cmd = submit_rx.recv() => {
          match cmd
          {   Some(cmd) => {
                debug!("Received Submit");
                state.handle_submit(cmd, &completion_tx);
              }
            , None => {
                debug!("Form handle dropped");
                break;
              }
          }
        }
      , Some(done) = completion_rx.recv() => {
          debug!("Received Completion");
          state.handle_completion(done);
        }
      , Some(cmd) = snapshot_rx.recv() => {
          trace!("Received Snapshot");
          let _ = cmd.reply.send(state.snapshot());
        }
      , Some(cmd) = kill_process_rx.recv() => {
          debug!("Received KillProcess");
          let result = state.teardown();
          let _ = cmd.reply.send(result);
          info!("Form shutting down");
          return;
        }
      }
    }

    if let Err(e) = state.teardown()
    {   warn!("Teardown after handle drop failed: {}", e);
    }
}
