use thiserror::Error;

/// Fatal frame-loop failure. The loop does not retry.
#[derive(Debug, Error)]
pub enum LoopError {
    #[error("frame update failed")]
    Update(#[source] anyhow::Error),

    #[error("frame draw failed")]
    Draw(#[source] anyhow::Error),
}
