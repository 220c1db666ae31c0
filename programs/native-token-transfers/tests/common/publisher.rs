use native_token_transfers::transceivers::wormhole::{PublishError, WormholePublisher};

/// A core bridge that keeps whatever is posted to it.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    pub posted: Vec<PostedPayload>,
    /// When set, every post fails.
    pub unavailable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedPayload {
    pub payload: Vec<u8>,
    pub should_skip_relayer_send: bool,
}

impl RecordingPublisher {
    pub fn last(&self) -> &PostedPayload {
        self.posted.last().expect("nothing was posted")
    }
}

impl WormholePublisher for RecordingPublisher {
    fn post_message(
        &mut self,
        payload: Vec<u8>,
        should_skip_relayer_send: bool,
    ) -> Result<u64, PublishError> {
        if self.unavailable {
            return Err(PublishError("bridge unavailable".to_string()));
        }
        let sequence = self.posted.len() as u64;
        self.posted.push(PostedPayload {
            payload,
            should_skip_relayer_send,
        });
        Ok(sequence)
    }
}
