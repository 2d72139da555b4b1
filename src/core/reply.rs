//! Reply channel
//!
//! Some sequences (color queries) answer back to the remote side. Replies
//! go through a [`ReplySink`]; writing them to the pty is up to the owner.

/// Receives bytes destined for the pty
pub trait ReplySink {
    fn emit_reply(&mut self, bytes: &[u8]);
}

/// Queues replies until the owner drains them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingReplies {
    replies: Vec<Vec<u8>>,
}

impl PendingReplies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }

    /// Queued replies, oldest first
    pub fn pending(&self) -> &[Vec<u8>] {
        &self.replies
    }

    /// Take all queued replies
    pub fn take(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.replies)
    }
}

impl ReplySink for PendingReplies {
    fn emit_reply(&mut self, bytes: &[u8]) {
        self.replies.push(bytes.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_replies() {
        let mut replies = PendingReplies::new();
        assert!(replies.is_empty());

        replies.emit_reply(b"\x1b]10;rgb:0000/0000/0000\x07");
        replies.emit_reply(b"second");
        assert_eq!(replies.pending().len(), 2);

        let taken = replies.take();
        assert_eq!(taken[1], b"second");
        assert!(replies.is_empty());
    }
}
