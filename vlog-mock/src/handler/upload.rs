//! Receive loop for the `UploadLogMessages` client stream.
//!
//! The stream is driven through an explicit state machine:
//!
//! ```text
//! Receiving --message--> Receiving
//! Receiving --end------> Completed(EndOfStream)
//! Receiving --error----> Completed(ReadFailed)
//! ```
//!
//! Only the `(vin, api)` of the most recent message is remembered; payloads
//! are dropped as soon as they are read.

use futures::{Stream, StreamExt};
use tonic::Status;

use crate::proto::UploadLogMessagesRequest;

/// How an upload stream finished.
#[derive(Debug)]
pub enum UploadCompletion {
    /// The client closed the stream. `vin` and `api` come from the last
    /// message, or are empty if none was sent.
    EndOfStream {
        vin: String,
        api: String,
        received: u32,
    },
    /// Reading the next message failed. The stream is not polled again.
    ReadFailed(Status),
}

#[derive(Debug)]
enum UploadState {
    Receiving(Receiving),
    Completed(UploadCompletion),
}

#[derive(Debug, Default)]
struct Receiving {
    last: Option<(String, String)>,
    received: u32,
}

impl Receiving {
    fn step(self, next: Option<Result<UploadLogMessagesRequest, Status>>) -> UploadState {
        match next {
            Some(Ok(msg)) => UploadState::Receiving(Receiving {
                last: Some((msg.vin, msg.api)),
                received: self.received.saturating_add(1),
            }),
            Some(Err(status)) => UploadState::Completed(UploadCompletion::ReadFailed(status)),
            None => {
                let (vin, api) = self.last.unwrap_or_default();
                UploadState::Completed(UploadCompletion::EndOfStream {
                    vin,
                    api,
                    received: self.received,
                })
            }
        }
    }
}

/// Read `stream` until it ends or fails.
pub async fn drain<S>(mut stream: S) -> UploadCompletion
where
    S: Stream<Item = Result<UploadLogMessagesRequest, Status>> + Unpin,
{
    let mut state = UploadState::Receiving(Receiving::default());
    loop {
        state = match state {
            UploadState::Receiving(receiving) => receiving.step(stream.next().await),
            UploadState::Completed(completion) => return completion,
        };
    }
}
