use std::{
    pin::Pin,
    task::{Context, Poll},
};

use futures::Stream;

use crate::error::RemixError;

use super::Response;

/// A lazy, finite stream of response chunks.
///
/// Chunks arrive in response order and the stream cannot be restarted;
/// dropping it abandons the underlying request.
pub struct ResponseStream {
    receiver: tokio::sync::mpsc::Receiver<Result<Response, RemixError>>,
}

impl ResponseStream {
    /// Creates a new ResponseStream over the given channel.
    pub fn new(receiver: tokio::sync::mpsc::Receiver<Result<Response, RemixError>>) -> Self {
        Self { receiver }
    }
}

impl Stream for ResponseStream {
    type Item = Result<Response, RemixError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}
