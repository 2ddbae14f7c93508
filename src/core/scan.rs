//! Scanner adapter: the first decoded text of an activation becomes the
//! job code, then the scanner is stopped.

use crate::errors::{AppError, AppResult};
use tokio::io::{AsyncBufRead, Lines};
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeEvent {
    Decoded(String),
    /// A frame that could not be decoded. Not fatal, scanning continues.
    Failed(String),
}

/// Anything that produces decode events: a camera reader, a keyboard-wedge
/// barcode reader, a test script.
#[allow(async_fn_in_trait)]
pub trait CodeScanner {
    /// Next event, or `Ok(None)` once the source has closed.
    async fn next_event(&mut self) -> AppResult<Option<DecodeEvent>>;

    /// Must be safe to call more than once.
    async fn stop(&mut self) -> AppResult<()>;
}

/// Receiving end of a one-shot decode. Consumed by the first delivery.
pub struct DecodeSink(oneshot::Sender<String>);

impl DecodeSink {
    pub fn deliver(self, decoded: &str) {
        // The receiver only goes away when the scan was abandoned.
        let _ = self.0.send(decoded.trim().to_string());
    }
}

pub fn one_shot() -> (DecodeSink, oneshot::Receiver<String>) {
    let (tx, rx) = oneshot::channel();
    (DecodeSink(tx), rx)
}

/// Run one scanner activation and return the trimmed job code.
///
/// The scanner is stopped on every exit path; errors from stopping are
/// logged and dropped.
pub async fn scan_once<S: CodeScanner>(scanner: &mut S) -> AppResult<String> {
    let (sink, decoded) = one_shot();
    let outcome = pump(scanner, sink).await;

    if let Err(e) = scanner.stop().await {
        tracing::debug!(error = %e, "scanner stop failed during teardown");
    }

    outcome.map_err(|e| match e {
        AppError::Scanner(_) => e,
        other => AppError::Scanner(other.to_string()),
    })?;
    decoded
        .await
        .map_err(|_| AppError::Scanner("scanner closed before a code was read".into()))
}

async fn pump<S: CodeScanner>(scanner: &mut S, sink: DecodeSink) -> AppResult<()> {
    while let Some(event) = scanner.next_event().await? {
        match event {
            DecodeEvent::Decoded(text) if !text.trim().is_empty() => {
                sink.deliver(&text);
                return Ok(());
            }
            DecodeEvent::Decoded(_) => {}
            DecodeEvent::Failed(reason) => {
                tracing::trace!(%reason, "frame not decoded");
            }
        }
    }
    // Dropping the sink unread tells the receiver nothing was decoded.
    Ok(())
}

/// Line-oriented scanner: keyboard-wedge readers type the code followed by
/// Enter, so each line is one decode.
pub struct LineScanner<'a, R> {
    lines: &'a mut Lines<R>,
    stopped: bool,
}

impl<'a, R: AsyncBufRead + Unpin> LineScanner<'a, R> {
    pub fn new(lines: &'a mut Lines<R>) -> Self {
        Self {
            lines,
            stopped: false,
        }
    }
}

impl<R: AsyncBufRead + Unpin> CodeScanner for LineScanner<'_, R> {
    async fn next_event(&mut self) -> AppResult<Option<DecodeEvent>> {
        if self.stopped {
            return Ok(None);
        }
        let line = self
            .lines
            .next_line()
            .await
            .map_err(|e| AppError::Scanner(e.to_string()))?;

        Ok(line.map(|l| {
            if l.trim().is_empty() {
                DecodeEvent::Failed("empty read".into())
            } else {
                DecodeEvent::Decoded(l)
            }
        }))
    }

    async fn stop(&mut self) -> AppResult<()> {
        self.stopped = true;
        Ok(())
    }
}
