//! # Device engine
//!
//! Drives a [`Transport`] on a background tokio task: frames the incoming
//! bytes into lines, parses them in arrival order, reassembles multi-sentence
//! groups, correlates reporting cycles through a [`MultiPartCycleCache`] and
//! publishes a [`DeviceEvent`] per complete message.
//!
//! A line that fails to parse is logged at `debug` and dropped; it never stops
//! the feed.
//!
//! ```rust,no_run
//! use nmea0183_stream::device::{DeviceEngine, TcpTransport};
//!
//! # async fn run() -> Result<(), nmea0183_stream::device::DeviceError> {
//! let (mut device, mut events) = DeviceEngine::with_channel(TcpTransport::new("127.0.0.1:10110"));
//! device.open().await?;
//!
//! while let Some(event) = events.recv().await {
//!     println!("{} {:?}", event.message.type_id(), event.message.body());
//! }
//!
//! device.close().await
//! # }
//! ```

mod cycle;
mod transport;

use std::{collections::HashMap, time::Duration};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{io::AsyncReadExt, io::AsyncWriteExt, sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

pub use cycle::{CycleOutcome, MultiPartCycleCache};
pub use transport::{
    BoxedReader, BoxedWriter, FileTransport, TcpTransport, Transport, TransportError,
    TransportStream,
};

use crate::{Message, NmeaParser, framer::StreamFramer, parser::Parsed};

/// Lifecycle of a [`DeviceEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceState {
    /// No transport held, no read loop running
    #[default]
    Closed,
    /// Transport is being opened
    Opening,
    /// Read loop running
    Open,
    /// Read loop is being stopped and the transport released
    Closing,
}

/// Read loop tuning.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Maximum number of bytes requested from the transport per read
    pub read_buffer_size: usize,
    /// Pause after a read that returned no data
    pub idle_backoff: Duration,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            read_buffer_size: 1024,
            idle_backoff: Duration::from_millis(50),
        }
    }
}

impl DeviceConfig {
    /// Sets the read size, at least one byte.
    #[must_use]
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size.max(1);
        self
    }

    #[must_use]
    pub fn idle_backoff(mut self, backoff: Duration) -> Self {
        self.idle_backoff = backoff;
        self
    }
}

/// One complete message published by a [`DeviceEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceEvent {
    /// The parsed message, reassembled when it spans several sentences
    pub message: Message,
    /// The message belongs to a learned reporting cycle of several types.
    pub is_multi_part: bool,
    /// The whole cycle, when this message completed it.
    pub completed_group: Option<Vec<Message>>,
}

/// Errors returned by [`DeviceEngine`] operations.
#[derive(Error, Debug)]
pub enum DeviceError {
    /// The transport could not be opened
    #[error("Failed to open device: {0}")]
    Open(#[source] TransportError),

    /// The transport reported an error while being released
    #[error("Failed to close device: {0}")]
    Close(#[source] TransportError),

    /// Writing to the transport failed
    #[error("Failed to write to device: {0}")]
    Write(#[source] TransportError),

    /// The transport does not support the operation, e.g. writing to a log file
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// The operation needs an open device
    #[error("Device is not open")]
    NotOpen,
}

type Handler = Box<dyn FnMut(DeviceEvent) + Send>;

enum EventSink {
    Callback(Handler),
    Channel(mpsc::UnboundedSender<DeviceEvent>),
}

impl EventSink {
    fn deliver(&mut self, event: DeviceEvent) {
        match self {
            Self::Callback(handler) => handler(event),
            Self::Channel(sender) => {
                if sender.send(event).is_err() {
                    trace!("event receiver dropped");
                }
            }
        }
    }
}

struct Running {
    cancel: CancellationToken,
    task: JoinHandle<EventSink>,
    writer: Option<BoxedWriter>,
}

/// Owns one device connection and its read loop.
pub struct DeviceEngine<T> {
    transport: T,
    parser: NmeaParser,
    config: DeviceConfig,
    state: DeviceState,
    sink: Option<EventSink>,
    running: Option<Running>,
}

impl<T: Transport> DeviceEngine<T> {
    /// Creates a closed engine that calls `handler` for each event, inline
    /// with the read loop.
    pub fn new<F>(transport: T, handler: F) -> Self
    where
        F: FnMut(DeviceEvent) + Send + 'static,
    {
        Self::with_sink(transport, EventSink::Callback(Box::new(handler)))
    }

    /// Creates a closed engine publishing its events on an unbounded channel.
    pub fn with_channel(transport: T) -> (Self, mpsc::UnboundedReceiver<DeviceEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::with_sink(transport, EventSink::Channel(sender)), receiver)
    }

    fn with_sink(transport: T, sink: EventSink) -> Self {
        Self {
            transport,
            parser: NmeaParser::default(),
            config: DeviceConfig::default(),
            state: DeviceState::Closed,
            sink: Some(sink),
            running: None,
        }
    }

    /// Applies from the next [`open`](Self::open).
    #[must_use]
    pub fn with_config(mut self, config: DeviceConfig) -> Self {
        self.config = config;
        self
    }

    /// Applies from the next [`open`](Self::open).
    #[must_use]
    pub fn with_parser(mut self, parser: NmeaParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn state(&self) -> DeviceState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DeviceState::Open
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Opens the transport and starts the read loop.
    ///
    /// Does nothing when the device is already open.
    pub async fn open(&mut self) -> Result<(), DeviceError> {
        if matches!(self.state, DeviceState::Open | DeviceState::Opening) {
            return Ok(());
        }
        let Some(sink) = self.sink.take() else {
            return Err(DeviceError::Open(TransportError::Task(
                "event handler lost by a previous read loop".to_string(),
            )));
        };

        self.state = DeviceState::Opening;
        let device = self.transport.description();
        info!(%device, "opening device");

        let stream = match self.transport.open().await {
            Ok(stream) => stream,
            Err(err) => {
                self.sink = Some(sink);
                self.state = DeviceState::Closed;
                return Err(DeviceError::Open(err));
            }
        };

        let cancel = CancellationToken::new();
        let read_loop = ReadLoop {
            parser: self.parser.clone(),
            framer: StreamFramer::with_capacity(self.config.read_buffer_size),
            cycle: MultiPartCycleCache::new(),
            pending: HashMap::new(),
            sink,
        };
        let task = tokio::spawn(read_loop.run(stream.reader, cancel.clone(), self.config.clone()));

        self.running = Some(Running {
            cancel,
            task,
            writer: stream.writer,
        });
        self.state = DeviceState::Open;
        info!(%device, "device open");
        Ok(())
    }

    /// Stops the read loop, waits for it to finish and releases the transport.
    ///
    /// Partial multi-sentence groups and the learned reporting cycle are
    /// discarded. Does nothing when the device is already closed.
    pub async fn close(&mut self) -> Result<(), DeviceError> {
        let Some(Running {
            cancel,
            task,
            writer,
        }) = self.running.take()
        else {
            self.state = DeviceState::Closed;
            return Ok(());
        };

        self.state = DeviceState::Closing;
        let device = self.transport.description();
        info!(%device, "closing device");

        cancel.cancel();
        let joined = task.await;
        drop(writer);
        let released = self.transport.close().await;
        self.state = DeviceState::Closed;

        match joined {
            Ok(sink) => self.sink = Some(sink),
            Err(err) => return Err(DeviceError::Close(TransportError::Task(err.to_string()))),
        }
        released.map_err(DeviceError::Close)?;

        info!(%device, "device closed");
        Ok(())
    }

    /// Sends raw bytes to the device, e.g. correction data.
    pub async fn write(&mut self, data: &[u8]) -> Result<(), DeviceError> {
        let running = self.running.as_mut().ok_or(DeviceError::NotOpen)?;
        let writer = running
            .writer
            .as_mut()
            .ok_or(DeviceError::UnsupportedOperation("transport is receive-only"))?;

        writer
            .write_all(data)
            .await
            .map_err(|e| DeviceError::Write(e.into()))?;
        writer
            .flush()
            .await
            .map_err(|e| DeviceError::Write(e.into()))
    }
}

impl<T> Drop for DeviceEngine<T> {
    fn drop(&mut self) {
        if let Some(running) = &self.running {
            running.cancel.cancel();
        }
    }
}

struct ReadLoop {
    parser: NmeaParser,
    framer: StreamFramer,
    cycle: MultiPartCycleCache,
    /// Incomplete multi-sentence group per sentence code.
    pending: HashMap<String, Message>,
    sink: EventSink,
}

impl ReadLoop {
    async fn run(
        mut self,
        mut reader: BoxedReader,
        cancel: CancellationToken,
        config: DeviceConfig,
    ) -> EventSink {
        let mut buf = vec![0u8; config.read_buffer_size.max(1)];

        while !cancel.is_cancelled() {
            let read = tokio::select! {
                _ = cancel.cancelled() => break,
                read = reader.read(&mut buf) => read,
            };

            match read {
                Ok(0) => {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(config.idle_backoff) => {}
                    }
                }
                Ok(n) => {
                    self.framer.push(&buf[..n]);
                    while let Some(line) = self.framer.next_line() {
                        self.handle_line(&line);
                    }
                }
                Err(err) => {
                    warn!(%err, "transport read failed, stopping read loop");
                    break;
                }
            }
        }

        debug!(pending = self.framer.pending(), "read loop stopped");
        self.sink
    }

    fn handle_line(&mut self, line: &str) {
        let sentence = match self.parser.tokenize(line) {
            Ok(sentence) => sentence,
            Err(err) => {
                debug!(%err, line, "dropping line");
                return;
            }
        };

        let suffix = sentence.suffix().to_string();
        let parsed = self
            .parser
            .parse_sentence(&sentence, self.pending.get_mut(&suffix));

        match parsed {
            Ok(Parsed::Appended) => {
                let complete = self.pending.get(&suffix).is_some_and(Message::is_complete);
                if complete {
                    if let Some(message) = self.pending.remove(&suffix) {
                        self.publish(message);
                    }
                }
            }
            Ok(Parsed::New(message)) if message.is_complete() => {
                self.pending.remove(&suffix);
                self.publish(message);
            }
            Ok(Parsed::New(message)) => {
                if self.pending.insert(suffix, message).is_some() {
                    trace!(line, "discarding broken multi-sentence group");
                }
            }
            Err(err) => debug!(%err, line, "dropping line"),
        }
    }

    fn publish(&mut self, message: Message) {
        let CycleOutcome {
            in_cycle,
            completed,
        } = self.cycle.push(&message);

        self.sink.deliver(DeviceEvent {
            message,
            is_multi_part: in_cycle,
            completed_group: completed,
        });
    }
}
