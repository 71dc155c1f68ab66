//! Byte transports a [`DeviceEngine`](super::DeviceEngine) reads from.
//!
//! A transport only has to hand out an async reader (and, when it can transmit,
//! a writer). Opening and closing must be safe to repeat.

use std::{
    fmt,
    path::{Path, PathBuf},
    time::Duration,
};

use async_trait::async_trait;
use thiserror::Error;
use tokio::{
    io::{AsyncRead, AsyncWrite},
    net::TcpStream,
};

/// Transport error types
#[derive(Error, Debug)]
pub enum TransportError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Connection timeout
    #[error("Connection timeout after {0:?}")]
    Timeout(Duration),

    /// The background read task ended abnormally
    #[error("Read task failed: {0}")]
    Task(String),
}

pub type BoxedReader = Box<dyn AsyncRead + Send + Unpin>;
pub type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Handles produced by a successful [`Transport::open`].
pub struct TransportStream {
    pub reader: BoxedReader,
    /// `None` for receive-only transports.
    pub writer: Option<BoxedWriter>,
}

impl TransportStream {
    pub fn read_only<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        Self {
            reader: Box::new(reader),
            writer: None,
        }
    }

    pub fn duplex<R, W>(reader: R, writer: W) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        Self {
            reader: Box::new(reader),
            writer: Some(Box::new(writer)),
        }
    }

    pub fn is_writable(&self) -> bool {
        self.writer.is_some()
    }
}

impl fmt::Debug for TransportStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportStream")
            .field("writable", &self.is_writable())
            .finish_non_exhaustive()
    }
}

/// Source of NMEA bytes.
#[async_trait]
pub trait Transport: Send {
    /// Acquires the underlying resource.
    async fn open(&mut self) -> Result<TransportStream, TransportError>;

    /// Releases whatever `open` acquired. Called after the read loop stopped.
    async fn close(&mut self) -> Result<(), TransportError> {
        Ok(())
    }

    /// Human readable name used in logs.
    fn description(&self) -> String;
}

/// Plays back a recorded NMEA log.
#[derive(Debug, Clone)]
pub struct FileTransport {
    path: PathBuf,
}

impl FileTransport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Transport for FileTransport {
    async fn open(&mut self) -> Result<TransportStream, TransportError> {
        let file = tokio::fs::File::open(&self.path).await?;
        Ok(TransportStream::read_only(file))
    }

    fn description(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// NMEA over a raw TCP socket, e.g. a multiplexer or a network GNSS receiver.
#[derive(Debug, Clone)]
pub struct TcpTransport {
    address: String,
    connect_timeout: Option<Duration>,
}

impl TcpTransport {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            connect_timeout: None,
        }
    }

    /// Set connection timeout
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn open(&mut self) -> Result<TransportStream, TransportError> {
        let connect = TcpStream::connect(self.address.as_str());
        let stream = match self.connect_timeout {
            Some(timeout) => tokio::time::timeout(timeout, connect)
                .await
                .map_err(|_| TransportError::Timeout(timeout))?,
            None => connect.await,
        }
        .map_err(|e| TransportError::ConnectionFailed(format!("{}: {e}", self.address)))?;

        stream.set_nodelay(true)?;

        let (reader, writer) = stream.into_split();
        Ok(TransportStream::duplex(reader, writer))
    }

    fn description(&self) -> String {
        format!("tcp {}", self.address)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    use super::*;

    #[tokio::test]
    async fn test_file_transport() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"$HEHDT,274.07,T*19\r\n").unwrap();

        let mut transport = FileTransport::new(file.path());
        assert!(transport.description().starts_with("file "));

        for _ in 0..2 {
            let mut stream = transport.open().await.unwrap();
            assert!(!stream.is_writable());

            let mut contents = String::new();
            stream.reader.read_to_string(&mut contents).await.unwrap();
            assert_eq!(contents, "$HEHDT,274.07,T*19\r\n");
            transport.close().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut transport = FileTransport::new(dir.path().join("missing.nmea"));
        assert!(matches!(transport.open().await, Err(TransportError::Io(_))));
    }

    #[tokio::test]
    async fn test_tcp_transport() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket.write_all(b"$GPHDT,274.07,T*03\n").await.unwrap();
            let mut received = [0u8; 4];
            socket.read_exact(&mut received).await.unwrap();
            received
        });

        let mut transport = TcpTransport::new(address).connect_timeout(Duration::from_secs(5));
        let mut stream = transport.open().await.unwrap();

        let mut line = [0u8; 19];
        stream.reader.read_exact(&mut line).await.unwrap();
        assert_eq!(&line, b"$GPHDT,274.07,T*03\n");

        let writer = stream.writer.as_mut().unwrap();
        writer.write_all(b"ping").await.unwrap();
        writer.flush().await.unwrap();

        assert_eq!(&server.await.unwrap(), b"ping");
    }

    #[tokio::test]
    async fn test_tcp_connection_refused() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap().to_string();
        drop(listener);

        let mut transport = TcpTransport::new(address);
        assert!(matches!(
            transport.open().await,
            Err(TransportError::ConnectionFailed(_))
        ));
    }
}
