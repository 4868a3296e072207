//! UDP transport - one datagram per frame, fire-and-forget

use std::io;
use std::net::SocketAddr;

use contracts::{ContractError, FramePublisher};
use tokio::net::UdpSocket;
use tracing::{debug, instrument, trace};

use super::MAX_DATAGRAM_LEN;

/// Publisher sending each frame to a fixed endpoint
pub struct UdpPublisher {
    socket: UdpSocket,
    endpoint: SocketAddr,
}

impl UdpPublisher {
    /// Bind `bind` and direct all datagrams at `endpoint`
    ///
    /// Succeeds whether or not anybody listens on `endpoint`.
    #[instrument(name = "udp_publisher_bind", skip_all, fields(bind = %bind, endpoint = %endpoint))]
    pub async fn bind(bind: SocketAddr, endpoint: SocketAddr) -> Result<Self, ContractError> {
        let socket = UdpSocket::bind(bind)
            .await
            .map_err(|e| ContractError::transport(bind.to_string(), e.to_string()))?;
        socket
            .connect(endpoint)
            .await
            .map_err(|e| ContractError::transport(endpoint.to_string(), e.to_string()))?;

        debug!(local = ?socket.local_addr().ok(), "UdpPublisher connected");

        Ok(Self { socket, endpoint })
    }

    /// Local address the publisher sends from
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl FramePublisher for UdpPublisher {
    fn endpoint(&self) -> String {
        self.endpoint.to_string()
    }

    async fn publish(&mut self, frame: &[u8]) -> Result<usize, ContractError> {
        let sent = self
            .socket
            .send(frame)
            .await
            .map_err(|e| ContractError::transport(self.endpoint.to_string(), e.to_string()))?;
        trace!(endpoint = %self.endpoint, bytes = sent, "Sent frame");
        Ok(sent)
    }
}

/// Subscriber receiving frames on a bound endpoint
pub struct UdpSubscriber {
    socket: UdpSocket,
    buf: Vec<u8>,
}

impl UdpSubscriber {
    /// Bind the endpoint frames are published to
    #[instrument(name = "udp_subscriber_bind", skip_all, fields(endpoint = %endpoint))]
    pub async fn bind(endpoint: SocketAddr) -> Result<Self, ContractError> {
        let socket = UdpSocket::bind(endpoint)
            .await
            .map_err(|e| ContractError::transport(endpoint.to_string(), e.to_string()))?;

        debug!(local = ?socket.local_addr().ok(), "UdpSubscriber bound");

        Ok(Self {
            socket,
            buf: vec![0; MAX_DATAGRAM_LEN],
        })
    }

    /// Bound local address (resolves port 0)
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Wait for the next datagram
    pub async fn recv_frame(&mut self) -> Result<&[u8], ContractError> {
        let len = self
            .socket
            .recv(&mut self.buf)
            .await
            .map_err(|e| self.recv_error(e))?;
        Ok(&self.buf[..len])
    }

    /// Take the next datagram if one is ready, without waiting
    pub fn try_recv_frame(&mut self) -> Result<Option<&[u8]>, ContractError> {
        match self.socket.try_recv(&mut self.buf) {
            Ok(len) => Ok(Some(&self.buf[..len])),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(self.recv_error(e)),
        }
    }

    fn recv_error(&self, e: io::Error) -> ContractError {
        let endpoint = self
            .socket
            .local_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "udp".to_string());
        ContractError::transport(endpoint, e.to_string())
    }
}
