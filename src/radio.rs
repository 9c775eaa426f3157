//! Radio link boundary
//!
//! The physical LoRa transport lives outside this process; the gateway only
//! consumes its decoded output. [`RadioLink`] is that boundary: poll for a
//! pending message, then take it. [`UdpRadio`] is the production adapter,
//! reading one datagram per decoded transmission from the receiver daemon on
//! a local socket.

use std::io;
use std::net::UdpSocket;

use thiserror::Error;

/// LoRa payloads are 255 bytes or less; one datagram per decoded message.
const MAX_PAYLOAD: usize = 512;

#[derive(Debug, Error)]
pub enum RadioError {
    #[error("no message pending")]
    Empty,

    #[error("radio socket error: {0}")]
    Io(#[from] io::Error),
}

/// Consumed interface of the radio collaborator.
pub trait RadioLink: Send {
    /// True when a decoded message is waiting.
    fn has_message(&mut self) -> bool;

    /// Take the pending message. Errors with [`RadioError::Empty`] when
    /// called with nothing available.
    fn receive(&mut self) -> Result<Vec<u8>, RadioError>;
}

/// Decoded-message feed over a non-blocking local UDP socket.
pub struct UdpRadio {
    socket: UdpSocket,
    buf: Vec<u8>,
}

impl UdpRadio {
    pub fn bind(addr: &str) -> io::Result<Self> {
        let socket = UdpSocket::bind(addr)?;
        socket.set_nonblocking(true)?;
        Ok(Self {
            socket,
            buf: vec![0u8; MAX_PAYLOAD],
        })
    }
}

impl RadioLink for UdpRadio {
    fn has_message(&mut self) -> bool {
        match self.socket.peek(&mut self.buf) {
            Ok(_) => true,
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => false,
            // Socket trouble: report true so receive() surfaces the error
            Err(_) => true,
        }
    }

    fn receive(&mut self) -> Result<Vec<u8>, RadioError> {
        match self.socket.recv(&mut self.buf) {
            Ok(len) => Ok(self.buf[..len].to_vec()),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Err(RadioError::Empty),
            Err(e) => Err(RadioError::Io(e)),
        }
    }
}
