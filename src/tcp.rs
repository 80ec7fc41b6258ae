// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! TCP transport implementation

use super::error::Error;
use super::transport::Transport as TransportTrait;
use std::io::{ErrorKind, Read, Write};
use std::net::{IpAddr, SocketAddr, TcpStream};
use std::time::Duration;

/// Default Zusi Fahrpult port.
pub const ZUSI_PORT: u16 = 1436;

/// a set of options for the TCP connection
#[derive(Debug, Clone)]
pub struct Options {
    pub connection_timeout: Option<Duration>,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    address: SocketAddr,
}

impl Options {
    /// Options targeting the default Zusi port (1436) on `address`.
    pub fn new(address: IpAddr) -> Options {
        Options {
            connection_timeout: None,
            read_timeout: Duration::new(0, 0),
            write_timeout: Duration::new(0, 0),
            address: SocketAddr::new(address, ZUSI_PORT),
        }
    }

    /// Options targeting an explicit `address:port`, for simulators that
    /// listen on a non-standard port.
    pub fn with_port(address: IpAddr, port: u16) -> Options {
        Options {
            connection_timeout: None,
            read_timeout: Duration::new(0, 0),
            write_timeout: Duration::new(0, 0),
            address: SocketAddr::new(address, port),
        }
    }
}

/// Blocking TCP transport. Implements [`crate::transport::Transport`] over
/// `std::net::TcpStream`.
pub struct Transport {
    stream: TcpStream,
}

impl Transport {
    pub fn connect(options: Options) -> Result<Transport, Error> {
        let stream = match options.connection_timeout {
            Some(timeout) => TcpStream::connect_timeout(&options.address, timeout)?,
            None => TcpStream::connect(options.address)?,
        };

        if !options.read_timeout.is_zero() {
            stream.set_read_timeout(Some(options.read_timeout))?;
        }
        if !options.write_timeout.is_zero() {
            stream.set_write_timeout(Some(options.write_timeout))?;
        }
        log::debug!("connected to {}", options.address);
        Ok(Transport { stream })
    }

    /// Wrap an already-connected stream, e.g. one accepted by a listener
    /// implementing the server role.
    pub fn from_stream(stream: TcpStream) -> Transport {
        Transport { stream }
    }
}

impl TransportTrait for Transport {
    fn read_exact(&mut self, dst: &mut [u8]) -> Result<(), Error> {
        self.stream.read_exact(dst).map_err(Error::from)
    }

    fn write_all(&mut self, src: &[u8]) -> Result<(), Error> {
        self.stream.write_all(src).map_err(Error::from)
    }

    fn readable_nonblocking(&self) -> bool {
        match self.stream.set_nonblocking(true) {
            Ok(()) => {}
            Err(_) => return false,
        }
        let mut probe = [0u8; 1];
        let result = match self.stream.peek(&mut probe) {
            Ok(n) => n > 0,
            Err(ref e) if e.kind() == ErrorKind::WouldBlock => false,
            Err(_) => false,
        };
        let _ = self.stream.set_nonblocking(false);
        result
    }
}
