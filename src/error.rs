// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

use std::error;
use std::fmt;
use std::io::{Error as IOError, ErrorKind};

/// Error taxonomy for the Zusi Fahrpult protocol.
///
/// `TransportClosed`, `TransportError`, `ProtocolError`, `HandshakeRejected`
/// and `SubscriptionRejected` are terminal: the session must not be used
/// again once one of these is returned. `SchemaError` is not terminal — the
/// raw message is still available to the caller and producing it never
/// advances the reader.
#[derive(Debug)]
pub enum Error {
    /// The peer closed the byte stream.
    TransportClosed,
    /// The underlying transport failed.
    TransportError(ErrorKind),
    /// A byte-level framing impossibility: bad sentinel, length < 2, wrong
    /// top-level message id, unknown command id.
    ProtocolError(String),
    /// A typed extraction's declared width did not match the bytes present,
    /// or a required attribute of a composite node was missing.
    SchemaError(String),
    /// The peer's ACK_HELLO carried a non-zero `result`.
    HandshakeRejected(u8),
    /// The peer's ACK_NEEDED_DATA carried a non-zero `result`.
    SubscriptionRejected(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::TransportClosed => write!(f, "transport closed by peer"),
            Error::TransportError(kind) => write!(f, "transport error: {:?}", kind),
            Error::ProtocolError(reason) => write!(f, "protocol error: {}", reason),
            Error::SchemaError(reason) => write!(f, "schema error: {}", reason),
            Error::HandshakeRejected(code) => {
                write!(f, "handshake rejected by peer, result={}", code)
            }
            Error::SubscriptionRejected(code) => {
                write!(f, "subscription rejected by peer, result={}", code)
            }
        }
    }
}

impl From<IOError> for Error {
    fn from(e: IOError) -> Self {
        match e.kind() {
            ErrorKind::UnexpectedEof | ErrorKind::ConnectionReset | ErrorKind::BrokenPipe => {
                log::error!("transport closed by peer: {}", e);
                Error::TransportClosed
            }
            kind => {
                log::error!("transport error: {:?}", kind);
                Error::TransportError(kind)
            }
        }
    }
}

// This is important for other errors to wrap this one.
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}
