// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! Transport definition for the Zusi wire.

use super::error::Error;

/// An abstract bidirectional byte stream consumed by the framing codec.
///
/// `Transport` owns nothing above the byte level: no framing state, no
/// buffering obligations beyond what the underlying stream already gives.
/// The codec is the only caller; it needs exactly three operations.
/// ## How can I implement `Transport`?
///
/// Wrap any reliable, ordered byte stream. [`crate::tcp::Transport`] is the
/// bundled implementation over `std::net::TcpStream`.
pub trait Transport {
    /// Block until exactly `dst.len()` bytes have been delivered, or fail.
    /// A short read from the underlying stream must be retried internally;
    /// the stream ending before `dst` is filled is [`Error::TransportClosed`].
    fn read_exact(&mut self, dst: &mut [u8]) -> Result<(), Error>;

    /// Block until all of `src` has been accepted by the stream, or fail.
    fn write_all(&mut self, src: &[u8]) -> Result<(), Error>;

    /// Best-effort, non-blocking hint that a subsequent `read_exact` would
    /// not block. A conservative `false` is always an acceptable answer;
    /// only opportunistic pollers should rely on this returning `true`.
    fn readable_nonblocking(&self) -> bool {
        false
    }
}
