// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! A client/server library for the Zusi 3 train-simulator Fahrpult control
//! protocol: a length-prefixed, recursively-nested binary message format
//! carried over a stream-oriented TCP connection on port 1436.
//!
//! # Examples
//! ```no_run
//! use std::net::{IpAddr, Ipv4Addr};
//! use zusi3tcp::{client, tcp};
//!
//! let addr = IpAddr::from(Ipv4Addr::new(127, 0, 0, 1));
//! let mut session = match zusi3tcp::connect(addr, "desk-01".to_string()) {
//!     Ok(session) => session,
//!     Err(e) => {
//!         println!("{}", e);
//!         return;
//!     }
//! };
//!
//! session
//!     .connect(client::Subscription { fs: vec![1, 27], prog: vec![], bedienung: false })
//!     .unwrap();
//!
//! match session.receive_message() {
//!     Ok(msg) => println!("{:?}", msg),
//!     Err(e) => println!("{}", e),
//! }
//! ```

pub mod client;
pub mod codec;
pub mod constant;
pub mod error;
pub mod field;
pub mod message;
pub mod server;
pub mod tcp;
pub mod transport;

use std::net::IpAddr;

/// Connect to a Zusi simulator at `address:1436` and return an unconnected
/// [`client::ClientSession`]; call [`client::ClientSession::connect`] to run
/// the handshake. Convenience wrapper over [`tcp::Transport::connect`] for
/// the common case of a default-port TCP session.
pub fn connect(address: IpAddr, client_id: String) -> Result<client::ClientSession<tcp::Transport>, error::Error> {
    let transport = tcp::Transport::connect(tcp::Options::new(address))?;
    Ok(client::ClientSession::new(transport, client_id))
}
