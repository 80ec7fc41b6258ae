// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! Server (emulator) half of the session state machine. §4.4.2, §4.4.3.

use crate::codec::{read_message, write_message, Attribute, Node};
use crate::constant::{self, Command};
use crate::error::Error;
use crate::field::AttributeValue;
use crate::transport::Transport;
use std::collections::HashSet;

/// Server-side handshake states (§4.4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Fresh,
    HelloReceived,
    NeededReceived,
    Ready,
    Closed,
}

/// The Fahrpult server half of a session, as used by emulators and tests.
///
/// # Examples
///
/// ```no_run
/// use zusi3tcp::{server, tcp};
/// use std::net::{IpAddr, Ipv4Addr, TcpListener};
///
/// let listener = TcpListener::bind("0.0.0.0:1436").unwrap();
/// let (stream, _) = listener.accept().unwrap();
/// let transport = tcp::Transport::from_stream(stream);
/// let mut session = server::ServerSession::new(transport);
///
/// session.accept().unwrap();
/// println!("client {} connected", session.client_name());
/// session.send_data(&[(1, 42.0)]).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ServerSession<T: Transport> {
    transport: T,
    state: ServerState,
    client_name: String,
    client_version: String,
    zusi_version: String,
    connection_info: String,
    fs_data: HashSet<u16>,
    prog_data: HashSet<u16>,
    bedienung: bool,
}

impl<T: Transport> ServerSession<T> {
    /// A fresh, unaccepted session. `zusi_version` defaults to `"3.1.2.0"`
    /// and `connection_info` to `"0"`, the values the original source
    /// declares in its most recent revision (§11).
    pub fn new(transport: T) -> ServerSession<T> {
        ServerSession {
            transport,
            state: ServerState::Fresh,
            client_name: String::new(),
            client_version: String::new(),
            zusi_version: "3.1.2.0".to_string(),
            connection_info: "0".to_string(),
            fs_data: HashSet::new(),
            prog_data: HashSet::new(),
            bedienung: false,
        }
    }

    /// Override the declared server Zusi version before calling
    /// [`Self::accept`].
    pub fn with_zusi_version(mut self, version: String) -> ServerSession<T> {
        self.zusi_version = version;
        self
    }

    /// Current handshake state.
    pub fn state(&self) -> ServerState {
        self.state
    }

    /// Client id declared in the peer's HELLO, available once
    /// [`Self::accept`] has reached [`ServerState::Ready`].
    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    /// Client version declared in the peer's HELLO.
    pub fn client_version(&self) -> &str {
        &self.client_version
    }

    /// Whether the client subscribed to driver-input-event feedback.
    pub fn bedienung(&self) -> bool {
        self.bedienung
    }

    /// Run the full HELLO / ACK_HELLO / NEEDED_DATA / ACK_NEEDED_DATA
    /// handshake (§4.4.2). Must be called exactly once from
    /// [`ServerState::Fresh`].
    pub fn accept(&mut self) -> Result<(), Error> {
        self.receive_hello()?;
        self.send_ack_hello()?;
        self.receive_needed_data()?;
        self.send_ack_needed_data()?;
        Ok(())
    }

    fn receive_hello(&mut self) -> Result<(), Error> {
        let root = read_message(&mut self.transport)?;
        if root.id != constant::MSG_TYPE_CONNECTING || root.nodes.len() != 1 {
            self.state = ServerState::Closed;
            log::error!("server: expected a single connecting-phase command node");
            return Err(Error::ProtocolError(
                "expected a single connecting-phase command node".into(),
            ));
        }
        let hello = &root.nodes[0];
        if hello.id != Command::Hello as u16 {
            self.state = ServerState::Closed;
            log::error!("server: expected HELLO, got command id {}", hello.id);
            return Err(Error::ProtocolError(format!(
                "expected HELLO, got command id {}",
                hello.id
            )));
        }

        self.client_name = required(hello, constant::hello::CLIENT_ID)?;
        self.client_version = required(hello, constant::hello::CLIENT_VERSION)?;

        log::debug!("server: Fresh -> HelloReceived");
        self.state = ServerState::HelloReceived;
        Ok(())
    }

    fn send_ack_hello(&mut self) -> Result<(), Error> {
        let ack = Node::new(Command::AckHello as u16)
            .push_attr(Attribute::new(
                constant::hello_ack::ZUSI_VERSION,
                self.zusi_version.encode(),
            ))
            .push_attr(Attribute::new(
                constant::hello_ack::ZUSI_VERBINDUNGSINFO,
                self.connection_info.encode(),
            ))
            .push_attr(Attribute::new(constant::hello_ack::ZUSI_OK, 0u8.encode()));
        let root = Node::new(constant::MSG_TYPE_CONNECTING).push_node(ack);
        write_message(&mut self.transport, &root)?;

        log::debug!("server: HelloReceived -> NeededReceived");
        self.state = ServerState::NeededReceived;
        Ok(())
    }

    fn receive_needed_data(&mut self) -> Result<(), Error> {
        let root = read_message(&mut self.transport)?;
        if root.id != constant::MSG_TYPE_FAHRPULT || root.nodes.len() != 1 {
            self.state = ServerState::Closed;
            log::error!("server: expected a single fahrpult-phase command node");
            return Err(Error::ProtocolError(
                "expected a single fahrpult-phase command node".into(),
            ));
        }
        let needed = &root.nodes[0];
        if needed.id != Command::NeededData as u16 {
            self.state = ServerState::Closed;
            log::error!("server: expected NEEDED_DATA, got command id {}", needed.id);
            return Err(Error::ProtocolError(format!(
                "expected NEEDED_DATA, got command id {}",
                needed.id
            )));
        }

        if let Some(fs_node) = needed.node(constant::GROUP_FS) {
            for attr in &fs_node.attributes {
                self.fs_data.insert(u16::decode(&attr.payload)?);
            }
        }
        if let Some(prog_node) = needed.node(constant::GROUP_PROG) {
            for attr in &prog_node.attributes {
                self.prog_data.insert(u16::decode(&attr.payload)?);
            }
        }
        self.bedienung = needed.node(constant::GROUP_BEDIENUNG).is_some();

        Ok(())
    }

    fn send_ack_needed_data(&mut self) -> Result<(), Error> {
        let ack = Node::new(Command::AckNeededData as u16).push_attr(Attribute::new(
            constant::need_data_ack::ZUSI_OK,
            0u8.encode(),
        ));
        let root = Node::new(constant::MSG_TYPE_FAHRPULT).push_node(ack);
        write_message(&mut self.transport, &root)?;

        log::debug!("server: NeededReceived -> Ready");
        self.state = ServerState::Ready;
        Ok(())
    }

    /// Send a batch of fuehrerstand-data telemetry, filtered to the ids the
    /// client subscribed to in `NEEDED_DATA` (§4.4.3). A call whose filtered
    /// result is empty is a no-op: nothing is written to the wire.
    pub fn send_data(&mut self, pairs: &[(u16, f32)]) -> Result<(), Error> {
        let mut ftd = Node::new(Command::DataFtd as u16);
        for (id, value) in pairs {
            if self.fs_data.contains(id) {
                ftd.attributes.push(Attribute::new(*id, value.encode()));
            }
        }
        if ftd.attributes.is_empty() {
            return Ok(());
        }
        let root = Node::new(constant::MSG_TYPE_FAHRPULT).push_node(ftd);
        write_message(&mut self.transport, &root)
    }
}

fn required<T: AttributeValue>(node: &Node, id: u16) -> Result<T, Error> {
    let attr = node
        .attr(id)
        .ok_or_else(|| Error::ProtocolError(format!("missing required attribute {}", id)))?;
    T::decode(&attr.payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::VecDeque;

    struct MemTransport {
        read_buf: VecDeque<u8>,
        write_buf: Vec<u8>,
    }

    impl MemTransport {
        fn from_bytes(bytes: Vec<u8>) -> MemTransport {
            MemTransport {
                read_buf: bytes.into_iter().collect(),
                write_buf: Vec::new(),
            }
        }
    }

    impl Transport for MemTransport {
        fn read_exact(&mut self, dst: &mut [u8]) -> Result<(), Error> {
            if self.read_buf.len() < dst.len() {
                return Err(Error::TransportClosed);
            }
            for byte in dst.iter_mut() {
                *byte = self.read_buf.pop_front().unwrap();
            }
            Ok(())
        }

        fn write_all(&mut self, src: &[u8]) -> Result<(), Error> {
            self.write_buf.extend_from_slice(src);
            Ok(())
        }
    }

    fn hello_bytes(client_id: &str, client_version: &str) -> Vec<u8> {
        let hello = Node::new(Command::Hello as u16)
            .push_attr(Attribute::new(
                constant::hello::PROTOKOLL_VERSION,
                constant::PROTOCOL_VERSION.encode(),
            ))
            .push_attr(Attribute::new(
                constant::hello::CLIENT_TYP,
                constant::CLIENT_TYPE_FAHRPULT.encode(),
            ))
            .push_attr(Attribute::new(
                constant::hello::CLIENT_ID,
                client_id.to_string().encode(),
            ))
            .push_attr(Attribute::new(
                constant::hello::CLIENT_VERSION,
                client_version.to_string().encode(),
            ));
        let root = Node::new(constant::MSG_TYPE_CONNECTING).push_node(hello);
        let mut out = MemTransport::from_bytes(Vec::new());
        write_message(&mut out, &root).unwrap();
        out.write_buf
    }

    fn needed_data_bytes(fs: &[u16]) -> Vec<u8> {
        let mut fs_node = Node::new(constant::GROUP_FS);
        for id in fs {
            fs_node
                .attributes
                .push(Attribute::new(constant::need_data::ID, id.encode()));
        }
        let needed = Node::new(Command::NeededData as u16).push_node(fs_node);
        let root = Node::new(constant::MSG_TYPE_FAHRPULT).push_node(needed);
        let mut out = MemTransport::from_bytes(Vec::new());
        write_message(&mut out, &root).unwrap();
        out.write_buf
    }

    #[test]
    fn accept_populates_subscription_state() {
        let mut scripted = hello_bytes("testclient", "2.0");
        scripted.extend(needed_data_bytes(&[1]));
        let mut session = ServerSession::new(MemTransport::from_bytes(scripted));

        session.accept().unwrap();

        assert_eq!(session.state(), ServerState::Ready);
        assert_eq!(session.client_name(), "testclient");
        assert!(!session.bedienung());
        assert!(session.fs_data.contains(&1));
    }

    #[test]
    fn send_data_filters_to_subscription() {
        let mut session = ServerSession::new(MemTransport::from_bytes(Vec::new()));
        session.fs_data.insert(1);

        session.send_data(&[(13, 42.0)]).unwrap();
        assert!(session.transport.write_buf.is_empty());

        session.send_data(&[(1, 10.0), (13, 42.0)]).unwrap();
        assert!(!session.transport.write_buf.is_empty());

        let mut reader = MemTransport::from_bytes(session.transport.write_buf.clone());
        let root = read_message(&mut reader).unwrap();
        let ftd = root.node(Command::DataFtd as u16).unwrap();
        assert_eq!(ftd.attributes.len(), 1);
        assert_eq!(ftd.attributes[0].id, 1);
    }
}
