// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! Client (Fahrpult) half of the session state machine. §4.4.1.

use crate::codec::{read_message, write_message, Attribute, Node};
use crate::constant::{self, Command};
use crate::error::Error;
use crate::field::AttributeValue;
use crate::message::{dispatch_message, Message};
use crate::transport::Transport;

/// Client-side handshake states (§4.4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Fresh,
    HelloSent,
    NeededSent,
    Ready,
    Closed,
}

/// A subscription request passed to [`ClientSession::connect`].
#[derive(Debug, Clone, Default)]
pub struct Subscription {
    /// Fuehrerstand-data ids to subscribe to (group 0xA).
    pub fs: Vec<u16>,
    /// Program-data ids to subscribe to (group 0xC).
    pub prog: Vec<u16>,
    /// Whether to request driver-input-event feedback (group 0xB).
    pub bedienung: bool,
}

/// The Fahrpult client half of a session.
///
/// # Examples
///
/// ```no_run
/// use std::net::{IpAddr, Ipv4Addr};
/// use zusi3tcp::{client, tcp};
///
/// let addr = IpAddr::from(Ipv4Addr::new(127, 0, 0, 1));
/// let transport = tcp::Transport::connect(tcp::Options::new(addr)).unwrap();
/// let mut session = client::ClientSession::new(transport, "desk-01".to_string());
///
/// session
///     .connect(client::Subscription { fs: vec![1, 27], prog: vec![], bedienung: false })
///     .unwrap();
///
/// println!("server is running zusi {}", session.zusi_version());
/// ```
#[derive(Debug, Clone)]
pub struct ClientSession<T: Transport> {
    transport: T,
    state: ClientState,
    client_id: String,
    client_version: String,
    zusi_version: String,
    connection_info: String,
}

impl<T: Transport> ClientSession<T> {
    /// A fresh, unconnected session. `client_id` is the caller-chosen name
    /// sent in HELLO; `client_version` defaults to `"2.0"`, the most recent
    /// value attested in the original source (§9, §11).
    pub fn new(transport: T, client_id: String) -> ClientSession<T> {
        ClientSession {
            transport,
            state: ClientState::Fresh,
            client_id,
            client_version: "2.0".to_string(),
            zusi_version: String::new(),
            connection_info: String::new(),
        }
    }

    /// Override the declared client version before calling [`Self::connect`].
    pub fn with_client_version(mut self, version: String) -> ClientSession<T> {
        self.client_version = version;
        self
    }

    /// Current handshake state.
    pub fn state(&self) -> ClientState {
        self.state
    }

    /// The server's declared Zusi version, available once [`Self::connect`]
    /// has reached [`ClientState::Ready`].
    pub fn zusi_version(&self) -> &str {
        &self.zusi_version
    }

    /// The server's declared connection info, available once
    /// [`Self::connect`] has reached [`ClientState::Ready`].
    pub fn connection_info(&self) -> &str {
        &self.connection_info
    }

    /// Run the full HELLO / ACK_HELLO / NEEDED_DATA / ACK_NEEDED_DATA
    /// handshake (§4.4.1). Must be called exactly once from
    /// [`ClientState::Fresh`].
    pub fn connect(&mut self, subscription: Subscription) -> Result<(), Error> {
        self.send_hello()?;
        self.receive_ack_hello()?;
        self.send_needed_data(&subscription)?;
        self.receive_ack_needed_data()?;
        Ok(())
    }

    fn send_hello(&mut self) -> Result<(), Error> {
        log::debug!("client: Fresh -> HelloSent");
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
                self.client_id.encode(),
            ))
            .push_attr(Attribute::new(
                constant::hello::CLIENT_VERSION,
                self.client_version.encode(),
            ));
        let root = Node::new(constant::MSG_TYPE_CONNECTING).push_node(hello);
        write_message(&mut self.transport, &root)?;
        self.state = ClientState::HelloSent;
        Ok(())
    }

    fn receive_ack_hello(&mut self) -> Result<(), Error> {
        let root = read_message(&mut self.transport)?;
        if root.id != constant::MSG_TYPE_CONNECTING || root.nodes.len() != 1 {
            self.state = ClientState::Closed;
            log::error!("client: expected a single connecting-phase command node");
            return Err(Error::ProtocolError(
                "expected a single connecting-phase command node".into(),
            ));
        }
        let ack = &root.nodes[0];
        if ack.id != Command::AckHello as u16 {
            self.state = ClientState::Closed;
            log::error!("client: expected ACK_HELLO, got command id {}", ack.id);
            return Err(Error::ProtocolError(format!(
                "expected ACK_HELLO, got command id {}",
                ack.id
            )));
        }

        self.zusi_version = required(ack, constant::hello_ack::ZUSI_VERSION)?;
        self.connection_info = required(ack, constant::hello_ack::ZUSI_VERBINDUNGSINFO)?;
        let result: u8 = required(ack, constant::hello_ack::ZUSI_OK)?;
        if result != 0 {
            self.state = ClientState::Closed;
            log::error!("client: handshake rejected by peer, result={}", result);
            return Err(Error::HandshakeRejected(result));
        }

        log::debug!("client: HelloSent -> NeededSent");
        self.state = ClientState::NeededSent;
        Ok(())
    }

    fn send_needed_data(&mut self, subscription: &Subscription) -> Result<(), Error> {
        let mut needed = Node::new(Command::NeededData as u16);

        if !subscription.fs.is_empty() {
            let mut fs_node = Node::new(constant::GROUP_FS);
            for id in &subscription.fs {
                fs_node
                    .attributes
                    .push(Attribute::new(constant::need_data::ID, id.encode()));
            }
            needed.nodes.push(fs_node);
        }
        if subscription.bedienung {
            needed.nodes.push(Node::new(constant::GROUP_BEDIENUNG));
        }
        if !subscription.prog.is_empty() {
            let mut prog_node = Node::new(constant::GROUP_PROG);
            for id in &subscription.prog {
                prog_node
                    .attributes
                    .push(Attribute::new(constant::need_data::ID, id.encode()));
            }
            needed.nodes.push(prog_node);
        }

        let root = Node::new(constant::MSG_TYPE_FAHRPULT).push_node(needed);
        write_message(&mut self.transport, &root)
    }

    fn receive_ack_needed_data(&mut self) -> Result<(), Error> {
        let root = read_message(&mut self.transport)?;
        if root.id != constant::MSG_TYPE_FAHRPULT || root.nodes.len() != 1 {
            self.state = ClientState::Closed;
            log::error!("client: expected a single fahrpult-phase command node");
            return Err(Error::ProtocolError(
                "expected a single fahrpult-phase command node".into(),
            ));
        }
        let ack = &root.nodes[0];
        if ack.id != Command::AckNeededData as u16 {
            self.state = ClientState::Closed;
            log::error!(
                "client: expected ACK_NEEDED_DATA, got command id {}",
                ack.id
            );
            return Err(Error::ProtocolError(format!(
                "expected ACK_NEEDED_DATA, got command id {}",
                ack.id
            )));
        }
        let result: u8 = required(ack, constant::need_data_ack::ZUSI_OK)?;
        if result != 0 {
            self.state = ClientState::Closed;
            log::error!("client: subscription rejected by peer, result={}", result);
            return Err(Error::SubscriptionRejected(result));
        }

        log::debug!("client: NeededSent -> Ready");
        self.state = ClientState::Ready;
        Ok(())
    }

    /// Inject a simulated driver input event (§4.5). `spezial` defaults to
    /// `0.0` when `None`, per §9's resolution of the Spezial open question.
    pub fn send_input(
        &mut self,
        taster: u16,
        kommando: u16,
        aktion: u16,
        position: u16,
        spezial: Option<f32>,
    ) -> Result<(), Error> {
        let action = Node::new(constant::ACTION_NODE_ID)
            .push_attr(Attribute::new(constant::action::TASTER, taster.encode()))
            .push_attr(Attribute::new(
                constant::action::KOMMANDO,
                kommando.encode(),
            ))
            .push_attr(Attribute::new(constant::action::AKTION, aktion.encode()))
            .push_attr(Attribute::new(
                constant::action::POSITION,
                position.encode(),
            ))
            .push_attr(Attribute::new(
                constant::action::SPEZIAL,
                spezial.unwrap_or(0.0).encode(),
            ));
        let input = Node::new(Command::Input as u16).push_node(action);
        let root = Node::new(constant::MSG_TYPE_FAHRPULT).push_node(input);
        write_message(&mut self.transport, &root)
    }

    /// Read and dispatch one fahrpult-phase message. Must only be called
    /// once [`Self::state`] is [`ClientState::Ready`].
    pub fn receive_message(&mut self) -> Result<Message, Error> {
        let root = read_message(&mut self.transport)?;
        if root.id != constant::MSG_TYPE_FAHRPULT {
            self.state = ClientState::Closed;
            log::error!("client: expected fahrpult-phase root, got id {}", root.id);
            return Err(Error::ProtocolError(format!(
                "expected fahrpult-phase root, got id {}",
                root.id
            )));
        }
        dispatch_message(root)
    }
}

fn required<T: AttributeValue>(node: &Node, id: u16) -> Result<T, Error> {
    let attr = node
        .attr(id)
        .ok_or_else(|| Error::ProtocolError(format!("missing required attribute {}", id)))?;
    T::decode(&attr.payload)
}
