// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! Runtime receive layer: dispatches a framed fahrpult-phase message into a
//! typed variant and exposes typed accessors over it (§4.4.4).

use crate::codec::Node;
use crate::constant::{self, Command};
use crate::error::Error;
use crate::field::{AttributeValue, Sifa};
use std::convert::TryFrom;

/// A received, dispatched fahrpult-phase message.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Telemetry(TelemetryMessage),
    InputOperation(InputOperationMessage),
    ProgramStatus(ProgramStatusMessage),
}

/// `DATA_FTD`: a batch of fuehrerstand-data (telemetry) attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryMessage {
    node: Node,
}

impl TelemetryMessage {
    /// Typed read of attribute `id` within this message's command node.
    /// Returns `Ok(None)` if the attribute is absent; `Err(SchemaError)` if
    /// present but the wrong width for `T`.
    pub fn get<T: AttributeValue>(&self, id: u16) -> Result<Option<T>, Error> {
        match self.node.attr(id) {
            Some(attr) => T::decode(&attr.payload).map(Some).map_err(|e| {
                log::warn!("telemetry: attribute {} failed to decode: {}", id, e);
                e
            }),
            None => Ok(None),
        }
    }

    /// The `Sifa` composite sub-node (id [`constant::sifa::NODE_ID`]), if present.
    pub fn sifa(&self) -> Result<Option<Sifa>, Error> {
        match self.node.node(constant::sifa::NODE_ID) {
            Some(node) => Sifa::try_from(node).map(Some).map_err(|e| {
                log::warn!("telemetry: Sifa sub-node failed to decode: {}", e);
                e
            }),
            None => Ok(None),
        }
    }

    /// The underlying command node, for access not covered by a typed
    /// accessor above.
    pub fn raw(&self) -> &Node {
        &self.node
    }
}

/// `DATA_PROG`: program/timetable status attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramStatusMessage {
    node: Node,
}

impl ProgramStatusMessage {
    pub fn get<T: AttributeValue>(&self, id: u16) -> Result<Option<T>, Error> {
        match self.node.attr(id) {
            Some(attr) => T::decode(&attr.payload).map(Some).map_err(|e| {
                log::warn!("program status: attribute {} failed to decode: {}", id, e);
                e
            }),
            None => Ok(None),
        }
    }

    pub fn raw(&self) -> &Node {
        &self.node
    }
}

/// A single driver input/action record: one child node of a
/// `DATA_OPERATION` message with id [`constant::ACTION_NODE_ID`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionRecord {
    pub taster: u16,
    pub kommando: u16,
    pub aktion: u16,
    pub position: u16,
    pub spezial: f32,
}

/// `DATA_OPERATION`: a batch of driver input events.
///
/// Iterating yields one [`ActionRecord`] per child node with id
/// [`constant::ACTION_NODE_ID`], in wire order. Child nodes with id
/// [`constant::KOMBISCHALTER_NODE_ID`] ("Kombischalter") are silently
/// skipped, matching the original implementation (§4.4.4, §9); use
/// [`InputOperationMessage::raw`] to recover them.
#[derive(Debug, Clone, PartialEq)]
pub struct InputOperationMessage {
    node: Node,
}

impl InputOperationMessage {
    /// Iterate the action records in this message, skipping Kombischalter
    /// nodes.
    pub fn actions(&self) -> impl Iterator<Item = Result<ActionRecord, Error>> + '_ {
        self.node
            .nodes_with_id(constant::ACTION_NODE_ID)
            .map(|n| {
                Ok(ActionRecord {
                    taster: required(n, constant::action::TASTER)?,
                    kommando: required(n, constant::action::KOMMANDO)?,
                    aktion: required(n, constant::action::AKTION)?,
                    position: required(n, constant::action::POSITION)?,
                    spezial: required(n, constant::action::SPEZIAL)?,
                })
            })
    }

    /// The underlying command node, including any skipped Kombischalter
    /// (id [`constant::KOMBISCHALTER_NODE_ID`]) child nodes.
    pub fn raw(&self) -> &Node {
        &self.node
    }
}

fn required<T: AttributeValue>(node: &Node, id: u16) -> Result<T, Error> {
    let attr = node.attr(id).ok_or_else(|| {
        log::warn!("action record: missing attribute {}", id);
        Error::SchemaError(format!("action record: missing attribute {}", id))
    })?;
    T::decode(&attr.payload)
}

/// Dispatch a received fahrpult-phase message on the id of its single
/// command child (§4.4.4). `node` must be the already-unwrapped top-level
/// node (id [`constant::MSG_TYPE_FAHRPULT`]).
pub fn dispatch_message(node: Node) -> Result<Message, Error> {
    let command_id = node
        .nodes
        .first()
        .ok_or_else(|| Error::ProtocolError("fahrpult message has no command child".into()))?
        .id;

    match Command::try_from(command_id) {
        Ok(Command::DataFtd) => Ok(Message::Telemetry(TelemetryMessage {
            node: take_command(node),
        })),
        Ok(Command::DataOperation) => Ok(Message::InputOperation(InputOperationMessage {
            node: take_command(node),
        })),
        Ok(Command::DataProg) => Ok(Message::ProgramStatus(ProgramStatusMessage {
            node: take_command(node),
        })),
        Ok(Command::Control) => {
            log::warn!("discarding CONTROL command: no implemented schema");
            Err(Error::ProtocolError(
                "CONTROL command received but has no implemented schema".into(),
            ))
        }
        Ok(Command::Graphic) => {
            log::warn!("discarding GRAPHIC command: no implemented schema");
            Err(Error::ProtocolError(
                "GRAPHIC command received but has no implemented schema".into(),
            ))
        }
        Ok(other) => {
            log::warn!("discarding unexpected command in fahrpult message: {:?}", other);
            Err(Error::ProtocolError(format!(
                "unexpected command in fahrpult message: {:?}",
                other
            )))
        }
        Err(id) => {
            log::warn!("discarding message with unknown command id {}", id);
            Err(Error::ProtocolError(format!("unknown command id {}", id)))
        }
    }
}

fn take_command(mut node: Node) -> Node {
    node.nodes.remove(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Attribute;

    fn ftd_message(attrs: Vec<Attribute>) -> Node {
        let mut command = Node::new(constant::Command::DataFtd as u16);
        command.attributes = attrs;
        Node::new(constant::MSG_TYPE_FAHRPULT).push_node(command)
    }

    #[test]
    fn dispatches_telemetry() {
        let speed: f32 = 11.83;
        let node = ftd_message(vec![Attribute::new(
            constant::fs::GESCHWINDIGKEIT,
            speed.encode(),
        )]);
        let msg = dispatch_message(node).unwrap();
        match msg {
            Message::Telemetry(t) => {
                let got: Option<f32> = t.get(constant::fs::GESCHWINDIGKEIT).unwrap();
                assert_eq!(got, Some(speed));
            }
            _ => panic!("expected Telemetry"),
        }
    }

    #[test]
    fn unknown_command_is_protocol_error() {
        let node = Node::new(constant::MSG_TYPE_FAHRPULT).push_node(Node::new(0x9999));
        assert!(matches!(
            dispatch_message(node),
            Err(Error::ProtocolError(_))
        ));
    }

    #[test]
    fn input_iterator_skips_kombischalter() {
        let mut command = Node::new(constant::Command::DataOperation as u16);
        let action = Node::new(constant::ACTION_NODE_ID)
            .push_attr(Attribute::new(constant::action::TASTER, 1u16.encode()))
            .push_attr(Attribute::new(constant::action::KOMMANDO, 0u16.encode()))
            .push_attr(Attribute::new(constant::action::AKTION, 7u16.encode()))
            .push_attr(Attribute::new(constant::action::POSITION, 10u16.encode()))
            .push_attr(Attribute::new(constant::action::SPEZIAL, 0.0f32.encode()));
        let kombi = Node::new(constant::KOMBISCHALTER_NODE_ID);
        command.nodes.push(action);
        command.nodes.push(kombi);
        let node = Node::new(constant::MSG_TYPE_FAHRPULT).push_node(command);

        let msg = dispatch_message(node).unwrap();
        match msg {
            Message::InputOperation(op) => {
                let records: Vec<_> = op.actions().collect::<Result<_, _>>().unwrap();
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].taster, 1);
                assert_eq!(op.raw().nodes.len(), 2);
            }
            _ => panic!("expected InputOperation"),
        }
    }
}
