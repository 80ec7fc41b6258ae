// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! `Sifa` (vigilance-control) composite sub-node, carried under telemetry
//! attribute id [`crate::constant::fs::SIFA`].

use crate::codec::Node;
use crate::constant::sifa;
use crate::error::Error;
use std::convert::TryFrom;

/// A validated view over a `Sifa` sub-node (id 100). Constructing one
/// checks the node id and extracts every required sub-attribute; a missing
/// sub-attribute is a [`Error::SchemaError`], matching §4.3's composite-node
/// rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Sifa {
    pub bauart: String,
    pub leuchtmelder: u8,
    pub hupe: u8,
    pub hauptschalter: u8,
    pub stoerschalter: u8,
    pub luftabsperrhahn: u8,
}

impl TryFrom<&Node> for Sifa {
    type Error = Error;

    fn try_from(node: &Node) -> Result<Self, Error> {
        if node.id != sifa::NODE_ID {
            log::warn!("Sifa: expected node id {}, got {}", sifa::NODE_ID, node.id);
            return Err(Error::SchemaError(format!(
                "Sifa: expected node id {}, got {}",
                sifa::NODE_ID,
                node.id
            )));
        }

        Ok(Sifa {
            bauart: required(node, sifa::BAUART)?,
            leuchtmelder: required(node, sifa::LEUCHTMELDER)?,
            hupe: required(node, sifa::HUPE)?,
            hauptschalter: required(node, sifa::HAUPTSCHALTER)?,
            stoerschalter: required(node, sifa::STOERSCHALTER)?,
            luftabsperrhahn: required(node, sifa::LUFTABSPERRHAHN)?,
        })
    }
}

fn required<T: crate::field::AttributeValue>(node: &Node, id: u16) -> Result<T, Error> {
    let attr = node.attr(id).ok_or_else(|| {
        log::warn!("Sifa: missing required attribute {}", id);
        Error::SchemaError(format!("Sifa: missing required attribute {}", id))
    })?;
    T::decode(&attr.payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Attribute;

    fn full_node() -> Node {
        Node::new(sifa::NODE_ID)
            .push_attr(Attribute::new(sifa::BAUART, b"Sifa I60R".to_vec()))
            .push_attr(Attribute::new(sifa::LEUCHTMELDER, vec![1]))
            .push_attr(Attribute::new(sifa::HUPE, vec![0]))
            .push_attr(Attribute::new(sifa::HAUPTSCHALTER, vec![1]))
            .push_attr(Attribute::new(sifa::STOERSCHALTER, vec![0]))
            .push_attr(Attribute::new(sifa::LUFTABSPERRHAHN, vec![1]))
    }

    #[test]
    fn extracts_all_fields() {
        let sifa = Sifa::try_from(&full_node()).unwrap();
        assert_eq!(sifa.bauart, "Sifa I60R");
        assert_eq!(sifa.leuchtmelder, 1);
        assert_eq!(sifa.hupe, 0);
    }

    #[test]
    fn wrong_node_id_is_schema_error() {
        let node = Node::new(1);
        assert!(matches!(Sifa::try_from(&node), Err(Error::SchemaError(_))));
    }

    #[test]
    fn missing_attribute_is_schema_error() {
        let mut node = full_node();
        node.attributes.retain(|a| a.id != sifa::HUPE);
        assert!(matches!(Sifa::try_from(&node), Err(Error::SchemaError(_))));
    }
}
