// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

use super::AttributeValue;
use crate::error::Error;
use byteorder::{ByteOrder, LittleEndian};

impl AttributeValue for u8 {
    fn decode(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != 1 {
            log::warn!("u8 attribute: expected 1 byte, got {}", bytes.len());
            return Err(Error::SchemaError(format!(
                "u8 attribute: expected 1 byte, got {}",
                bytes.len()
            )));
        }
        Ok(bytes[0])
    }

    fn encode(&self) -> Vec<u8> {
        vec![*self]
    }
}

impl AttributeValue for u16 {
    fn decode(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != 2 {
            log::warn!("u16 attribute: expected 2 bytes, got {}", bytes.len());
            return Err(Error::SchemaError(format!(
                "u16 attribute: expected 2 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(LittleEndian::read_u16(bytes))
    }

    fn encode(&self) -> Vec<u8> {
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, *self);
        buf.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u16_round_trips() {
        let v: u16 = 43981;
        assert_eq!(u16::decode(&v.encode()).unwrap(), v);
    }

    #[test]
    fn u8_round_trips() {
        let v: u8 = 200;
        assert_eq!(u8::decode(&v.encode()).unwrap(), v);
    }

    #[test]
    fn u16_wrong_width_is_schema_error() {
        assert!(matches!(u16::decode(&[1]), Err(Error::SchemaError(_))));
    }
}
