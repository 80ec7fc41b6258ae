// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

use super::AttributeValue;
use crate::error::Error;
use byteorder::{ByteOrder, LittleEndian};

impl AttributeValue for f32 {
    fn decode(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != 4 {
            log::warn!("f32 attribute: expected 4 bytes, got {}", bytes.len());
            return Err(Error::SchemaError(format!(
                "f32 attribute: expected 4 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(LittleEndian::read_f32(bytes))
    }

    fn encode(&self) -> Vec<u8> {
        let mut buf = [0u8; 4];
        LittleEndian::write_f32(&mut buf, *self);
        buf.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f32_round_trips() {
        let v: f32 = 11.83;
        assert_eq!(f32::decode(&v.encode()).unwrap(), v);
    }

    #[test]
    fn f32_wrong_width_is_schema_error() {
        assert!(matches!(f32::decode(&[1, 2, 3]), Err(Error::SchemaError(_))));
    }
}
