// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

use super::AttributeValue;
use crate::error::Error;

impl AttributeValue for String {
    fn decode(bytes: &[u8]) -> Result<Self, Error> {
        String::from_utf8(bytes.to_vec()).map_err(|e| {
            log::warn!("string attribute: not valid utf-8: {}", e);
            Error::SchemaError(format!("string attribute: not valid utf-8: {}", e))
        })
    }

    fn encode(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_round_trips() {
        let v = String::from("3.1.2.0");
        assert_eq!(String::decode(&v.encode()).unwrap(), v);
    }

    #[test]
    fn invalid_utf8_is_schema_error() {
        assert!(matches!(
            String::decode(&[0xFF, 0xFE]),
            Err(Error::SchemaError(_))
        ));
    }
}
