use bech32::{Bech32m, Hrp};
use kiwi_core::blockchain::sized_bytes::Bytes32;
use std::io::{Error, ErrorKind};

fn parse_prefix(prefix: &str) -> Result<Hrp, Error> {
    Hrp::parse(prefix).map_err(|e| {
        Error::new(
            ErrorKind::InvalidInput,
            format!("Invalid address prefix ({prefix}): {e}"),
        )
    })
}

/// Checks that `prefix` can be used as the human readable part of an address.
pub fn validate_prefix(prefix: &str) -> Result<(), Error> {
    parse_prefix(prefix).map(|_| ())
}

pub fn encode_puzzle_hash(puzzle_hash: &Bytes32, prefix: &str) -> Result<String, Error> {
    bech32::encode::<Bech32m>(parse_prefix(prefix)?, puzzle_hash.as_slice())
        .map_err(|e| Error::new(ErrorKind::InvalidInput, format!("{e:?}")))
}

/// Decodes an address into its puzzle hash and the prefix it was encoded with.
pub fn decode_address(address: &str) -> Result<(String, Bytes32), Error> {
    let (hrp, data) = bech32::decode(address).map_err(|e| {
        Error::new(
            ErrorKind::InvalidInput,
            format!("Error Decoding address: ({address}): {e}"),
        )
    })?;
    let puzzle_hash = Bytes32::from_slice(&data).map_err(|e| {
        Error::new(
            ErrorKind::InvalidInput,
            format!("Error Decoding address: ({address}): {e}"),
        )
    })?;
    Ok((hrp.to_lowercase(), puzzle_hash))
}

pub fn decode_puzzle_hash(address: &str) -> Result<Bytes32, Error> {
    decode_address(address).map(|(_, puzzle_hash)| puzzle_hash)
}
