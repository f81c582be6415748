//! Identifier generation

use bech32::Bech32m;
use uuid7::uuid7;

/// Human-readable prefixes for the ids minted in one editing session.
pub const REQUISITION_HRP: &str = "req_";
pub const ITEM_HRP: &str = "item_";
pub const ENTRY_HRP: &str = "entry_";

// construct a unique id then encode using bech32
pub fn new_uuid_to_bech32(hrp: &str) -> anyhow::Result<String> {
    let hrp = bech32::Hrp::parse(hrp)?;
    let encode = bech32::encode::<Bech32m>(hrp, uuid7().as_bytes())?;
    Ok(encode)
}

/// Source of unique ids for items, queue entries and requisitions. Injected
/// so tests can mint predictable ids; production uses [`SessionIds`].
pub trait IdGen {
    fn next(&mut self, hrp: &str) -> String;
}

/// Production id source: uuid7 payloads bech32m-encoded behind the given
/// prefix. Uniqueness comes from the uuid; the prefix only aids debugging.
pub struct SessionIds;

impl IdGen for SessionIds {
    fn next(&mut self, hrp: &str) -> String {
        // The fixed prefixes above always parse; a caller-supplied hrp that
        // does not falls back to the bare uuid string.
        new_uuid_to_bech32(hrp).unwrap_or_else(|_| uuid7().to_string())
    }
}
