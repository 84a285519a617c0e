// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use filecoin_client_utils::{AmountError, format_scaled_amount, parse_scaled_amount};
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct CidRef {
    #[serde(rename = "/")]
    pub cid: String,
}

impl CidRef {
    pub fn new(cid: impl Into<String>) -> Self {
        Self { cid: cid.into() }
    }
}

impl fmt::Display for CidRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cid)
    }
}

/// Canonically ordered block CIDs identifying a tipset.
pub type TipSetKey = Vec<CidRef>;

/// Robust or ID address in its string form, e.g. `f1...` or `f01234`.
pub type Address = String;

/// An amount of attoFIL. Encoded on the wire as a decimal string.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct TokenAmount(pub BigInt);

impl TokenAmount {
    /// Number of decimals between FIL and attoFIL.
    pub const DECIMALS: u32 = 18;

    /// Parses a FIL amount such as `"1.5"` into attoFIL.
    pub fn from_fil(amount: &str) -> Result<Self, AmountError> {
        parse_scaled_amount(amount, Self::DECIMALS).map(TokenAmount)
    }

    pub fn atto(&self) -> &BigInt {
        &self.0
    }

    /// Renders the amount in FIL without trailing zeros.
    pub fn to_fil_string(&self) -> String {
        format_scaled_amount(&self.0, Self::DECIMALS)
    }
}

impl From<BigInt> for TokenAmount {
    fn from(value: BigInt) -> Self {
        TokenAmount(value)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        stringify::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        stringify::deserialize(deserializer).map(TokenAmount)
    }
}

/// Raw bytes, encoded on the wire as base64. `null` decodes to empty bytes and
/// empty bytes encode to `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bytes(pub Vec<u8>);

impl From<Vec<u8>> for Bytes {
    fn from(value: Vec<u8>) -> Self {
        Bytes(value)
    }
}

impl From<Bytes> for Vec<u8> {
    fn from(value: Bytes) -> Self {
        value.0
    }
}

impl Serialize for Bytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        base64_bytes::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Bytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        base64_bytes::deserialize(deserializer).map(Bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TipSet {
    #[serde(rename = "Cids")]
    pub cids: TipSetKey,

    #[serde(rename = "Blocks")]
    pub blocks: Vec<BlockHeader>,

    #[serde(rename = "Height")]
    pub height: i64,
}

impl TipSet {
    pub fn key(&self) -> TipSetKey {
        self.cids.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BlockHeader {
    #[serde(rename = "Miner")]
    pub miner: Address,

    #[serde(rename = "Parents")]
    pub parents: TipSetKey,

    #[serde(rename = "ParentWeight")]
    pub parent_weight: TokenAmount,

    #[serde(rename = "Height")]
    pub height: i64,

    #[serde(rename = "ParentStateRoot")]
    pub parent_state_root: CidRef,

    #[serde(rename = "ParentMessageReceipts")]
    pub parent_message_receipts: CidRef,

    #[serde(rename = "Messages")]
    pub messages: CidRef,

    #[serde(rename = "Timestamp")]
    pub timestamp: u64,

    #[serde(rename = "ParentBaseFee")]
    pub parent_base_fee: TokenAmount,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Message {
    #[serde(rename = "Version")]
    pub version: u64,

    #[serde(rename = "To")]
    pub to: Address,

    #[serde(rename = "From")]
    pub from: Address,

    #[serde(rename = "Nonce")]
    pub nonce: u64,

    #[serde(rename = "Value")]
    pub value: TokenAmount,

    #[serde(rename = "GasLimit")]
    pub gas_limit: i64,

    #[serde(rename = "GasFeeCap")]
    pub gas_fee_cap: TokenAmount,

    #[serde(rename = "GasPremium")]
    pub gas_premium: TokenAmount,

    #[serde(rename = "Method")]
    pub method: u64,

    #[serde(rename = "Params", default)]
    pub params: Bytes,

    #[serde(rename = "CID", default, skip_serializing_if = "Option::is_none")]
    pub cid: Option<CidRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Signature {
    /// 1 for secp256k1, 2 for BLS.
    #[serde(rename = "Type")]
    pub sig_type: u8,

    #[serde(rename = "Data")]
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SignedMessage {
    #[serde(rename = "Message")]
    pub message: Message,

    #[serde(rename = "Signature")]
    pub signature: Signature,

    #[serde(rename = "CID", default, skip_serializing_if = "Option::is_none")]
    pub cid: Option<CidRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageSendSpec {
    #[serde(rename = "MaxFee")]
    pub max_fee: TokenAmount,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlockMessages {
    #[serde(rename = "BlsMessages", default)]
    pub bls_messages: Vec<Message>,

    #[serde(rename = "SecpkMessages", default)]
    pub secpk_messages: Vec<SignedMessage>,

    #[serde(rename = "Cids", default)]
    pub cids: Vec<CidRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageReceipt {
    #[serde(rename = "ExitCode")]
    pub exit_code: i64,

    #[serde(rename = "Return", default)]
    pub return_data: Bytes,

    #[serde(rename = "GasUsed")]
    pub gas_used: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadChangeType {
    Revert,
    Apply,
    Current,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HeadChange {
    #[serde(rename = "Type")]
    pub change: HeadChangeType,

    #[serde(rename = "Val")]
    pub val: TipSet,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IpldObject {
    #[serde(rename = "Cid")]
    pub cid: CidRef,

    #[serde(rename = "Obj")]
    pub obj: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ObjStat {
    #[serde(rename = "Size")]
    pub size: u64,

    #[serde(rename = "Links")]
    pub links: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Actor {
    #[serde(rename = "Code")]
    pub code: CidRef,

    #[serde(rename = "Head")]
    pub head: CidRef,

    #[serde(rename = "Nonce")]
    pub nonce: u64,

    #[serde(rename = "Balance")]
    pub balance: TokenAmount,
}

/// Result of replaying a message on top of a tipset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InvocResult {
    #[serde(rename = "MsgCid")]
    pub msg_cid: CidRef,

    #[serde(rename = "Msg")]
    pub msg: Message,

    #[serde(rename = "MsgRct")]
    pub msg_rct: Option<MessageReceipt>,

    #[serde(rename = "Error", default)]
    pub error: String,

    /// Execution time in nanoseconds.
    #[serde(rename = "Duration", default)]
    pub duration: i64,
}

/// Usage: `#[serde(with = "stringify")]`
pub mod stringify {
    use super::*;
    use std::fmt::Display;
    use std::str::FromStr;

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

/// Usage: `#[serde(with = "base64_bytes")]`
pub mod base64_bytes {
    use super::*;
    use base64::{Engine as _, engine::general_purpose};

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_empty() {
            serializer.serialize_none()
        } else {
            serializer.serialize_str(&general_purpose::STANDARD.encode(value))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(encoded) => general_purpose::STANDARD
                .decode(encoded)
                .map_err(serde::de::Error::custom),
            None => Ok(Vec::new()),
        }
    }
}
