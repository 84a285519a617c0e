// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Typed client for the Filecoin node JSON-RPC API.
//!
//! Every method builds a namespaced method name, serializes its arguments as
//! positional parameters and hands them to a [`Transport`]. The default transport
//! is a `jsonrpsee` HTTP client, see [`Client::connect`].

pub mod config;
pub mod transport;
pub mod types;

pub use crate::config::{ClientConfig, ConfigError, Network};
pub use crate::transport::Transport;
pub use crate::types::*;
use anyhow::{Context, Result};
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Serializes each argument into a positional JSON parameter.
macro_rules! params {
    ($($param:expr),* $(,)?) => {
        vec![$(serde_json::to_value($param)?),*]
    };
}

pub struct Client<T = HttpClient> {
    transport: T,
    namespace: String,
}

impl Client<HttpClient> {
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let transport = HttpClientBuilder::default()
            .request_timeout(config.request_timeout)
            .build(&config.endpoint)?;
        Ok(Client::new(transport).with_namespace(config.namespace.clone()))
    }
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            namespace: config::DEFAULT_NAMESPACE.to_string(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fully qualified method name, e.g. `Filecoin.ChainHead`.
    pub fn method(&self, name: &str) -> String {
        format!("{}.{}", self.namespace, name)
    }

    async fn call<R>(&self, name: &str, params: Vec<Value>) -> Result<R>
    where
        R: DeserializeOwned + Send,
    {
        let method = self.method(name);
        log::trace!("calling {} with {} params", method, params.len());
        self.transport
            .request(&method, params)
            .await
            .with_context(|| format!("{method} request failed"))
    }

    /// Reads a message referenced by the specified CID from the chain blockstore.
    pub async fn chain_get_message(&self, cid: &CidRef) -> Result<Option<Message>> {
        self.call("ChainGetMessage", params![cid]).await
    }

    /// Returns messages stored in the specified block.
    pub async fn chain_get_block_messages(&self, cid: &CidRef) -> Result<Option<BlockMessages>> {
        self.call("ChainGetBlockMessages", params![cid]).await
    }

    /// Returns the current head of the chain.
    pub async fn chain_head(&self) -> Result<Option<TipSet>> {
        self.call("ChainHead", params![]).await
    }

    /// Looks back for a tipset at the specified epoch. If there are no blocks at the
    /// specified epoch, a tipset at an earlier epoch will be returned.
    pub async fn chain_get_tipset_by_height(
        &self,
        height: i64,
        tsk: &TipSetKey,
    ) -> Result<Option<TipSet>> {
        self.call("ChainGetTipSetByHeight", params![height, tsk]).await
    }

    /// Returns a CAR dump of chain data.
    pub async fn chain_export(&self, tsk: &TipSetKey) -> Result<Vec<u8>> {
        let bytes: Bytes = self.call("ChainExport", params![tsk]).await?;
        Ok(bytes.into())
    }

    /// Returns the block specified by the given CID.
    pub async fn chain_get_block(&self, cid: &CidRef) -> Result<Option<BlockHeader>> {
        self.call("ChainGetBlock", params![cid]).await
    }

    /// Returns the genesis tipset.
    pub async fn chain_get_genesis(&self) -> Result<Option<TipSet>> {
        self.call("ChainGetGenesis", params![]).await
    }

    /// Resolves an IPLD path such as `/ipfs/<cid>/...` to the object it points at.
    pub async fn chain_get_node(&self, path: &str) -> Result<Option<IpldObject>> {
        self.call("ChainGetNode", params![path]).await
    }

    /// Returns messages stored in the parent tipset of the specified block.
    pub async fn chain_get_parent_messages(&self, cid: &CidRef) -> Result<Vec<Message>> {
        let messages: Option<Vec<Message>> =
            self.call("ChainGetParentMessages", params![cid]).await?;
        Ok(messages.unwrap_or_default())
    }

    /// Returns receipts for messages in the parent tipset of the specified block.
    pub async fn chain_get_parent_receipts(&self, cid: &CidRef) -> Result<Vec<MessageReceipt>> {
        let receipts: Option<Vec<MessageReceipt>> =
            self.call("ChainGetParentReceipts", params![cid]).await?;
        Ok(receipts.unwrap_or_default())
    }

    /// Returns the revert/apply operations needed to get from one tipset to another.
    pub async fn chain_get_path(
        &self,
        from: &TipSetKey,
        to: &TipSetKey,
    ) -> Result<Vec<HeadChange>> {
        let changes: Option<Vec<HeadChange>> =
            self.call("ChainGetPath", params![from, to]).await?;
        Ok(changes.unwrap_or_default())
    }

    /// Samples the beacon for randomness.
    pub async fn chain_get_randomness_from_beacon(
        &self,
        tsk: &TipSetKey,
        personalization: i64,
        rand_epoch: i64,
        entropy: &[u8],
    ) -> Result<Vec<u8>> {
        let entropy = Bytes(entropy.to_vec());
        let bytes: Bytes = self
            .call(
                "ChainGetRandomnessFromBeacon",
                params![tsk, personalization, rand_epoch, &entropy],
            )
            .await?;
        Ok(bytes.into())
    }

    /// Samples the chain for randomness.
    pub async fn chain_get_randomness_from_tickets(
        &self,
        tsk: &TipSetKey,
        personalization: i64,
        rand_epoch: i64,
        entropy: &[u8],
    ) -> Result<Vec<u8>> {
        let entropy = Bytes(entropy.to_vec());
        let bytes: Bytes = self
            .call(
                "ChainGetRandomnessFromTickets",
                params![tsk, personalization, rand_epoch, &entropy],
            )
            .await?;
        Ok(bytes.into())
    }

    /// Returns the tipset specified by the given key.
    pub async fn chain_get_tipset(&self, tsk: &TipSetKey) -> Result<Option<TipSet>> {
        self.call("ChainGetTipSet", params![tsk]).await
    }

    /// Checks if a given CID exists in the chain blockstore.
    pub async fn chain_has_obj(&self, cid: &CidRef) -> Result<bool> {
        self.call("ChainHasObj", params![cid]).await
    }

    /// Reads the IPLD node referenced by the specified CID and returns its raw bytes.
    pub async fn chain_read_obj(&self, cid: &CidRef) -> Result<Vec<u8>> {
        let bytes: Bytes = self.call("ChainReadObj", params![cid]).await?;
        Ok(bytes.into())
    }

    /// Forcefully sets the current chain head. Use with caution.
    pub async fn chain_set_head(&self, tsk: &TipSetKey) -> Result<()> {
        self.call("ChainSetHead", params![tsk]).await
    }

    /// Returns statistics about the graph referenced by `obj`. If `base` is given,
    /// the returned stat is a diff between the two objects.
    pub async fn chain_stat_obj(&self, obj: &CidRef, base: Option<&CidRef>) -> Result<ObjStat> {
        self.call("ChainStatObj", params![obj, base]).await
    }

    /// Computes the weight of the specified tipset.
    pub async fn chain_tipset_weight(&self, tsk: &TipSetKey) -> Result<TokenAmount> {
        self.call("ChainTipSetWeight", params![tsk]).await
    }

    /// Replays the message with the given CID on top of the specified tipset.
    pub async fn state_replay(&self, tsk: &TipSetKey, cid: &CidRef) -> Result<Option<InvocResult>> {
        self.call("StateReplay", params![tsk, cid]).await
    }

    /// Returns the balance of the given address at the current head of the chain.
    pub async fn wallet_balance(&self, address: &str) -> Result<TokenAmount> {
        self.call("WalletBalance", params![address]).await
    }

    /// Returns the actor state of `address` at the specified tipset.
    pub async fn state_get_actor(&self, address: &str, tsk: &TipSetKey) -> Result<Option<Actor>> {
        self.call("StateGetActor", params![address, tsk]).await
    }

    /// Estimates the gas used by the message. Fails if the message fails to execute.
    pub async fn gas_estimate_gas_limit(&self, message: &Message, tsk: &TipSetKey) -> Result<i64> {
        self.call("GasEstimateGasLimit", params![message, tsk]).await
    }

    /// Fills in unset gas fields of the message with estimated values.
    pub async fn gas_estimate_message_gas(
        &self,
        message: &Message,
        spec: Option<&MessageSendSpec>,
        tsk: &TipSetKey,
    ) -> Result<Message> {
        self.call("GasEstimateMessageGas", params![message, spec, tsk]).await
    }

    /// Pushes a signed message to the mempool and returns its CID.
    pub async fn mpool_push(&self, message: &SignedMessage) -> Result<CidRef> {
        self.call("MpoolPush", params![message]).await
    }
}
