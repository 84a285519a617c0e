// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use anyhow::Result;
use async_trait::async_trait;
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ArrayParams;
use jsonrpsee::http_client::HttpClient;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Sends a single JSON-RPC request and decodes its result.
///
/// This is the only capability [`Client`](crate::Client) needs from the network
/// layer. Framing, connection reuse and timeouts belong to the implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Calls `method` with positional `params` and deserializes the result into `R`.
    async fn request<R>(&self, method: &str, params: Vec<Value>) -> Result<R>
    where
        R: DeserializeOwned + Send;
}

#[async_trait]
impl Transport for HttpClient {
    async fn request<R>(&self, method: &str, params: Vec<Value>) -> Result<R>
    where
        R: DeserializeOwned + Send,
    {
        let mut array = ArrayParams::new();
        for param in params {
            array.insert(param)?;
        }

        let response: R = ClientT::request(self, method, array).await?;
        Ok(response)
    }
}
