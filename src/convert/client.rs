use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::error::{AppError, Result};

#[derive(Debug, Serialize)]
struct ConvertRequest<'a> {
    source: &'a str,
    target: &'a str,
    text: &'a str,
    nativize: bool,
    #[serde(rename = "preOptions")]
    pre_options: &'a [&'a str],
    #[serde(rename = "postOptions")]
    post_options: &'a [&'a str],
}

#[derive(Debug, Serialize)]
struct ConvertLoopRequest<'a> {
    source: &'a str,
    targets: &'a [&'a str],
    text: &'a str,
    nativize: bool,
    #[serde(rename = "preOptions")]
    pre_options: &'a [&'a str],
    #[serde(rename = "postOptions")]
    post_options: &'a [&'a str],
}

/// Remote script-conversion service. A trait so the pipelines can be tested
/// against scripted converters without a network.
#[async_trait]
pub trait TitleConverter: Send + Sync {
    /// Convert `text` into a single target script. Returns the converted
    /// string as-is; callers decide whether it is usable.
    async fn convert_one(
        &self,
        source: &str,
        target: &str,
        text: &str,
        post_options: &[&str],
    ) -> Result<String>;

    /// Convert `text` into several target scripts in one round trip. Returns
    /// a map from target-script name to converted string.
    async fn convert_multi(
        &self,
        source: &str,
        targets: &[&str],
        text: &str,
    ) -> Result<HashMap<String, String>>;
}

pub struct AksharamukhaClient {
    client: Client,
    base_url: String,
}

impl AksharamukhaClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self { client, base_url }
    }
}

#[async_trait]
impl TitleConverter for AksharamukhaClient {
    async fn convert_one(
        &self,
        source: &str,
        target: &str,
        text: &str,
        post_options: &[&str],
    ) -> Result<String> {
        let request = ConvertRequest {
            source,
            target,
            text,
            nativize: false,
            pre_options: &[],
            post_options,
        };

        let response = self
            .client
            .post(format!("{}/api/convert", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ConvertApi(format!(
                "convert {} -> {}: HTTP {}",
                source,
                target,
                response.status()
            )));
        }

        Ok(response.text().await?)
    }

    async fn convert_multi(
        &self,
        source: &str,
        targets: &[&str],
        text: &str,
    ) -> Result<HashMap<String, String>> {
        let request = ConvertLoopRequest {
            source,
            targets,
            text,
            nativize: true,
            pre_options: &[],
            post_options: &[],
        };

        let response = self
            .client
            .post(format!("{}/api/convert_loop_tgt", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ConvertApi(format!(
                "convert {} -> {:?}: HTTP {}",
                source,
                targets,
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}
