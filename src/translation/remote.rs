use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{TranslationRoute, Translator};
use crate::config::TranslatorConfig;
use crate::http::ApiStatusError;

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    data: Option<TokenData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenData {
    access_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateForm<'a> {
    text: &'a str,
    from_lang: &'a str,
    to_lang: &'a str,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: Option<String>,
}

/// Client for the token-then-translate HTTP API.
///
/// Every call fetches a fresh token. Failures are returned as-is: there is
/// no retry and no timeout beyond reqwest's defaults.
pub struct RemoteTranslator {
    client: Client,
    auth_endpoint: String,
    username: String,
    password: String,
    route: TranslationRoute,
}

impl RemoteTranslator {
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            auth_endpoint: config.auth_endpoint.clone(),
            username: config.username.clone(),
            password: config.get_password().unwrap_or_default(),
            route: TranslationRoute {
                endpoint: config.translate_endpoint.clone(),
                from_lang: config.from.clone(),
                to_lang: config.to.clone(),
                model: config.model.clone(),
            },
        })
    }

    async fn fetch_token(&self) -> Result<String> {
        let response = self
            .client
            .post(&self.auth_endpoint)
            .json(&TokenRequest {
                username: &self.username,
                password: &self.password,
            })
            .send()
            .await
            .with_context(|| format!("Failed to connect to auth endpoint: {}", self.auth_endpoint))?;

        let body = read_body(response).await?;
        parse_token(&body)
    }

    async fn submit(&self, token: &str, text: &str) -> Result<String> {
        let url = &self.route.endpoint;
        let response = self
            .client
            .post(url)
            .header("Authorization", token)
            .form(&TranslateForm {
                text,
                from_lang: &self.route.from_lang,
                to_lang: &self.route.to_lang,
                model: &self.route.model,
            })
            .send()
            .await
            .with_context(|| format!("Failed to connect to translate endpoint: {url}"))?;

        let body = read_body(response).await?;
        parse_translation(&body)
    }
}

impl Translator for RemoteTranslator {
    fn route(&self) -> &TranslationRoute {
        &self.route
    }

    async fn translate(&self, text: &str) -> Result<String> {
        let token = self.fetch_token().await?;
        crate::debug!(
            "translating {} -> {} via {}",
            self.route.from_lang,
            self.route.to_lang,
            self.route.endpoint
        );
        self.submit(&token, text).await
    }
}

async fn read_body(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    if !status.is_success() {
        return Err(ApiStatusError::new(status, body).into());
    }
    Ok(body)
}

fn parse_token(body: &str) -> Result<String> {
    let response: TokenResponse =
        serde_json::from_str(body).context("Failed to parse token response")?;

    response
        .data
        .map(|data| data.access_token)
        .context("Token response has no data.accessToken")
}

fn parse_translation(body: &str) -> Result<String> {
    let response: TranslateResponse =
        serde_json::from_str(body).context("Failed to parse translation response")?;

    response
        .data
        .context("Translation response has no data")
}
