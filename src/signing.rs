//! Signed access to catalog assets.
//!
//! Assets in the Planetary Computer live in Azure blob storage and need a short lived SAS token
//! appended to their href before they can be downloaded. The tokens are issued by the hosted
//! token service; nothing is signed locally.
use crate::error::SigningError;
use crate::provider::planetary_computer::SAS_TOKEN_API;
use crate::provider::AssetKey;
use serde::Deserialize;
use stac::Item;
use std::collections::HashMap;
use tracing::debug;
use url::Url;

const BLOB_HOST_SUFFIX: &str = ".blob.core.windows.net";

/// A catalog item whose asset hrefs went through a [`Signer`].
#[derive(Debug, Clone)]
pub struct SignedItem {
    item: Item,
}

impl SignedItem {
    pub(crate) fn new(item: Item) -> Self {
        Self { item }
    }

    pub fn id(&self) -> &str {
        &self.item.id
    }

    pub fn asset_href(&self, asset: &impl AssetKey) -> Option<&str> {
        self.item
            .assets
            .get(asset.key())
            .map(|asset| asset.href.as_str())
    }
}

pub trait Signer {
    async fn sign(&self, items: Vec<Item>) -> Result<Vec<SignedItem>, SigningError>;
}

#[derive(Deserialize, Debug)]
struct SasToken {
    token: String,
    #[serde(rename = "msft:expiry", default)]
    expiry: Option<String>,
}

pub struct PlanetaryComputerSigner {
    http: reqwest::Client,
    token_url: Url,
}

impl PlanetaryComputerSigner {
    pub fn new() -> Self {
        let token_url = Url::parse(SAS_TOKEN_API).expect("Token API url should always parse");
        Self::with_endpoint(token_url)
    }

    pub(crate) fn with_endpoint(token_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            token_url,
        }
    }

    async fn fetch_token(&self, account: &str, container: &str) -> Result<SasToken, SigningError> {
        let url = Url::parse(&format!(
            "{}/{}/{}",
            self.token_url.as_str().trim_end_matches('/'),
            account,
            container
        ))?;
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SigningError::Status {
                status,
                account: account.to_owned(),
                container: container.to_owned(),
            });
        }
        let token: SasToken = response.json().await?;
        debug!(
            "Received token for {}/{} expiring {}",
            account,
            container,
            token.expiry.as_deref().unwrap_or("unknown")
        );
        Ok(token)
    }
}

impl Default for PlanetaryComputerSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl Signer for PlanetaryComputerSigner {
    async fn sign(&self, items: Vec<Item>) -> Result<Vec<SignedItem>, SigningError> {
        // Tokens are scoped to a storage container and reused for the rest of this call.
        let mut tokens: HashMap<(String, String), String> = HashMap::new();
        let mut signed = Vec::with_capacity(items.len());

        for mut item in items {
            for asset in item.assets.values_mut() {
                let Ok(url) = Url::parse(&asset.href) else {
                    continue;
                };
                if is_signed(&url) {
                    continue;
                }
                let Some(container) = blob_container(&url) else {
                    continue;
                };

                let token = match tokens.get(&container) {
                    Some(token) => token.clone(),
                    None => {
                        let token = self.fetch_token(&container.0, &container.1).await?.token;
                        tokens.insert(container, token.clone());
                        token
                    }
                };
                asset.href = with_token(url, &token);
            }
            signed.push(SignedItem::new(item));
        }
        Ok(signed)
    }
}

/// Storage account and container of an Azure blob url.
fn blob_container(url: &Url) -> Option<(String, String)> {
    let account = url.host_str()?.strip_suffix(BLOB_HOST_SUFFIX)?;
    let container = url.path_segments()?.next().filter(|s| !s.is_empty())?;
    Some((account.to_owned(), container.to_owned()))
}

fn is_signed(url: &Url) -> bool {
    url.query_pairs().any(|(key, _)| key == "sig")
}

fn with_token(mut url: Url, token: &str) -> String {
    let query = match url.query() {
        Some(existing) if !existing.is_empty() => format!("{existing}&{token}"),
        _ => token.to_owned(),
    };
    url.set_query(Some(&query));
    url.to_string()
}
