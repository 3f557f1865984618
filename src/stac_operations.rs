use crate::bbox::BoundingBox;
use crate::error::CatalogError;
use crate::provider::planetary_computer::SEARCH_API;
use crate::provider::STACCollection;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde_json::{Map, Value};
use stac::{Item, ItemCollection, Link};
use tracing::{debug, info};
use url::Url;

/// Items requested per page; further pages are followed through `next` links.
const PAGE_LIMIT: u32 = 100;

/// Filters for a single catalog search.
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    pub collection: String,
    pub bbox: BoundingBox,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub cloud_cover: Option<u8>,
}

impl SearchCriteria {
    pub fn new(
        collection: &impl STACCollection,
        bbox: BoundingBox,
        start: NaiveDate,
        end: NaiveDate,
        cloud_cover: Option<u8>,
    ) -> Self {
        Self {
            collection: collection.key().to_owned(),
            bbox,
            start,
            end,
            cloud_cover,
        }
    }

    /// Inclusive interval covering both calendar days completely.
    pub fn datetime(&self) -> String {
        format!(
            "{}T00:00:00Z/{}T23:59:59Z",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }

    pub fn body(&self) -> Value {
        let mut body = serde_json::json!({
            "collections": vec![&self.collection],
            "bbox": self.bbox.to_array(),
            "datetime": self.datetime(),
            "limit": PAGE_LIMIT,
        });
        if let Some(cloud_cover) = self.cloud_cover {
            body["query"] = serde_json::json!({"eo:cloud_cover": {"lt": cloud_cover}});
        }
        body
    }
}

pub trait Catalog {
    /// Returns every item matching `criteria`.
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Item>, CatalogError>;
}

pub struct StacClient {
    http: reqwest::Client,
    search_url: Url,
}

impl StacClient {
    pub fn new() -> Self {
        let search_url = Url::parse(SEARCH_API).expect("Search API url should always parse");
        Self::with_endpoint(search_url)
    }

    pub(crate) fn with_endpoint(search_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            search_url,
        }
    }

    async fn fetch_page(&self, request: &PageRequest) -> Result<ItemCollection, CatalogError> {
        debug!("Requesting {} {}", request.method(), request.url);
        let builder = match &request.body {
            Some(body) => self.http.post(request.url.clone()).json(body),
            None => self.http.get(request.url.clone()),
        };
        let response = builder.send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(request.url.to_string()));
        }
        if !status.is_success() {
            return Err(CatalogError::Status {
                status,
                url: request.url.to_string(),
            });
        }

        let content = response.bytes().await?;
        serde_json::from_slice(&content).map_err(CatalogError::Decode)
    }
}

impl Default for StacClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog for StacClient {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Item>, CatalogError> {
        let mut request = PageRequest {
            url: self.search_url.clone(),
            body: Some(criteria.body()),
        };
        let mut seen: Vec<PageRequest> = vec![];
        let mut items: Vec<Item> = vec![];

        loop {
            let page = self.fetch_page(&request).await?;
            items.extend(page.items);

            let Some(link) = page.links.into_iter().find(|l| l.rel == "next") else {
                break;
            };
            seen.push(request);
            let next = next_request(link, seen.last().and_then(|r| r.body.as_ref()))?;
            if seen.contains(&next) {
                break;
            }
            request = next;
        }

        info!("Found {} items", items.len());
        Ok(items)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PageRequest {
    url: Url,
    body: Option<Value>,
}

impl PageRequest {
    fn method(&self) -> &str {
        if self.body.is_some() {
            "POST"
        } else {
            "GET"
        }
    }
}

/// A POST link carries its own body. With `merge` set, or without a body at all, the fields
/// override the previous request body instead of replacing it.
fn next_request(link: Link, previous: Option<&Value>) -> Result<PageRequest, CatalogError> {
    let href = link.href.to_string();
    let url = Url::parse(&href).map_err(|e| CatalogError::Link(format!("{href}: {e}")))?;

    let is_post = link
        .method
        .as_deref()
        .is_some_and(|m| m.eq_ignore_ascii_case("POST"));
    if !is_post {
        return Ok(PageRequest { url, body: None });
    }

    let merge = link.merge.unwrap_or(false);
    let mut body = match (&link.body, merge, previous) {
        (Some(_), false, _) | (_, _, None) => Map::new(),
        (_, _, Some(previous)) => previous.as_object().cloned().unwrap_or_default(),
    };
    if let Some(fields) = link.body {
        body.extend(fields);
    }
    Ok(PageRequest {
        url,
        body: Some(Value::Object(body)),
    })
}
