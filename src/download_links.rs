use crate::provider::{AssetDescription, AssetKey};
use crate::signing::SignedItem;

/// A file offered to the user: display name and signed url.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadEntry {
    file_name: String,
    url: String,
}

impl DownloadEntry {
    /// Entry for the `asset` role of a signed item, named `{item-id}_{description}.tif`. `None` if
    /// the item has no such asset.
    pub fn from_signed<A>(item: &SignedItem, asset: &A) -> Option<Self>
    where
        A: AssetKey + AssetDescription,
    {
        let url = item.asset_href(asset)?;
        Some(Self {
            file_name: format!("{}_{}.tif", item.id(), asset.description()),
            url: url.to_owned(),
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn to_markdown(&self) -> String {
        format!("- [{}]({})", self.file_name, self.url)
    }
}

pub fn to_markdown(entries: &[DownloadEntry]) -> String {
    entries
        .iter()
        .map(DownloadEntry::to_markdown)
        .collect::<Vec<_>>()
        .join("\n")
}
