//! The two search workflows offered by the form, one per product type.
use crate::bbox::BoundingBox;
use crate::download_links::DownloadEntry;
use crate::error::CatalogError;
use crate::provider::planetary_computer::{
    sentinel_1_rtc, sentinel_2_l2a, PlanetaryComputerCollection,
};
use crate::report::Report;
use crate::signing::Signer;
use crate::stac_operations::{Catalog, SearchCriteria};
use anyhow::Result;
use chrono::NaiveDate;

/// Sentinel-2 L2A true color composites, filtered by cloud cover. A catalog `NotFound` is
/// reported and yields no entries; any other failure is returned to the caller.
pub async fn search_truecolor_items(
    catalog: &impl Catalog,
    signer: &impl Signer,
    report: &mut Report,
    bbox: BoundingBox,
    start: NaiveDate,
    end: NaiveDate,
    cloud_cover: u8,
) -> Result<Vec<DownloadEntry>> {
    let criteria = SearchCriteria::new(
        &PlanetaryComputerCollection::Sentinel2L2A,
        bbox,
        start,
        end,
        Some(cloud_cover),
    );

    report.info("Searching for truecolor items...");
    let items = match catalog.search(&criteria).await {
        Ok(items) => items,
        Err(e @ CatalogError::NotFound(_)) => {
            report.error(format!("Search failed: {e}"));
            return Ok(vec![]);
        }
        Err(e) => return Err(e.into()),
    };

    if items.is_empty() {
        report.warning("No items found.");
        return Ok(vec![]);
    }

    let entries = signer
        .sign(items)
        .await?
        .iter()
        .filter_map(|item| DownloadEntry::from_signed(item, &sentinel_2_l2a::AssetKind::Visual))
        .collect();
    Ok(entries)
}

/// Sentinel-1 radiometrically terrain corrected backscatter, one entry per VV/VH polarization.
pub async fn search_sar_items(
    catalog: &impl Catalog,
    signer: &impl Signer,
    report: &mut Report,
    bbox: BoundingBox,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DownloadEntry>> {
    report.info("Searching for Sentinel-1 SAR items...");

    let criteria = SearchCriteria::new(
        &PlanetaryComputerCollection::Sentinel1Rtc,
        bbox,
        start,
        end,
        None,
    );
    let items = catalog.search(&criteria).await?;

    if items.is_empty() {
        report.error("No Sentinel-1 SAR items found.");
        return Ok(vec![]);
    }

    let mut entries = vec![];
    for item in signer.sign(items).await? {
        for pol in sentinel_1_rtc::AssetKind::POLARIZATIONS.iter() {
            if let Some(entry) = DownloadEntry::from_signed(&item, pol) {
                entries.push(entry);
            }
        }
    }
    Ok(entries)
}
