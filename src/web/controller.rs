use super::form::{ProductType, SearchForm};
use crate::bbox::{extract_bbox, BoundingBox};
use crate::download_links::DownloadEntry;
use crate::report::Report;
use crate::search::{search_sar_items, search_truecolor_items};
use crate::signing::Signer;
use crate::stac_operations::Catalog;
use tracing::info;

/// Everything one submission produces for the results page.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    pub report: Report,
    pub bbox: Option<BoundingBox>,
    pub entries: Vec<DownloadEntry>,
}

/// Handles one form submission: validates the upload, extracts its bounding box and runs the
/// workflow for the selected product type. Every failure ends up as a message in the report.
pub async fn run_search(
    catalog: &impl Catalog,
    signer: &impl Signer,
    form: &SearchForm,
) -> SearchOutcome {
    let mut outcome = SearchOutcome::default();
    let report = &mut outcome.report;

    let Some(upload) = form.upload.as_deref() else {
        report.error("Please upload a valid GeoJSON/JSON file first.");
        return outcome;
    };

    let bbox = match extract_bbox(upload) {
        Ok(bbox) => bbox,
        Err(e) => {
            report.error(e.to_string());
            report.error("Could not parse bounding box from the uploaded file.");
            return outcome;
        }
    };
    report.success(format!("Extracted Bounding Box: {bbox}"));
    outcome.bbox = Some(bbox);

    let (product, start, end) = match (form.product(), form.start(), form.end()) {
        (Ok(product), Ok(start), Ok(end)) => (product, start, end),
        (product, start, end) => {
            for error in [product.err(), start.err(), end.err()].into_iter().flatten() {
                report.error(error.to_string());
            }
            return outcome;
        }
    };
    if start > end {
        report.error(format!(
            "Start date {start} must not be after end date {end}."
        ));
        return outcome;
    }

    info!("Dispatching {} search for {}", product.key(), bbox);
    let result = match product {
        ProductType::TrueColor => match form.cloud_cover() {
            Ok(cloud_cover) => {
                search_truecolor_items(catalog, signer, report, bbox, start, end, cloud_cover).await
            }
            Err(e) => {
                report.error(e.to_string());
                return outcome;
            }
        },
        ProductType::Sar => search_sar_items(catalog, signer, report, bbox, start, end).await,
    };

    match result {
        Ok(entries) if entries.is_empty() => {
            report.warning("No matching satellite files found.");
        }
        Ok(entries) => {
            report.info("Files ready for download.");
            outcome.entries = entries;
        }
        Err(e) => {
            report.error(format!("Search failed: {e:#}"));
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Level;
    use crate::search::fakes::{FakeCatalog, FakeSigner, Outcome};
    use crate::test_util::item;

    const SQUARE: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {"name": "aoi"},
            "geometry": {"type": "Polygon", "coordinates": [[[0,0],[0,2],[3,2],[3,0],[0,0]]]}
        }]
    }"#;

    fn form(product: &str) -> SearchForm {
        SearchForm {
            upload: Some(SQUARE.as_bytes().to_vec()),
            product_type: product.to_string(),
            cloud_cover: "10".to_string(),
            start_date: "2024-07-01".to_string(),
            end_date: "2024-07-31".to_string(),
        }
    }

    fn errors(outcome: &SearchOutcome) -> Vec<&str> {
        outcome
            .report
            .notices()
            .iter()
            .filter(|n| n.level == Level::Error)
            .map(|n| n.text.as_str())
            .collect()
    }

    #[tokio::test]
    async fn test_requires_upload() {
        let catalog = FakeCatalog::new(Outcome::Items(vec![]));
        let mut form = form("truecolor");
        form.upload = None;

        let outcome = run_search(&catalog, &FakeSigner, &form).await;
        assert_eq!(errors(&outcome), vec!["Please upload a valid GeoJSON/JSON file first."]);
        assert!(outcome.bbox.is_none());
        assert!(catalog.criteria.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bad_upload_aborts_before_search() {
        let catalog = FakeCatalog::new(Outcome::Items(vec![]));
        let mut form = form("sar");
        form.upload = Some(b"{\"features\": ".to_vec());

        let outcome = run_search(&catalog, &FakeSigner, &form).await;
        let errors = errors(&outcome);
        assert!(errors[0].starts_with("Error decoding JSON"));
        assert_eq!(errors[1], "Could not parse bounding box from the uploaded file.");
        assert!(outcome.bbox.is_none());
        assert!(catalog.criteria.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_truecolor_results() {
        let catalog = FakeCatalog::new(Outcome::Items(vec![item(
            "S2B_1",
            &[("visual", "https://x/v.tif")],
        )]));

        let outcome = run_search(&catalog, &FakeSigner, &form("truecolor")).await;
        assert_eq!(outcome.bbox, Some(BoundingBox::new(0., 0., 3., 2.)));
        assert!(outcome
            .report
            .has(Level::Success, "Extracted Bounding Box: [0, 0, 3, 2]"));
        assert_eq!(outcome.entries.len(), 1);
        assert_eq!(outcome.entries[0].file_name(), "S2B_1_truecolor.tif");

        let criteria = catalog.criteria.lock().unwrap();
        assert_eq!(criteria[0].bbox, BoundingBox::new(0., 0., 3., 2.));
        assert_eq!(criteria[0].cloud_cover, Some(10));
    }

    #[tokio::test]
    async fn test_empty_results_warn() {
        let catalog = FakeCatalog::new(Outcome::Items(vec![]));

        let outcome = run_search(&catalog, &FakeSigner, &form("truecolor")).await;
        assert!(outcome.entries.is_empty());
        assert!(outcome
            .report
            .has(Level::Warning, "No matching satellite files found."));
        assert!(errors(&outcome).is_empty());
    }

    #[tokio::test]
    async fn test_sar_failure_is_reported() {
        let catalog = FakeCatalog::new(Outcome::Unavailable);

        let outcome = run_search(&catalog, &FakeSigner, &form("sar")).await;
        assert!(outcome.entries.is_empty());
        assert!(errors(&outcome)[0].starts_with("Search failed:"));
    }

    #[tokio::test]
    async fn test_sar_ignores_cloud_cover_field() {
        let catalog = FakeCatalog::new(Outcome::Items(vec![item(
            "S1A_1",
            &[("vv", "https://x/vv.tif"), ("vh", "https://x/vh.tif")],
        )]));
        let mut form = form("sar");
        form.cloud_cover = String::new();

        let outcome = run_search(&catalog, &FakeSigner, &form).await;
        assert_eq!(outcome.entries.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_fields() {
        let catalog = FakeCatalog::new(Outcome::Items(vec![]));
        let mut form = form("modis");
        form.start_date = "yesterday".to_string();

        let outcome = run_search(&catalog, &FakeSigner, &form).await;
        assert_eq!(
            errors(&outcome),
            vec!["Unknown product type: modis", "Invalid start date: yesterday"]
        );
        assert!(catalog.criteria.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reversed_dates() {
        let catalog = FakeCatalog::new(Outcome::Items(vec![]));
        let mut form = form("truecolor");
        form.start_date = "2024-08-01".to_string();

        let outcome = run_search(&catalog, &FakeSigner, &form).await;
        assert_eq!(errors(&outcome).len(), 1);
        assert!(catalog.criteria.lock().unwrap().is_empty());
    }
}
