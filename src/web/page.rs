//! HTML rendering for the search page.
use super::controller::SearchOutcome;
use super::form::{ProductType, DEFAULT_CLOUD_COVER, MAX_CLOUD_COVER, MIN_CLOUD_COVER};
use crate::download_links::{self, DownloadEntry};
use chrono::NaiveDate;

const STYLE: &str = "
body { font-family: sans-serif; max-width: 52rem; margin: 2rem auto; padding: 0 1rem; }
fieldset { border: 0; display: flex; gap: 1rem; padding: 0; margin: 0 0 1rem 0; }
fieldset label { flex: 1; display: flex; flex-direction: column; }
.notice { padding: 0.6rem 1rem; margin: 0.5rem 0; border-radius: 0.3rem; }
.info { background: #e7f1fb; }
.success { background: #e6f4ea; }
.warning { background: #fff6dc; }
.error { background: #fde8e8; }
pre { background: #f5f5f5; padding: 0.6rem; overflow-x: auto; }
";

/// Values the form is rendered with, so a results page keeps the previous selection.
#[derive(Debug, Clone)]
pub struct FormValues {
    pub product: ProductType,
    pub cloud_cover: u8,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FormValues {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            product: ProductType::TrueColor,
            cloud_cover: DEFAULT_CLOUD_COVER,
            start: today,
            end: today,
        }
    }
}

pub fn render(values: &FormValues, outcome: Option<&SearchOutcome>) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Satellite Data Downloader</title>\n");
    html.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));

    html.push_str("<h1>Satellite Data Downloader</h1>\n");
    html.push_str("<p>Easily search and download satellite imagery files.</p>\n<hr>\n");
    html.push_str(
        "<h2>Instructions</h2>\n<ol>\n\
         <li><strong>Upload</strong> a GeoJSON file containing your desired Area of Interest (AOI).</li>\n\
         <li><strong>Adjust</strong> the search settings (e.g., product type, dates, cloud cover).</li>\n\
         <li><strong>Click Search</strong> to find matching satellite imagery.</li>\n\
         <li><strong>Download</strong> files from the results list.</li>\n</ol>\n",
    );

    render_form(&mut html, values);

    if let Some(outcome) = outcome {
        render_outcome(&mut html, outcome);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_form(html: &mut String, values: &FormValues) {
    html.push_str("<h3>Search Criteria</h3>\n");
    html.push_str("<p>Upload a polygon GeoJSON (or .json) to extract bounding box:</p>\n");
    html.push_str(
        "<form method=\"post\" action=\"/search\" enctype=\"multipart/form-data\">\n\
         <p><input type=\"file\" name=\"geojson\" accept=\".geojson,.json\"></p>\n",
    );

    html.push_str("<fieldset>\n<label>Product Type\n<select name=\"product_type\">\n");
    for product in ProductType::ALL {
        let selected = if product == values.product { " selected" } else { "" };
        let key = product.key();
        html.push_str(&format!("<option value=\"{key}\"{selected}>{key}</option>\n"));
    }
    html.push_str("</select>\n</label>\n");
    html.push_str(&format!(
        "<label>Max Cloud Cover (%): <output id=\"cloud_cover_value\">{value}</output>\n\
         <input type=\"range\" name=\"cloud_cover\" min=\"{MIN_CLOUD_COVER}\" max=\"{MAX_CLOUD_COVER}\" \
         value=\"{value}\" oninput=\"cloud_cover_value.value = this.value\">\n</label>\n</fieldset>\n",
        value = values.cloud_cover
    ));

    html.push_str(&format!(
        "<fieldset>\n\
         <label>Start Date <input type=\"date\" name=\"start_date\" value=\"{}\"></label>\n\
         <label>End Date <input type=\"date\" name=\"end_date\" value=\"{}\"></label>\n\
         </fieldset>\n",
        values.start.format("%Y-%m-%d"),
        values.end.format("%Y-%m-%d")
    ));
    html.push_str("<button type=\"submit\">Search</button>\n</form>\n");
}

fn render_outcome(html: &mut String, outcome: &SearchOutcome) {
    html.push_str("<hr>\n");
    for notice in outcome.report.notices() {
        html.push_str(&format!(
            "<div class=\"notice {}\">{}</div>\n",
            notice.level.as_str(),
            escape(&notice.text)
        ));
    }
    if !outcome.entries.is_empty() {
        html.push_str("<h2>Available Files</h2>\n");
        render_download_links(html, &outcome.entries);
    }
}

fn render_download_links(html: &mut String, entries: &[DownloadEntry]) {
    html.push_str("<h3>Download Links</h3>\n");
    html.push_str("<details open>\n<summary>Click to view/download files</summary>\n<ul>\n");
    for entry in entries {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            escape(entry.url()),
            escape(entry.file_name())
        ));
    }
    html.push_str("</ul>\n<p>As markdown:</p>\n");
    html.push_str(&format!(
        "<pre>{}</pre>\n</details>\n",
        escape(&download_links::to_markdown(entries))
    ));
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
