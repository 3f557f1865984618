//! Fields submitted by the search form.
use crate::error::FormError;
use axum::extract::multipart::{Multipart, MultipartError};
use chrono::NaiveDate;
use std::str::FromStr;

pub const MIN_CLOUD_COVER: u8 = 1;
pub const MAX_CLOUD_COVER: u8 = 100;
pub const DEFAULT_CLOUD_COVER: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductType {
    TrueColor,
    Sar,
}

impl ProductType {
    pub const ALL: [ProductType; 2] = [ProductType::TrueColor, ProductType::Sar];

    pub fn key(&self) -> &'static str {
        match self {
            Self::TrueColor => "truecolor",
            Self::Sar => "sar",
        }
    }
}

impl FromStr for ProductType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "truecolor" => Ok(Self::TrueColor),
            "sar" => Ok(Self::Sar),
            other => Err(FormError::ProductType(other.to_owned())),
        }
    }
}

/// Raw multipart submission. Text fields stay unparsed so each one can be validated and
/// reported on its own.
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    pub upload: Option<Vec<u8>>,
    pub product_type: String,
    pub cloud_cover: String,
    pub start_date: String,
    pub end_date: String,
}

impl SearchForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, MultipartError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_owned();
            match name.as_str() {
                "geojson" => {
                    // Browsers send an empty part when no file was chosen.
                    let content = field.bytes().await?;
                    if !content.is_empty() {
                        form.upload = Some(content.to_vec());
                    }
                }
                "product_type" => form.product_type = field.text().await?,
                "cloud_cover" => form.cloud_cover = field.text().await?,
                "start_date" => form.start_date = field.text().await?,
                "end_date" => form.end_date = field.text().await?,
                _ => {}
            }
        }
        Ok(form)
    }

    pub fn product(&self) -> Result<ProductType, FormError> {
        self.product_type.trim().parse()
    }

    pub fn cloud_cover(&self) -> Result<u8, FormError> {
        let value = self.cloud_cover.trim();
        value
            .parse::<u8>()
            .ok()
            .filter(|v| (MIN_CLOUD_COVER..=MAX_CLOUD_COVER).contains(v))
            .ok_or_else(|| FormError::CloudCover(value.to_owned()))
    }

    pub fn start(&self) -> Result<NaiveDate, FormError> {
        parse_date("start", &self.start_date)
    }

    pub fn end(&self) -> Result<NaiveDate, FormError> {
        parse_date("end", &self.end_date)
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| FormError::Date {
        field,
        value: value.to_owned(),
    })
}
