use crate::domain::model::EntityKind;
use crate::utils::error::Result;

pub const BUSINESS_HEADERS: [&str; 16] = [
    "name",
    "description",
    "category_id",
    "subcategory_id",
    "address",
    "city",
    "state",
    "zip",
    "country",
    "phone",
    "email",
    "website",
    "is_featured",
    "logo_url",
    "latitude",
    "longitude",
];

pub const CATEGORY_HEADERS: [&str; 3] = ["name", "icon", "description"];

pub const REVIEW_HEADERS: [&str; 3] = ["business_id", "rating", "comment"];

pub fn headers(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Business => &BUSINESS_HEADERS,
        EntityKind::Category => &CATEGORY_HEADERS,
        EntityKind::Review => &REVIEW_HEADERS,
    }
}

fn example_row(kind: EntityKind) -> Vec<&'static str> {
    match kind {
        EntityKind::Business => vec![
            "Harborline Marine Supply",
            "Chandlery, rigging and deck hardware for commercial vessels",
            "3",
            "12",
            "14 Quayside Road",
            "Rotterdam",
            "ZH",
            "3011",
            "Netherlands",
            "+31 10 555 0199",
            "info@harborline.example",
            "https://harborline.example",
            "false",
            "https://harborline.example/logo.png",
            "51.9057",
            "4.4870",
        ],
        EntityKind::Category => vec!["Shipyards", "anchor", "Shipbuilding and repair yards"],
        EntityKind::Review => vec![
            "7b4f9c2e-1d3a-4e8b-9f60-2c5a8d1e7f40",
            "5",
            "Fast turnaround on hull repairs",
        ],
    }
}

/// Downloadable starting point for one entity kind: the exact header
/// row the importer expects, plus a single illustrative record.
/// Deterministic; offering it as a file is the caller's business.
pub fn template(kind: EntityKind) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers(kind))?;
    writer.write_record(example_row(kind))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
    Ok(text)
}
