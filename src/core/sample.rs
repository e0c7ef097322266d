use crate::domain::model::{BusinessCreate, BusinessStatus, EntityPayload};

/// Size of one demonstration batch.
pub const SAMPLE_BATCH_SIZE: usize = 20;

const NAMES: [&str; 10] = [
    "Blue Anchor Shipyard",
    "Harborline Marine Supply",
    "Northstar Towage",
    "Quayside Provisioners",
    "Trident Diving Services",
    "Westerdok Sailmakers",
    "Capstan Engine Works",
    "Lighthouse Bunkering",
    "Seabird Freight Agency",
    "Mariner's Rest Hotel",
];

const DESCRIPTIONS: [&str; 5] = [
    "Full-service repair yard for coastal vessels",
    "Chandlery stocking deck and engine spares",
    "Harbor and ocean towage around the clock",
    "Victualling and stores for visiting crews",
    "Certified inspection and underwater works",
];

const CITIES: [&str; 8] = [
    "Rotterdam",
    "Singapore",
    "Hamburg",
    "Busan",
    "Piraeus",
    "Santos",
    "Felixstowe",
    "Vancouver",
];

// Index-aligned with CITIES.
const COUNTRIES: [&str; 8] = [
    "Netherlands",
    "Singapore",
    "Germany",
    "South Korea",
    "Greece",
    "Brazil",
    "United Kingdom",
    "Canada",
];

/// A fixed batch of plausible directory entries for demonstrations and
/// smoke tests. Every field derives from the row index, so the output
/// is identical on every call. The batch bypasses the parser and the
/// validator; it goes straight to the importer as business payloads.
pub fn sample_businesses() -> Vec<EntityPayload> {
    (0..SAMPLE_BATCH_SIZE).map(sample_business).collect()
}

fn sample_business(i: usize) -> EntityPayload {
    let city_index = i % CITIES.len();
    EntityPayload::Business(BusinessCreate {
        name: NAMES[i % NAMES.len()].to_string(),
        description: DESCRIPTIONS[i % DESCRIPTIONS.len()].to_string(),
        category_id: (i % 5 + 1) as i64,
        subcategory_id: None,
        address: Some(format!("{} Harbor Road", i + 1)),
        city: Some(CITIES[city_index].to_string()),
        state: None,
        zip: Some(format!("{:05}", 10000 + i * 37)),
        country: Some(COUNTRIES[city_index].to_string()),
        phone: Some(format!("+31 10 555 {:04}", 100 + i)),
        email: Some(format!("contact{}@seadex.example", i + 1)),
        website: Some(format!("https://business{}.seadex.example", i + 1)),
        is_featured: i % 4 == 0,
        logo_url: None,
        latitude: Some(((i * 7) % 120) as f64 - 60.0 + 0.25),
        longitude: Some(((i * 13) % 360) as f64 - 180.0 + 0.5),
        owner_id: None,
        status: BusinessStatus::Pending,
    })
}
