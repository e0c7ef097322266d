use crate::domain::model::{
    BusinessCreate, BusinessStatus, CategoryCreate, EntityKind, EntityPayload, ReviewCreate, Row,
};

/// Why one row was rejected. Surfaced to the user verbatim, prefixed
/// with the row number by the importer.
pub type RejectReason = String;

const MISSING_REQUIRED: &str = "Missing required fields";
const INVALID_RATING: &str = "Rating must be between 1 and 5";

/// Map one parsed row to a typed creation payload, or explain why it
/// cannot be one. Pure; the same row and kind always map the same way.
/// Columns the target schema does not know are silently dropped.
pub fn map_row(row: &Row, kind: EntityKind) -> Result<EntityPayload, RejectReason> {
    match kind {
        EntityKind::Business => map_business(row).map(EntityPayload::Business),
        EntityKind::Category => map_category(row).map(EntityPayload::Category),
        EntityKind::Review => map_review(row).map(EntityPayload::Review),
    }
}

fn map_business(row: &Row) -> Result<BusinessCreate, RejectReason> {
    let name = row.text("name");
    let description = row.text("description");
    let category_id = row.integer("category_id");

    let (name, description, category_id) = match (name, description, category_id) {
        (Some(n), Some(d), Some(c)) => (n, d, c),
        _ => return Err(MISSING_REQUIRED.to_string()),
    };

    Ok(BusinessCreate {
        name,
        description,
        category_id,
        // Invalid or missing subcategory is null, not an error.
        subcategory_id: row.integer("subcategory_id"),
        address: row.text("address"),
        city: row.text("city"),
        state: row.text("state"),
        zip: row.text("zip"),
        country: row.text("country"),
        phone: row.text("phone"),
        email: row.text("email"),
        website: row.text("website"),
        is_featured: row.boolean("is_featured").unwrap_or(false),
        logo_url: row.text("logo_url"),
        latitude: row.float("latitude"),
        longitude: row.float("longitude"),
        owner_id: row.text("owner_id"),
        status: BusinessStatus::parse_or_default(row.text("status").as_deref()),
    })
}

fn map_category(row: &Row) -> Result<CategoryCreate, RejectReason> {
    let name = row.text("name");
    let icon = row.text("icon");

    let (name, icon) = match (name, icon) {
        (Some(n), Some(i)) => (n, i),
        _ => return Err(MISSING_REQUIRED.to_string()),
    };

    // A missing description is normalized, not rejected.
    let description = row
        .text("description")
        .unwrap_or_else(|| format!("{} category", name));

    Ok(CategoryCreate {
        name,
        icon,
        description,
    })
}

fn map_review(row: &Row) -> Result<ReviewCreate, RejectReason> {
    let business_id = row
        .text("business_id")
        .ok_or_else(|| MISSING_REQUIRED.to_string())?;

    if row.get("rating").is_none() {
        return Err(MISSING_REQUIRED.to_string());
    }
    let rating = match row.integer("rating") {
        Some(r) if (1..=5).contains(&r) => r,
        _ => return Err(INVALID_RATING.to_string()),
    };

    Ok(ReviewCreate {
        business_id,
        rating,
        comment: row.text("comment"),
        user_id: row.text("user_id"),
    })
}
