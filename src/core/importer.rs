use crate::core::mapper::{self, RejectReason};
use crate::domain::model::{EntityKind, EntityPayload, ImportResult, Row};
use crate::domain::ports::DirectoryStore;
use crate::utils::error::Result;
use std::time::Duration;

/// Data rows start on line 2 of the file, after the header.
const HEADER_OFFSET: usize = 2;

const RETRY_BACKOFF: Duration = Duration::from_millis(200);

/// Drives one batch against the store, one row at a time, in order.
/// A failing row is recorded and skipped; it never aborts the batch,
/// and nothing that already succeeded is rolled back.
pub struct BatchImporter<'a, S: DirectoryStore> {
    store: &'a S,
    retries: usize,
}

impl<'a, S: DirectoryStore> BatchImporter<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store, retries: 0 }
    }

    /// Bounded retry on insert failure, fixed backoff. Zero keeps the
    /// historical record-and-continue behavior.
    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    /// Import parsed file rows. Row numbers in error messages count the
    /// header line, so data row 0 reports as "Row 2".
    pub async fn import_rows<F>(
        &self,
        rows: &[Row],
        kind: EntityKind,
        on_progress: F,
    ) -> ImportResult
    where
        F: FnMut(u8),
    {
        let items: Vec<std::result::Result<EntityPayload, RejectReason>> = rows
            .iter()
            .map(|row| mapper::map_row(row, kind))
            .collect();
        self.run_batch(items, HEADER_OFFSET, on_progress).await
    }

    /// Import pre-built payloads (sample data). No header line here, so
    /// numbering is plain 1-based.
    pub async fn import_payloads<F>(
        &self,
        payloads: Vec<EntityPayload>,
        on_progress: F,
    ) -> ImportResult
    where
        F: FnMut(u8),
    {
        let items = payloads.into_iter().map(Ok).collect();
        self.run_batch(items, 1, on_progress).await
    }

    async fn run_batch<F>(
        &self,
        items: Vec<std::result::Result<EntityPayload, RejectReason>>,
        row_offset: usize,
        mut on_progress: F,
    ) -> ImportResult
    where
        F: FnMut(u8),
    {
        let total = items.len();
        let mut result = ImportResult::default();

        for (i, item) in items.into_iter().enumerate() {
            let row_number = i + row_offset;
            match item {
                Err(reason) => {
                    result.errors.push(format!("Row {}: {}", row_number, reason));
                }
                Ok(payload) => {
                    let collection = payload.kind().collection();
                    match self.insert_with_retry(collection, &payload).await {
                        Ok(()) => result.count += 1,
                        Err(e) => {
                            tracing::warn!("Row {} failed to persist: {}", row_number, e);
                            result.errors.push(format!("Row {}: {}", row_number, e));
                        }
                    }
                }
            }
            on_progress(percent(i + 1, total));
        }

        tracing::info!(
            "Batch finished: {} inserted, {} rejected or failed",
            result.count,
            result.errors.len()
        );
        result
    }

    async fn insert_with_retry(&self, collection: &str, payload: &EntityPayload) -> Result<()> {
        let value = serde_json::to_value(payload)?;
        let mut attempt = 0;
        loop {
            match self.store.insert(collection, value.clone()).await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Insert into {} failed ({}), retry {}/{}",
                        collection,
                        e,
                        attempt,
                        self.retries
                    );
                    tokio::time::sleep(RETRY_BACKOFF).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Fractional progress after `processed` of `total` rows, as a rounded
/// percentage. Monotone over one batch since `processed` only grows.
fn percent(processed: usize, total: usize) -> u8 {
    ((processed as f64 / total as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::{parse_rows, ParseOptions};
    use crate::domain::model::{BusinessCreate, BusinessStatus};
    use crate::utils::error::ImportError;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct MockStore {
        inserted: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
        // Fail the call whenever the payload's name matches.
        fail_on_name: Option<String>,
        // Fail this many calls before starting to succeed.
        fail_first: Arc<Mutex<usize>>,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                inserted: Arc::new(Mutex::new(Vec::new())),
                fail_on_name: None,
                fail_first: Arc::new(Mutex::new(0)),
            }
        }

        fn failing_on(name: &str) -> Self {
            Self {
                fail_on_name: Some(name.to_string()),
                ..Self::new()
            }
        }

        fn failing_first(n: usize) -> Self {
            let store = Self::new();
            *store.fail_first.try_lock().unwrap() = n;
            store
        }

        async fn inserted(&self) -> Vec<(String, serde_json::Value)> {
            self.inserted.lock().await.clone()
        }
    }

    #[async_trait]
    impl DirectoryStore for MockStore {
        async fn insert(&self, collection: &str, payload: serde_json::Value) -> Result<()> {
            {
                let mut remaining = self.fail_first.lock().await;
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(ImportError::StoreError {
                        message: "transient failure".to_string(),
                    });
                }
            }
            if let Some(bad) = &self.fail_on_name {
                if payload.get("name").and_then(|v| v.as_str()) == Some(bad.as_str()) {
                    return Err(ImportError::StoreError {
                        message: "duplicate key".to_string(),
                    });
                }
            }
            self.inserted
                .lock()
                .await
                .push((collection.to_string(), payload));
            Ok(())
        }
    }

    fn business_csv(rows: &[&str]) -> Vec<Row> {
        let content = format!("name,description,category_id\n{}\n", rows.join("\n"));
        parse_rows(&content, &ParseOptions::default()).unwrap()
    }

    fn sample_business(name: &str) -> EntityPayload {
        EntityPayload::Business(BusinessCreate {
            name: name.to_string(),
            description: "test".to_string(),
            category_id: 1,
            subcategory_id: None,
            address: None,
            city: None,
            state: None,
            zip: None,
            country: None,
            phone: None,
            email: None,
            website: None,
            is_featured: false,
            logo_url: None,
            latitude: None,
            longitude: None,
            owner_id: None,
            status: BusinessStatus::Pending,
        })
    }

    #[tokio::test]
    async fn test_all_valid_rows_inserted() {
        let store = MockStore::new();
        let rows = business_csv(&["A,alpha,1", "B,beta,2", "C,gamma,3"]);

        let result = BatchImporter::new(&store)
            .import_rows(&rows, EntityKind::Business, |_| {})
            .await;

        assert_eq!(result.count, 3);
        assert!(result.errors.is_empty());
        let inserted = store.inserted().await;
        assert_eq!(inserted.len(), 3);
        assert!(inserted.iter().all(|(c, _)| c == "businesses"));
    }

    #[tokio::test]
    async fn test_invalid_row_reported_with_file_row_number() {
        let store = MockStore::new();
        // Data row 2 (file row 3) lacks category_id.
        let rows = business_csv(&["A,alpha,1", "B,beta,", "C,gamma,3"]);

        let result = BatchImporter::new(&store)
            .import_rows(&rows, EntityKind::Business, |_| {})
            .await;

        assert_eq!(result.count, 2);
        assert_eq!(result.errors, vec!["Row 3: Missing required fields"]);
    }

    #[tokio::test]
    async fn test_bare_delimiter_row_gets_its_own_error_and_numbering_holds() {
        let store = MockStore::new();
        // A ",," line is a data row with every field absent, not a
        // blank line. It must be rejected under its own number and must
        // not shift the numbers of the rows after it.
        let rows = business_csv(&[",,", "B,beta,"]);

        let result = BatchImporter::new(&store)
            .import_rows(&rows, EntityKind::Business, |_| {})
            .await;

        assert_eq!(result.count, 0);
        assert_eq!(
            result.errors,
            vec![
                "Row 2: Missing required fields",
                "Row 3: Missing required fields",
            ]
        );
    }

    #[tokio::test]
    async fn test_insert_failure_does_not_abort_batch() {
        let store = MockStore::failing_on("B");
        let rows = business_csv(&["A,alpha,1", "B,beta,2", "C,gamma,3"]);

        let result = BatchImporter::new(&store)
            .import_rows(&rows, EntityKind::Business, |_| {})
            .await;

        assert_eq!(result.count, 2);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Row 3:"));
        assert!(result.errors[0].contains("duplicate key"));
    }

    #[tokio::test]
    async fn test_progress_follows_round_formula() {
        let store = MockStore::new();
        let rows = business_csv(&["A,a,1", "B,b,1", "C,c,1"]);

        let mut seen = Vec::new();
        BatchImporter::new(&store)
            .import_rows(&rows, EntityKind::Business, |p| seen.push(p))
            .await;

        assert_eq!(seen, vec![33, 67, 100]);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_progress_emitted_for_failed_rows_too() {
        let store = MockStore::new();
        let rows = business_csv(&["A,a,", "B,b,"]);

        let mut seen = Vec::new();
        let result = BatchImporter::new(&store)
            .import_rows(&rows, EntityKind::Business, |p| seen.push(p))
            .await;

        assert_eq!(result.count, 0);
        assert_eq!(seen, vec![50, 100]);
    }

    #[tokio::test]
    async fn test_empty_batch_returns_clean_result() {
        let store = MockStore::new();
        let mut seen = Vec::new();
        let result = BatchImporter::new(&store)
            .import_rows(&[], EntityKind::Business, |p| seen.push(p))
            .await;

        assert_eq!(result.count, 0);
        assert!(result.errors.is_empty());
        assert!(seen.is_empty());
    }

    #[tokio::test]
    async fn test_retry_recovers_transient_failure() {
        let store = MockStore::failing_first(1);
        let rows = business_csv(&["A,alpha,1"]);

        let result = BatchImporter::new(&store)
            .with_retries(1)
            .import_rows(&rows, EntityKind::Business, |_| {})
            .await;

        assert_eq!(result.count, 1);
        assert!(result.errors.is_empty());
    }

    #[tokio::test]
    async fn test_no_retry_by_default() {
        let store = MockStore::failing_first(1);
        let rows = business_csv(&["A,alpha,1"]);

        let result = BatchImporter::new(&store)
            .import_rows(&rows, EntityKind::Business, |_| {})
            .await;

        assert_eq!(result.count, 0);
        assert_eq!(result.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_payload_batch_uses_plain_row_numbers() {
        let store = MockStore::failing_on("bad");
        let payloads = vec![sample_business("bad"), sample_business("good")];

        let result = BatchImporter::new(&store)
            .import_payloads(payloads, |_| {})
            .await;

        assert_eq!(result.count, 1);
        assert!(result.errors[0].starts_with("Row 1:"));
    }

    #[tokio::test]
    async fn test_reimport_is_not_idempotent() {
        // Documented behavior: re-running the same file duplicates the
        // rows that already succeeded.
        let store = MockStore::new();
        let rows = business_csv(&["A,alpha,1", "B,beta,2"]);
        let importer = BatchImporter::new(&store);

        let first = importer.import_rows(&rows, EntityKind::Business, |_| {}).await;
        let second = importer.import_rows(&rows, EntityKind::Business, |_| {}).await;

        assert_eq!(first.count, 2);
        assert_eq!(second.count, 2);
        assert_eq!(store.inserted().await.len(), 4);
    }
}
