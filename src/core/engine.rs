use crate::core::importer::BatchImporter;
use crate::core::parser::{self, ParseOptions};
use crate::core::sample;
use crate::core::template;
use crate::domain::model::{EntityKind, ImportResult};
use crate::domain::ports::DirectoryStore;
use crate::utils::error::{ImportError, Result};
use std::sync::atomic::{AtomicBool, Ordering};

/// Coordinates the three user-facing operations: import an uploaded
/// file, hand out a template, and load the demonstration batch. One
/// engine runs at most one batch at a time; a second submission while
/// a batch is in flight is refused, not queued.
pub struct ImportEngine<S: DirectoryStore> {
    store: S,
    parse_options: ParseOptions,
    retries: usize,
    busy: AtomicBool,
}

impl<S: DirectoryStore> ImportEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            parse_options: ParseOptions::default(),
            retries: 0,
            busy: AtomicBool::new(false),
        }
    }

    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    /// Import one uploaded file. Parsing happens up front; a file that
    /// is not valid delimited text aborts here, before any insert is
    /// attempted. Once rows exist the batch always runs to completion
    /// and returns a result, however many rows failed.
    pub async fn import_file<F>(
        &self,
        content: &str,
        kind: EntityKind,
        on_progress: F,
    ) -> Result<ImportResult>
    where
        F: FnMut(u8),
    {
        let _guard = self.acquire()?;

        let rows = parser::parse_rows(content, &self.parse_options)?;
        tracing::info!("Parsed {} data rows for {} import", rows.len(), kind);

        let importer = BatchImporter::new(&self.store).with_retries(self.retries);
        Ok(importer.import_rows(&rows, kind, on_progress).await)
    }

    /// Decode an uploaded file and import it. Undecodable bytes are a
    /// file-level failure, same as unparseable text.
    pub async fn import_bytes<F>(
        &self,
        bytes: &[u8],
        kind: EntityKind,
        on_progress: F,
    ) -> Result<ImportResult>
    where
        F: FnMut(u8),
    {
        let content = std::str::from_utf8(bytes).map_err(|_| ImportError::ParseError {
            message: "file is not valid UTF-8 text".to_string(),
        })?;
        self.import_file(content, kind, on_progress).await
    }

    /// Run the fixed 20-row demonstration batch of businesses.
    pub async fn load_sample_data<F>(&self, on_progress: F) -> Result<ImportResult>
    where
        F: FnMut(u8),
    {
        let _guard = self.acquire()?;

        let payloads = sample::sample_businesses();
        tracing::info!("Loading {} sample businesses", payloads.len());

        let importer = BatchImporter::new(&self.store).with_retries(self.retries);
        Ok(importer.import_payloads(payloads, on_progress).await)
    }

    /// Template text for one entity kind; offering it as a download is
    /// up to the caller.
    pub fn template(&self, kind: EntityKind) -> Result<String> {
        template::template(kind)
    }

    fn acquire(&self) -> Result<InFlightGuard<'_>> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ImportError::OperationInFlight);
        }
        Ok(InFlightGuard { busy: &self.busy })
    }
}

struct InFlightGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}
