// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the InquiryRecorder trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use inquira_config::model::StorageConfig;
use inquira_core::types::{AdapterType, HealthStatus, Inquiry, InquiryOutcome};
use inquira_core::{InquiraError, InquiryRecorder, ServiceAdapter};

use crate::database::Database;
use crate::models::{
    AnalyticsSummary, HistoryFilter, InquiryRecord, NewInquiryRecord, SearchField,
};
use crate::queries;

/// SQLite-backed inquiry recorder.
///
/// Wraps a [`Database`] handle and delegates to the typed query module.
/// The database is opened on [`initialize`]; use before that fails with
/// [`InquiraError::Uninitialized`].
///
/// [`initialize`]: SqliteRecorder::initialize
/// [`InquiraError::Uninitialized`]: inquira_core::InquiraError::Uninitialized
pub struct SqliteRecorder {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteRecorder {
    /// Create a new recorder with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`] is called.
    ///
    /// [`initialize`]: SqliteRecorder::initialize
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Opens the database, applying PRAGMAs and pending migrations.
    pub async fn initialize(&self) -> Result<(), InquiraError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db
            .set(db)
            .map_err(|_| InquiraError::Internal("recorder already initialized".into()))?;
        debug!(path = %self.config.database_path, "inquiry recorder initialized");
        Ok(())
    }

    fn db(&self) -> Result<&Database, InquiraError> {
        self.db
            .get()
            .ok_or_else(|| InquiraError::uninitialized("inquiry recorder"))
    }

    // --- Query surface used by the gateway ---

    /// List history rows matching the filter, newest first.
    pub async fn list(&self, filter: HistoryFilter) -> Result<Vec<InquiryRecord>, InquiraError> {
        queries::inquiries::list(self.db()?, filter).await
    }

    /// Fetch one history row by id.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<InquiryRecord>, InquiraError> {
        queries::inquiries::get_by_id(self.db()?, id).await
    }

    /// Substring search over the selected field(s).
    pub async fn search(
        &self,
        query: &str,
        field: SearchField,
        limit: i64,
    ) -> Result<Vec<InquiryRecord>, InquiraError> {
        queries::inquiries::search(self.db()?, query, field, limit).await
    }

    /// Aggregate analytics over the trailing `days` window.
    pub async fn analytics(&self, days: i64) -> Result<AnalyticsSummary, InquiraError> {
        let since = (chrono::Utc::now() - chrono::Duration::days(days)).to_rfc3339();
        queries::inquiries::analytics(self.db()?, &since, days, 10).await
    }
}

fn to_new_record(inquiry: &Inquiry, outcome: &InquiryOutcome) -> NewInquiryRecord {
    NewInquiryRecord {
        processing_id: outcome.processing_id.clone(),
        email: inquiry.email.clone(),
        name: inquiry.name.clone(),
        phone: inquiry.phone.clone(),
        category: outcome.category.to_string(),
        message: inquiry.message.clone(),
        response: outcome.response.clone(),
        email_title: outcome.email_title.clone(),
        email_body: outcome.email_body.clone(),
        listing_id: Some(inquiry.listing_id.clone()),
        created_at: outcome.processed_at.clone(),
    }
}

#[async_trait]
impl ServiceAdapter for SqliteRecorder {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, InquiraError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), InquiraError> {
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl InquiryRecorder for SqliteRecorder {
    async fn record(
        &self,
        inquiry: &Inquiry,
        outcome: &InquiryOutcome,
    ) -> Result<(), InquiraError> {
        let id = queries::inquiries::insert(self.db()?, to_new_record(inquiry, outcome)).await?;
        debug!(id, email = inquiry.email.as_str(), "inquiry recorded");
        Ok(())
    }

    async fn record_batch(
        &self,
        inquiries: &[Inquiry],
        outcomes: &[InquiryOutcome],
    ) -> Result<(), InquiraError> {
        if inquiries.len() != outcomes.len() {
            return Err(InquiraError::Validation(format!(
                "batch length mismatch: {} inquiries, {} outcomes",
                inquiries.len(),
                outcomes.len()
            )));
        }
        let records = inquiries
            .iter()
            .zip(outcomes)
            .map(|(inquiry, outcome)| to_new_record(inquiry, outcome))
            .collect();
        let count = queries::inquiries::insert_batch(self.db()?, records).await?;
        debug!(count, "inquiry batch recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inquira_core::Category;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    fn inquiry(email: &str, message: &str) -> Inquiry {
        Inquiry {
            listing_id: "L-9".into(),
            name: "Buyer".into(),
            email: email.into(),
            message: message.into(),
            phone: Some("555-0101".into()),
            submitted_at: None,
        }
    }

    fn outcome(email: &str, category: Category) -> InquiryOutcome {
        InquiryOutcome {
            email: email.into(),
            category,
            response: "a response".into(),
            email_title: None,
            email_body: None,
            processing_id: uuid::Uuid::new_v4().to_string(),
            processed_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    #[tokio::test]
    async fn recorder_implements_service_adapter() {
        let dir = tempdir().unwrap();
        let recorder =
            SqliteRecorder::new(make_config(dir.path().join("r.db").to_str().unwrap()));
        assert_eq!(recorder.name(), "sqlite");
        assert_eq!(recorder.adapter_type(), AdapterType::Storage);
    }

    #[tokio::test]
    async fn record_before_initialize_fails_uninitialized() {
        let dir = tempdir().unwrap();
        let recorder =
            SqliteRecorder::new(make_config(dir.path().join("r.db").to_str().unwrap()));
        let result = recorder
            .record(&inquiry("a@b.com", "hi"), &outcome("a@b.com", Category::GeneralInquiry))
            .await;
        assert!(matches!(result, Err(InquiraError::Uninitialized { .. })));
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let recorder =
            SqliteRecorder::new(make_config(dir.path().join("r.db").to_str().unwrap()));
        recorder.initialize().await.unwrap();
        assert!(recorder.initialize().await.is_err());
    }

    #[tokio::test]
    async fn record_and_list_round_trip() {
        let dir = tempdir().unwrap();
        let recorder =
            SqliteRecorder::new(make_config(dir.path().join("r.db").to_str().unwrap()));
        recorder.initialize().await.unwrap();

        recorder
            .record(
                &inquiry("a@b.com", "how much?"),
                &outcome("a@b.com", Category::PriceInquiry),
            )
            .await
            .unwrap();

        let rows = recorder.list(HistoryFilter::new()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, "Price Inquiry");
        assert_eq!(rows[0].listing_id.as_deref(), Some("L-9"));
        assert_eq!(rows[0].phone.as_deref(), Some("555-0101"));
    }

    #[tokio::test]
    async fn record_batch_persists_index_aligned_rows() {
        let dir = tempdir().unwrap();
        let recorder =
            SqliteRecorder::new(make_config(dir.path().join("r.db").to_str().unwrap()));
        recorder.initialize().await.unwrap();

        let inquiries = vec![inquiry("a@b.com", "one"), inquiry("c@d.com", "two")];
        let outcomes = vec![
            outcome("a@b.com", Category::GeneralInquiry),
            outcome("c@d.com", Category::ScheduleVisit),
        ];
        recorder.record_batch(&inquiries, &outcomes).await.unwrap();

        let rows = recorder.list(HistoryFilter::new()).await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn record_batch_rejects_length_mismatch() {
        let dir = tempdir().unwrap();
        let recorder =
            SqliteRecorder::new(make_config(dir.path().join("r.db").to_str().unwrap()));
        recorder.initialize().await.unwrap();

        let result = recorder
            .record_batch(
                &[inquiry("a@b.com", "one")],
                &[],
            )
            .await;
        assert!(matches!(result, Err(InquiraError::Validation(_))));
    }

    #[tokio::test]
    async fn health_check_healthy_after_initialize() {
        let dir = tempdir().unwrap();
        let recorder =
            SqliteRecorder::new(make_config(dir.path().join("r.db").to_str().unwrap()));
        recorder.initialize().await.unwrap();
        assert_eq!(recorder.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn health_check_fails_before_initialize() {
        let dir = tempdir().unwrap();
        let recorder =
            SqliteRecorder::new(make_config(dir.path().join("r.db").to_str().unwrap()));
        assert!(recorder.health_check().await.is_err());
    }

    #[tokio::test]
    async fn analytics_counts_recent_records() {
        let dir = tempdir().unwrap();
        let recorder =
            SqliteRecorder::new(make_config(dir.path().join("r.db").to_str().unwrap()));
        recorder.initialize().await.unwrap();

        recorder
            .record(
                &inquiry("a@b.com", "hi"),
                &outcome("a@b.com", Category::GeneralInquiry),
            )
            .await
            .unwrap();

        let summary = recorder.analytics(30).await.unwrap();
        assert_eq!(summary.total_inquiries, 1);
        assert_eq!(
            summary.category_distribution.get("General Inquiry"),
            Some(&1)
        );
    }
}
