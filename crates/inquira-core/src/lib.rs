// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Inquira inquiry assistant.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the Inquira workspace. All service adapters
//! implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::InquiraError;
pub use types::{
    AdapterType, Category, HealthStatus, Inquiry, InquiryOutcome, NotifyStatus, ScoredChunk,
    CANONICAL_CATEGORIES,
};

// Re-export all adapter traits at crate root.
pub use traits::{
    CompletionProvider, EmbeddingProvider, InquiryRecorder, ListingRetriever, Notifier,
    ServiceAdapter,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inquira_error_has_all_variants() {
        // Verify all 8 error variants exist and can be constructed.
        let _config = InquiraError::Config("test".into());
        let _storage = InquiraError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _provider = InquiraError::Provider {
            message: "test".into(),
            source: None,
        };
        let _notification = InquiraError::Notification {
            message: "test".into(),
            source: None,
        };
        let _uninitialized = InquiraError::uninitialized("listing index");
        let _validation = InquiraError::Validation("test".into());
        let _timeout = InquiraError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _internal = InquiraError::Internal("test".into());
    }

    #[test]
    fn uninitialized_error_names_component() {
        let err = InquiraError::uninitialized("listing index");
        assert_eq!(err.to_string(), "listing index used before initialization");
    }

    #[test]
    fn canonical_set_has_six_categories() {
        assert_eq!(CANONICAL_CATEGORIES.len(), 6);
        assert!(!CANONICAL_CATEGORIES.contains(&Category::Unknown));
    }

    #[test]
    fn all_trait_modules_are_exported() {
        // This test verifies that all adapter trait modules compile and are
        // accessible through the public API. If any module is missing or has
        // a compile error, this test won't compile.
        fn _assert_service_adapter<T: ServiceAdapter>() {}
        fn _assert_completion_provider<T: CompletionProvider>() {}
        fn _assert_embedding_provider<T: EmbeddingProvider>() {}
        fn _assert_listing_retriever<T: ListingRetriever>() {}
        fn _assert_notifier<T: Notifier>() {}
        fn _assert_inquiry_recorder<T: InquiryRecorder>() {}
    }
}
