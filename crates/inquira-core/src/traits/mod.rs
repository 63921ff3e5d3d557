// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Inquira service seams.
//!
//! All adapters extend the [`ServiceAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod embedding;
pub mod notifier;
pub mod provider;
pub mod recorder;
pub mod retriever;

// Re-export all traits at the traits module level for convenience.
pub use adapter::ServiceAdapter;
pub use embedding::EmbeddingProvider;
pub use notifier::Notifier;
pub use provider::CompletionProvider;
pub use recorder::InquiryRecorder;
pub use retriever::ListingRetriever;
