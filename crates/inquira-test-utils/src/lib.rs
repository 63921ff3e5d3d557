// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Inquira integration tests.
//!
//! Mock adapters for every service seam plus a [`TestHarness`] wiring a
//! complete pipeline over temp-file SQLite storage.

pub mod harness;
pub mod mock_provider;
pub mod mocks;

pub use harness::{make_inquiry, make_inquiry_for, TestHarness, TestHarnessBuilder};
pub use mock_provider::MockProvider;
pub use mocks::{MockEmbedder, MockNotifier, MockRetriever};
