// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules over the inquiry-history database.

pub mod inquiries;
