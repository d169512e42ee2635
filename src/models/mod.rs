// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod summary;
pub mod tokens;

pub use activity::Activity;
pub use summary::RunSummary;
pub use tokens::{AuthorizationCode, CredentialBundle};
