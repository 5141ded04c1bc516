// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Font data model

pub mod outline;
pub mod ufo;

pub use ufo::UfoFont;
