// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Drawing surfaces for the overlay

pub mod recording;
pub mod scene;

pub use recording::{DrawCommand, RecordingSurface};
pub use scene::SceneSurface;
