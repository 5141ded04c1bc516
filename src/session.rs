// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Overlay session - toggle state and the recompute/render cycle
//!
//! The editor owns one session per glyph window and forwards its events
//! here. Every event ends in [`PatterningSession::recompute_and_render`],
//! which reads the unit and metrics fresh, recomputes the layout, and
//! replaces whatever the surface showed before.

use thiserror::Error;

use crate::config::PatterningConfig;
use crate::host::{DrawingSurface, MetricsProvider, UnitStore, read_unit_or_init};
use crate::layout::{LayoutError, Metrics, compute_layout};
use crate::render::render_layout;

/// Anything that can supply metrics and store the unit
pub trait PatterningHost: MetricsProvider + UnitStore {}

impl<T: MetricsProvider + UnitStore + ?Sized> PatterningHost for T {}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error("unit must be a whole number, got {0:?}")]
    UnparsableUnit(String),

    #[error("unit must be positive, got {0}")]
    NonPositiveUnit(i64),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Toggle state for one glyph window
#[derive(Debug, Clone)]
pub struct PatterningSession {
    /// Whether the grid and labels are shown
    pub visible: bool,
    /// Whether the unit settings panel is open
    pub settings_open: bool,
    config: PatterningConfig,
}

impl Default for PatterningSession {
    fn default() -> Self {
        Self::new(PatterningConfig::default())
    }
}

impl PatterningSession {
    pub fn new(config: PatterningConfig) -> Self {
        Self {
            visible: config.show_on_start,
            settings_open: false,
            config,
        }
    }

    pub fn config(&self) -> &PatterningConfig {
        &self.config
    }

    /// Title for the show/hide button
    pub fn toggle_button_title(&self) -> &'static str {
        if self.visible {
            "Hide patterning"
        } else {
            "Show patterning"
        }
    }

    // ============================================================================
    // EDITOR EVENTS
    // ============================================================================

    /// The editor switched to another glyph
    pub fn on_glyph_changed<H, S>(
        &mut self,
        host: &mut H,
        surface: &mut S,
    ) -> Result<(), SessionError>
    where
        H: PatterningHost + ?Sized,
        S: DrawingSurface + ?Sized,
    {
        self.recompute_and_render(host, surface)
    }

    /// Width or outline of the current glyph changed
    pub fn on_metrics_changed<H, S>(
        &mut self,
        host: &mut H,
        surface: &mut S,
    ) -> Result<(), SessionError>
    where
        H: PatterningHost + ?Sized,
        S: DrawingSurface + ?Sized,
    {
        self.recompute_and_render(host, surface)
    }

    /// The view was zoomed
    pub fn on_scale_changed<H, S>(
        &mut self,
        host: &mut H,
        surface: &mut S,
    ) -> Result<(), SessionError>
    where
        H: PatterningHost + ?Sized,
        S: DrawingSurface + ?Sized,
    {
        self.recompute_and_render(host, surface)
    }

    // ============================================================================
    // USER ACTIONS
    // ============================================================================

    /// Show or hide the overlay
    pub fn toggle_visibility<H, S>(
        &mut self,
        host: &mut H,
        surface: &mut S,
    ) -> Result<(), SessionError>
    where
        H: PatterningHost + ?Sized,
        S: DrawingSurface + ?Sized,
    {
        self.visible = !self.visible;
        tracing::debug!("Patterning visible: {}", self.visible);
        self.recompute_and_render(host, surface)
    }

    /// Open or close the unit settings panel, returning the new state
    pub fn toggle_settings(&mut self) -> bool {
        self.settings_open = !self.settings_open;
        self.settings_open
    }

    /// The unit currently stored with the font (written with the default
    /// if missing)
    pub fn current_unit<H: UnitStore + ?Sized>(&self, host: &mut H) -> i64 {
        read_unit_or_init(host, self.config.default_unit)
    }

    /// Store a new unit with the font and redraw.
    ///
    /// Non-positive units are rejected and nothing is written.
    pub fn set_unit<H, S>(
        &mut self,
        host: &mut H,
        surface: &mut S,
        unit: i64,
    ) -> Result<(), SessionError>
    where
        H: PatterningHost + ?Sized,
        S: DrawingSurface + ?Sized,
    {
        if unit <= 0 {
            tracing::warn!("Rejected grid unit {}", unit);
            return Err(SessionError::NonPositiveUnit(unit));
        }
        tracing::info!("Grid unit set to {}", unit);
        host.store_unit(unit);
        self.recompute_and_render(host, surface)
    }

    /// Parse a unit typed into the settings panel and apply it
    pub fn submit_unit_text<H, S>(
        &mut self,
        host: &mut H,
        surface: &mut S,
        text: &str,
    ) -> Result<(), SessionError>
    where
        H: PatterningHost + ?Sized,
        S: DrawingSurface + ?Sized,
    {
        let unit = text.trim().parse::<i64>().map_err(|_| {
            tracing::warn!("Could not parse grid unit {:?}", text);
            SessionError::UnparsableUnit(text.to_string())
        })?;
        self.set_unit(host, surface, unit)
    }

    // ============================================================================
    // RENDER
    // ============================================================================

    /// Recompute the layout from fresh metrics and redraw the surface.
    ///
    /// A hidden overlay or a missing glyph leaves the surface empty. If the
    /// stored unit is unusable the surface is cleared and the error returned
    /// so the caller can ask for a new one.
    pub fn recompute_and_render<H, S>(
        &mut self,
        host: &mut H,
        surface: &mut S,
    ) -> Result<(), SessionError>
    where
        H: PatterningHost + ?Sized,
        S: DrawingSurface + ?Sized,
    {
        if !self.visible {
            surface.clear();
            return Ok(());
        }

        let unit = self.current_unit(host);
        let Some(glyph) = host.glyph_metrics() else {
            tracing::debug!("No glyph set, nothing to draw");
            surface.clear();
            return Ok(());
        };

        let metrics = Metrics {
            unit: unit as f64,
            descender: glyph.descender,
            units_per_em: glyph.units_per_em,
            width: glyph.width,
            left_margin: glyph.left_margin,
            right_margin: glyph.right_margin,
        };

        match compute_layout(&metrics) {
            Ok(layout) => {
                tracing::debug!(
                    "Patterning layout: {} lines, unit {}",
                    layout.lines.len(),
                    unit
                );
                render_layout(surface, &layout, self.config.label_point_size);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Cannot draw patterning: {}", e);
                surface.clear();
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::GlyphMetrics;
    use crate::surface::RecordingSurface;

    struct FakeHost {
        glyph: Option<GlyphMetrics>,
        unit: Option<i64>,
    }

    impl FakeHost {
        fn with_width(width: f64) -> Self {
            Self {
                glyph: Some(GlyphMetrics {
                    width,
                    left_margin: 40.0,
                    right_margin: 40.0,
                    descender: -200.0,
                    units_per_em: 1000.0,
                }),
                unit: None,
            }
        }
    }

    impl MetricsProvider for FakeHost {
        fn glyph_metrics(&self) -> Option<GlyphMetrics> {
            self.glyph
        }
    }

    impl UnitStore for FakeHost {
        fn stored_unit(&self) -> Option<i64> {
            self.unit
        }

        fn store_unit(&mut self, unit: i64) {
            self.unit = Some(unit);
        }
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn visible_session() -> PatterningSession {
        let mut session = PatterningSession::default();
        session.visible = true;
        session
    }

    #[test]
    fn test_starts_hidden() {
        let session = PatterningSession::default();
        assert!(!session.visible);
        assert!(!session.settings_open);
        assert_eq!(session.toggle_button_title(), "Show patterning");
    }

    #[test]
    fn test_show_on_start_from_config() {
        let session = PatterningSession::new(PatterningConfig {
            show_on_start: true,
            ..Default::default()
        });
        assert!(session.visible);
        assert_eq!(session.toggle_button_title(), "Hide patterning");
    }

    #[test]
    fn test_toggle_draws_and_clears() {
        init_tracing();
        let mut host = FakeHost::with_width(600.0);
        let mut surface = RecordingSurface::default();
        let mut session = PatterningSession::default();

        session.toggle_visibility(&mut host, &mut surface).unwrap();
        assert!(session.visible);
        assert_eq!(surface.text_strings(), vec!["|||30", "2", "2"]);

        session.toggle_visibility(&mut host, &mut surface).unwrap();
        assert!(!session.visible);
        assert!(surface.is_empty());
    }

    #[test]
    fn test_missing_unit_written_with_default() {
        let mut host = FakeHost::with_width(600.0);
        let mut surface = RecordingSurface::default();
        let mut session = visible_session();

        session.on_glyph_changed(&mut host, &mut surface).unwrap();
        assert_eq!(host.unit, Some(20));
    }

    #[test]
    fn test_hidden_session_leaves_unit_alone() {
        let mut host = FakeHost::with_width(600.0);
        let mut surface = RecordingSurface::default();
        let mut session = PatterningSession::default();

        session.on_metrics_changed(&mut host, &mut surface).unwrap();
        assert_eq!(host.unit, None);
        assert!(surface.is_empty());
    }

    #[test]
    fn test_metrics_change_redraws() {
        let mut host = FakeHost::with_width(600.0);
        let mut surface = RecordingSurface::default();
        let mut session = visible_session();

        session.on_glyph_changed(&mut host, &mut surface).unwrap();
        if let Some(glyph) = host.glyph.as_mut() {
            glyph.width = 605.0;
        }
        session.on_metrics_changed(&mut host, &mut surface).unwrap();

        assert_eq!(surface.clear_count(), 2);
        assert_eq!(surface.text_strings()[0], "|||30.25");
    }

    #[test]
    fn test_scale_change_redraws_same_layout() {
        let mut host = FakeHost::with_width(600.0);
        let mut surface = RecordingSurface::default();
        let mut session = visible_session();

        session.on_glyph_changed(&mut host, &mut surface).unwrap();
        let before = surface.text_strings().join(",");
        let line_count = surface.lines().count();

        session.on_scale_changed(&mut host, &mut surface).unwrap();
        assert_eq!(surface.text_strings().join(","), before);
        assert_eq!(surface.lines().count(), line_count);
    }

    #[test]
    fn test_no_glyph_clears() {
        let mut host = FakeHost {
            glyph: None,
            unit: Some(20),
        };
        let mut surface = RecordingSurface::default();
        let mut session = visible_session();

        session.on_glyph_changed(&mut host, &mut surface).unwrap();
        assert!(surface.is_empty());
        assert_eq!(surface.clear_count(), 1);
    }

    #[test]
    fn test_set_unit_stores_and_redraws() {
        let mut host = FakeHost::with_width(600.0);
        let mut surface = RecordingSurface::default();
        let mut session = visible_session();

        session.set_unit(&mut host, &mut surface, 50).unwrap();
        assert_eq!(host.unit, Some(50));
        assert_eq!(surface.text_strings()[0], "|||12");
    }

    #[test]
    fn test_set_unit_rejects_non_positive() {
        let mut host = FakeHost::with_width(600.0);
        host.unit = Some(20);
        let mut surface = RecordingSurface::default();
        let mut session = visible_session();

        assert_eq!(
            session.set_unit(&mut host, &mut surface, 0),
            Err(SessionError::NonPositiveUnit(0))
        );
        assert_eq!(
            session.set_unit(&mut host, &mut surface, -5),
            Err(SessionError::NonPositiveUnit(-5))
        );
        assert_eq!(host.unit, Some(20));
    }

    #[test]
    fn test_submit_unit_text() {
        let mut host = FakeHost::with_width(600.0);
        let mut surface = RecordingSurface::default();
        let mut session = visible_session();

        session.submit_unit_text(&mut host, &mut surface, " 25 ").unwrap();
        assert_eq!(host.unit, Some(25));

        assert_eq!(
            session.submit_unit_text(&mut host, &mut surface, "abc"),
            Err(SessionError::UnparsableUnit("abc".to_string()))
        );
        assert_eq!(host.unit, Some(25));
    }

    #[test]
    fn test_corrupt_stored_unit_reports_error() {
        let mut host = FakeHost::with_width(600.0);
        host.unit = Some(0);
        let mut surface = RecordingSurface::default();
        let mut session = visible_session();

        let result = session.on_glyph_changed(&mut host, &mut surface);
        assert!(matches!(
            result,
            Err(SessionError::Layout(LayoutError::InvalidUnit(_)))
        ));
        assert!(surface.is_empty());
    }

    #[test]
    fn test_toggle_settings() {
        let mut session = PatterningSession::default();
        assert!(session.toggle_settings());
        assert!(session.settings_open);
        assert!(!session.toggle_settings());
    }

    #[test]
    fn test_current_unit() {
        let mut host = FakeHost::with_width(600.0);
        let session = PatterningSession::default();
        assert_eq!(session.current_unit(&mut host), 20);
        host.unit = Some(32);
        assert_eq!(session.current_unit(&mut host), 32);
    }
}
