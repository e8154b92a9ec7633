//! Site configuration.
//!
//! Settings load from a JSON file when one is given; missing fields fall back to the defaults of
//! the production landing page. A few values can be overridden from the environment.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::field::renderer::FieldStyle;
use crate::foundation::core::ViewportState;
use crate::foundation::error::{RetrospectError, RetrospectResult};
use crate::visibility::selector::Selector;

/// Environment variable overriding [`SiteConfig::store_path`].
pub const STORE_PATH_ENV: &str = "RETROSPECT_STORE_PATH";

/// Initial viewport used before real measurements arrive.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl ViewportConfig {
    /// Unscrolled viewport state.
    pub fn state(&self) -> ViewportState {
        ViewportState::new(self.width, self.height, 0.0)
    }
}

/// One full-viewport page section.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SectionConfig {
    /// Name used in logs and lookups.
    pub name: String,
    /// Selector of the descendant that receives the marker class.
    pub selector: String,
}

/// Top-level settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Initial viewport.
    pub viewport: ViewportConfig,
    /// Class toggled on section content while the section is in view.
    pub marker_class: String,
    /// Sections stacked top to bottom.
    pub sections: Vec<SectionConfig>,
    /// Height of each section as a multiple of the viewport height.
    pub section_height_vh: f64,
    /// The scroll hint shows while `scroll_offset < height * scroll_hint_fraction`.
    pub scroll_hint_fraction: f64,
    /// Backdrop paint settings.
    pub field: FieldStyle,
    /// Waitlist JSON store location.
    pub store_path: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            marker_class: "pop-out-element".to_string(),
            sections: vec![
                SectionConfig {
                    name: "first".to_string(),
                    selector: ".child-1".to_string(),
                },
                SectionConfig {
                    name: "second".to_string(),
                    selector: ".child-2".to_string(),
                },
            ],
            section_height_vh: 1.2,
            scroll_hint_fraction: 1.0 / 3.0,
            field: FieldStyle::default(),
            store_path: PathBuf::from("waitlist.json"),
        }
    }
}

impl SiteConfig {
    /// Load from a JSON file and validate.
    pub fn from_path(path: impl AsRef<Path>) -> RetrospectResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RetrospectError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| RetrospectError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse from a JSON string and validate.
    pub fn from_json_str(s: &str) -> RetrospectResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| RetrospectError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(p) = lookup(STORE_PATH_ENV).filter(|v| !v.trim().is_empty()) {
            self.store_path = PathBuf::from(p);
        }
        self
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> RetrospectResult<()> {
        if self.marker_class.trim().is_empty() || self.marker_class.contains(char::is_whitespace)
        {
            return Err(RetrospectError::validation(
                "marker_class must be a single non-empty class name",
            ));
        }
        if !(self.section_height_vh.is_finite() && self.section_height_vh > 0.0) {
            return Err(RetrospectError::validation(
                "section_height_vh must be finite and > 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.scroll_hint_fraction) {
            return Err(RetrospectError::validation(
                "scroll_hint_fraction must be in [0, 1]",
            ));
        }
        for s in &self.sections {
            Selector::parse(&s.selector).map_err(|e| {
                RetrospectError::validation(format!("section '{}': {e}", s.name))
            })?;
        }
        self.field.validate()
    }
}
