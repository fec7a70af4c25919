//! Book configuration
//!
//! A flat set of named options supplied at construction and immutable for
//! the instance's lifetime. Options arrive either as a ready-made
//! [`BookOptions`] value or as a dataset-style string map (the way embedding
//! markup carries them), coerced field by field over the defaults.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum OptionsError {
    /// A book needs at least one page.
    #[error("page count must be at least 1, got {0}")]
    NoPages(u32),

    /// Zero or negative dimensions cannot be laid out.
    #[error("book dimensions must be positive, got {width}x{height}")]
    BadDimensions { width: f32, height: f32 },

    /// The gesture threshold must allow some movement.
    #[error("swipe threshold must be positive, got {0}")]
    BadThreshold(f32),

    /// A dataset value did not fit the option it names.
    #[error("invalid dataset options: {0}")]
    Dataset(#[from] serde_json::Error),
}

/// Behavior when paging past the first or last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Walk the book closed (cascade close).
    #[default]
    Close,
    /// Stay on the current page.
    None,
}

/// Image references for the book faces. Opaque to the core; the renderer
/// resolves them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookImages {
    pub cover: String,
    pub back: String,
    pub spine: String,
    pub pages_top: String,
    pub pages_side: String,
    pub pages_bottom: String,
    /// One entry per page face, front to back.
    pub pages: Vec<String>,
}

/// All per-instance configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookOptions {
    // dimensions
    pub width: f32,
    pub height: f32,
    pub spine: f32,
    pub cover_thickness: f32,
    pub cover_color: String,
    pub spine_thickness: f32,
    pub spine_color: String,
    pub pages_offset: f32,
    pub pages: u32,
    pub pages_color: String,

    // initial book rotation
    pub rotate_x: f32,
    pub rotate_y: f32,
    pub rotate_z: f32,

    // interactions
    pub page_click: bool,
    pub page_swipe: bool,
    pub page_click_first: BoundaryPolicy,
    pub page_click_last: BoundaryPolicy,
    pub book_click: bool,
    pub book_rotate_x: bool,
    pub book_rotate_y: bool,
    /// Movement threshold for tap vs. drag disambiguation, surface pixels.
    pub swipe_threshold: f32,

    // ui
    pub ui_buttons: bool,
    pub ui_pagination: bool,
    /// Visible bullet window size; 0 shows every bullet.
    pub ui_pagination_limit: usize,
    pub ui_pageing: bool,
    pub ui_pageing_div: String,

    // images
    pub images: BookImages,
}

impl Default for BookOptions {
    fn default() -> Self {
        Self {
            width: 210.0,
            height: 300.0,
            spine: 40.0,
            cover_thickness: 2.0,
            cover_color: "#999".to_string(),
            spine_thickness: 2.0,
            spine_color: "#999".to_string(),
            pages_offset: 2.0,
            pages: 20,
            pages_color: "#fff".to_string(),
            rotate_x: 0.0,
            rotate_y: 0.0,
            rotate_z: 0.0,
            page_click: true,
            page_swipe: true,
            page_click_first: BoundaryPolicy::Close,
            page_click_last: BoundaryPolicy::Close,
            book_click: true,
            book_rotate_x: true,
            book_rotate_y: true,
            swipe_threshold: 5.0,
            ui_buttons: true,
            ui_pagination: true,
            ui_pagination_limit: 9,
            ui_pageing: true,
            ui_pageing_div: "/".to_string(),
            images: BookImages::default(),
        }
    }
}

impl BookOptions {
    /// Build options from a dataset-style string map layered over the
    /// defaults. Values are coerced the way dataset attributes are written:
    /// `"true"`/`"false"` become booleans, numeric strings become numbers,
    /// bracketed strings are parsed as JSON, everything else stays a string.
    /// Unknown keys are ignored.
    pub fn from_dataset(dataset: &FxHashMap<String, String>) -> Result<Self, OptionsError> {
        let mut map = serde_json::Map::new();
        for (key, raw) in dataset {
            map.insert(key.clone(), coerce(raw));
        }
        let options: BookOptions = serde_json::from_value(Value::Object(map))?;
        options.validate()?;
        Ok(options)
    }

    /// Check construction-time invariants.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.pages < 1 {
            return Err(OptionsError::NoPages(self.pages));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(OptionsError::BadDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.swipe_threshold <= 0.0 {
            return Err(OptionsError::BadThreshold(self.swipe_threshold));
        }
        Ok(())
    }
}

fn coerce(raw: &str) -> Value {
    let trimmed = raw.trim();
    match trimmed {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "" => return Value::String(String::new()),
        _ => {}
    }
    if let Ok(integer) = trimmed.parse::<i64>() {
        return Value::Number(integer.into());
    }
    if let Ok(number) = trimmed.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(number) {
            return Value::Number(number);
        }
    }
    let bracketed = (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'));
    if bracketed {
        if let Ok(value) = serde_json::from_str(trimmed) {
            return value;
        }
    }
    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(pairs: &[(&str, &str)]) -> FxHashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_are_valid() {
        let options = BookOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.pages, 20);
        assert_eq!(options.page_click_last, BoundaryPolicy::Close);
    }

    #[test]
    fn test_dataset_coercions() {
        let options = BookOptions::from_dataset(&dataset(&[
            ("pages", "6"),
            ("pageClick", "false"),
            ("pageClickLast", "none"),
            ("coverColor", "#333"),
            ("uiPaginationLimit", "5"),
        ]))
        .unwrap();

        assert_eq!(options.pages, 6);
        assert!(!options.page_click);
        assert_eq!(options.page_click_last, BoundaryPolicy::None);
        assert_eq!(options.cover_color, "#333");
        assert_eq!(options.ui_pagination_limit, 5);
        // Untouched fields keep their defaults.
        assert!(options.page_swipe);
        assert_eq!(options.width, 210.0);
    }

    #[test]
    fn test_dataset_json_values() {
        let options = BookOptions::from_dataset(&dataset(&[(
            "images",
            r#"{"cover": "front.jpg", "pages": ["p0.jpg", "p1.jpg"]}"#,
        )]))
        .unwrap();

        assert_eq!(options.images.cover, "front.jpg");
        assert_eq!(options.images.pages, vec!["p0.jpg", "p1.jpg"]);
    }

    #[test]
    fn test_malformed_json_falls_back_to_string() {
        // An unparseable bracketed value lands in a string field untouched.
        let options =
            BookOptions::from_dataset(&dataset(&[("uiPageingDiv", "{not json")])).unwrap();
        assert_eq!(options.ui_pageing_div, "{not json");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let options = BookOptions::from_dataset(&dataset(&[("somethingElse", "42")])).unwrap();
        assert_eq!(options, BookOptions::default());
    }

    #[test]
    fn test_validation_rejects_empty_book() {
        let mut options = BookOptions::default();
        options.pages = 0;
        assert!(matches!(options.validate(), Err(OptionsError::NoPages(0))));
    }

    #[test]
    fn test_validation_rejects_bad_dimensions() {
        let mut options = BookOptions::default();
        options.height = 0.0;
        assert!(matches!(
            options.validate(),
            Err(OptionsError::BadDimensions { .. })
        ));
    }
}
