//! Text measurement for layout
//!
//! Layout measures text through a global [`TextMeasurer`]. Until a renderer
//! installs one backed by real font metrics, an estimate is used.

use std::sync::{Arc, PoisonError, RwLock};

/// Text layout options that affect measurement
#[derive(Debug, Clone, Default)]
pub struct TextLayoutOptions {
    /// Line height multiplier (1.0 = font size)
    pub line_height: f32,
    /// Extra spacing between letters in pixels
    pub letter_spacing: f32,
}

impl TextLayoutOptions {
    pub fn new() -> Self {
        Self {
            line_height: 1.2,
            letter_spacing: 0.0,
        }
    }

    pub fn with_line_height(mut self, height: f32) -> Self {
        self.line_height = height;
        self
    }

    pub fn with_letter_spacing(mut self, spacing: f32) -> Self {
        self.letter_spacing = spacing;
        self
    }
}

/// Text measurement result
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    /// Line height times line count
    pub height: f32,
    /// Distance from baseline to top
    pub ascender: f32,
    /// Distance from baseline to bottom, negative
    pub descender: f32,
}

/// Trait for measuring text dimensions
pub trait TextMeasurer: Send + Sync {
    fn measure_with_options(
        &self,
        text: &str,
        font_size: f32,
        options: &TextLayoutOptions,
    ) -> TextMetrics;

    fn measure(&self, text: &str, font_size: f32) -> TextMetrics {
        self.measure_with_options(text, font_size, &TextLayoutOptions::new())
    }
}

/// Fixed-advance estimate: 0.55 × font size per character
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure_with_options(
        &self,
        text: &str,
        font_size: f32,
        options: &TextLayoutOptions,
    ) -> TextMetrics {
        let char_count = text.chars().count() as f32;
        let spacing = if char_count > 1.0 {
            (char_count - 1.0) * options.letter_spacing
        } else {
            0.0
        };

        TextMetrics {
            width: char_count * font_size * 0.55 + spacing,
            height: font_size * options.line_height,
            ascender: font_size * 0.8,
            descender: font_size * -0.2,
        }
    }
}

static TEXT_MEASURER: RwLock<Option<Arc<dyn TextMeasurer>>> = RwLock::new(None);

/// Install the measurer used by layout and painting
pub fn set_text_measurer(measurer: Arc<dyn TextMeasurer>) {
    let mut guard = TEXT_MEASURER.write().unwrap_or_else(PoisonError::into_inner);
    *guard = Some(measurer);
}

/// Go back to estimated measurement
pub fn clear_text_measurer() {
    let mut guard = TEXT_MEASURER.write().unwrap_or_else(PoisonError::into_inner);
    *guard = None;
}

/// Measure text using the global measurer, or fall back to estimation
pub fn measure_text(text: &str, font_size: f32) -> TextMetrics {
    measure_text_with_options(text, font_size, &TextLayoutOptions::new())
}

pub fn measure_text_with_options(
    text: &str,
    font_size: f32,
    options: &TextLayoutOptions,
) -> TextMetrics {
    let guard = TEXT_MEASURER.read().unwrap_or_else(PoisonError::into_inner);
    match guard.as_ref() {
        Some(measurer) => measurer.measure_with_options(text, font_size, options),
        None => EstimatedTextMeasurer.measure_with_options(text, font_size, options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate() {
        let metrics = EstimatedTextMeasurer.measure("0.5", 10.0);
        assert!((metrics.width - 16.5).abs() < 1e-4);
        assert!((metrics.height - 12.0).abs() < 1e-4);
        assert!((metrics.ascender - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_letter_spacing_between_characters_only() {
        let options = TextLayoutOptions::new().with_letter_spacing(1.0);
        let metrics = EstimatedTextMeasurer.measure_with_options("ab", 10.0, &options);
        assert!((metrics.width - 12.0).abs() < 1e-4);
    }
}
