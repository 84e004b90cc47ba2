//! Theme design tokens
//!
//! A [`Theme`] bundles the colors and metrics widgets paint with. Themes are
//! plain data: build one in code, or load overrides from TOML on top of the
//! default dark palette.
//!
//! ```toml
//! [colors]
//! accent = "#3d8ee8"
//! text-primary = "#f0f0f0"
//!
//! [typography]
//! font_size_base = 12.0
//! ```
//!
//! The active theme lives in a global [`ThemeState`].

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use serde::Deserialize;

use crate::error::ThemeError;
use crate::layer::Color;

/// Semantic color slots
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorToken {
    Background,
    Surface,
    TextPrimary,
    TextSecondary,
    TextDisabled,
    Border,
    BorderFocus,
    Accent,
    InputBg,
    InputBgDisabled,
    SliderGroove,
    SliderHandle,
    SliderHandleActive,
    /// Slider readout text and tick marks
    Annotation,
    /// Dark half of a sunken rule
    LineShadow,
    /// Light half of a sunken rule
    LineLight,
}

impl ColorToken {
    pub const ALL: [ColorToken; 16] = [
        ColorToken::Background,
        ColorToken::Surface,
        ColorToken::TextPrimary,
        ColorToken::TextSecondary,
        ColorToken::TextDisabled,
        ColorToken::Border,
        ColorToken::BorderFocus,
        ColorToken::Accent,
        ColorToken::InputBg,
        ColorToken::InputBgDisabled,
        ColorToken::SliderGroove,
        ColorToken::SliderHandle,
        ColorToken::SliderHandleActive,
        ColorToken::Annotation,
        ColorToken::LineShadow,
        ColorToken::LineLight,
    ];

    /// Key used in theme files
    pub fn key(&self) -> &'static str {
        match self {
            ColorToken::Background => "background",
            ColorToken::Surface => "surface",
            ColorToken::TextPrimary => "text-primary",
            ColorToken::TextSecondary => "text-secondary",
            ColorToken::TextDisabled => "text-disabled",
            ColorToken::Border => "border",
            ColorToken::BorderFocus => "border-focus",
            ColorToken::Accent => "accent",
            ColorToken::InputBg => "input-bg",
            ColorToken::InputBgDisabled => "input-bg-disabled",
            ColorToken::SliderGroove => "slider-groove",
            ColorToken::SliderHandle => "slider-handle",
            ColorToken::SliderHandleActive => "slider-handle-active",
            ColorToken::Annotation => "annotation",
            ColorToken::LineShadow => "line-shadow",
            ColorToken::LineLight => "line-light",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|token| token.key() == key)
    }
}

/// Color values for every [`ColorToken`]
#[derive(Clone, Debug, PartialEq)]
pub struct ColorTokens {
    pub background: Color,
    pub surface: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_disabled: Color,
    pub border: Color,
    pub border_focus: Color,
    pub accent: Color,
    pub input_bg: Color,
    pub input_bg_disabled: Color,
    pub slider_groove: Color,
    pub slider_handle: Color,
    pub slider_handle_active: Color,
    pub annotation: Color,
    pub line_shadow: Color,
    pub line_light: Color,
}

impl ColorTokens {
    pub fn get(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Background => self.background,
            ColorToken::Surface => self.surface,
            ColorToken::TextPrimary => self.text_primary,
            ColorToken::TextSecondary => self.text_secondary,
            ColorToken::TextDisabled => self.text_disabled,
            ColorToken::Border => self.border,
            ColorToken::BorderFocus => self.border_focus,
            ColorToken::Accent => self.accent,
            ColorToken::InputBg => self.input_bg,
            ColorToken::InputBgDisabled => self.input_bg_disabled,
            ColorToken::SliderGroove => self.slider_groove,
            ColorToken::SliderHandle => self.slider_handle,
            ColorToken::SliderHandleActive => self.slider_handle_active,
            ColorToken::Annotation => self.annotation,
            ColorToken::LineShadow => self.line_shadow,
            ColorToken::LineLight => self.line_light,
        }
    }

    pub fn set(&mut self, token: ColorToken, color: Color) {
        let slot = match token {
            ColorToken::Background => &mut self.background,
            ColorToken::Surface => &mut self.surface,
            ColorToken::TextPrimary => &mut self.text_primary,
            ColorToken::TextSecondary => &mut self.text_secondary,
            ColorToken::TextDisabled => &mut self.text_disabled,
            ColorToken::Border => &mut self.border,
            ColorToken::BorderFocus => &mut self.border_focus,
            ColorToken::Accent => &mut self.accent,
            ColorToken::InputBg => &mut self.input_bg,
            ColorToken::InputBgDisabled => &mut self.input_bg_disabled,
            ColorToken::SliderGroove => &mut self.slider_groove,
            ColorToken::SliderHandle => &mut self.slider_handle,
            ColorToken::SliderHandleActive => &mut self.slider_handle_active,
            ColorToken::Annotation => &mut self.annotation,
            ColorToken::LineShadow => &mut self.line_shadow,
            ColorToken::LineLight => &mut self.line_light,
        };
        *slot = color;
    }
}

impl Default for ColorTokens {
    fn default() -> Self {
        Self {
            background: Color::from_hex(0x2B2B2B),
            surface: Color::from_hex(0x323232),
            text_primary: Color::from_hex(0xDCDCDC),
            text_secondary: Color::from_hex(0xA0A0A0),
            text_disabled: Color::from_hex(0x6E6E6E),
            border: Color::from_hex(0x1E1E1E),
            border_focus: Color::from_hex(0x5285A6),
            accent: Color::from_hex(0x5285A6),
            input_bg: Color::from_hex(0x242424),
            input_bg_disabled: Color::from_hex(0x2E2E2E),
            slider_groove: Color::from_hex(0x1A1A1A),
            slider_handle: Color::from_hex(0x8C8C8C),
            slider_handle_active: Color::from_hex(0xB4B4B4),
            annotation: Color::WHITE,
            line_shadow: Color::from_hex(0x161616),
            line_light: Color::from_hex(0x484848),
        }
    }
}

/// Font sizes
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TypographyTokens {
    pub font_size_base: f32,
    pub font_size_sm: f32,
    /// Line height as a multiple of the font size
    pub line_height: f32,
}

impl Default for TypographyTokens {
    fn default() -> Self {
        Self {
            font_size_base: 13.0,
            font_size_sm: 11.0,
            line_height: 1.2,
        }
    }
}

/// Corner radii
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RadiusTokens {
    pub radius_sm: f32,
    pub radius_default: f32,
}

impl Default for RadiusTokens {
    fn default() -> Self {
        Self {
            radius_sm: 2.0,
            radius_default: 3.0,
        }
    }
}

/// Intrinsic sizes of primitive controls
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MetricTokens {
    pub slider_height: f32,
    pub slider_groove_height: f32,
    pub slider_handle_width: f32,
    pub slider_min_width: f32,
    pub checkbox_size: f32,
    pub spin_box_width: f32,
    pub spin_box_height: f32,
    /// Pixels of horizontal drag per spin box step
    pub spin_box_drag_step: f32,
}

impl Default for MetricTokens {
    fn default() -> Self {
        Self {
            slider_height: 24.0,
            slider_groove_height: 4.0,
            slider_handle_width: 8.0,
            slider_min_width: 84.0,
            checkbox_size: 13.0,
            spin_box_width: 48.0,
            spin_box_height: 20.0,
            spin_box_drag_step: 4.0,
        }
    }
}

/// Complete set of design tokens
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Theme {
    pub colors: ColorTokens,
    pub typography: TypographyTokens,
    pub radii: RadiusTokens,
    pub metrics: MetricTokens,
}

/// On-disk shape: every section optional, colors as hex strings
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ThemeFile {
    colors: BTreeMap<String, String>,
    typography: TypographyTokens,
    radii: RadiusTokens,
    metrics: MetricTokens,
}

impl Theme {
    /// Look up a color token
    pub fn color(&self, token: ColorToken) -> Color {
        self.colors.get(token)
    }

    /// Parse a TOML theme; missing entries keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ThemeError> {
        let file: ThemeFile = toml::from_str(source)?;

        let mut colors = ColorTokens::default();
        for (key, value) in &file.colors {
            let token = ColorToken::from_key(key)
                .ok_or_else(|| ThemeError::InvalidColor(format!("unknown token `{key}`")))?;
            let color = Color::parse_hex(value)
                .ok_or_else(|| ThemeError::InvalidColor(format!("{key} = \"{value}\"")))?;
            colors.set(token, color);
        }

        Ok(Self {
            colors,
            typography: file.typography,
            radii: file.radii,
            metrics: file.metrics,
        })
    }

    /// Read and parse a TOML theme file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let theme = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "loaded theme");
        Ok(theme)
    }
}

/// Global theme state
static THEME_STATE: OnceLock<RwLock<Arc<Theme>>> = OnceLock::new();

/// Access point for the active theme
pub struct ThemeState;

impl ThemeState {
    fn cell() -> &'static RwLock<Arc<Theme>> {
        THEME_STATE.get_or_init(|| RwLock::new(Arc::new(Theme::default())))
    }

    /// Install `theme` as the active theme
    pub fn init(theme: Theme) {
        if THEME_STATE.set(RwLock::new(Arc::new(theme.clone()))).is_err() {
            Self::set(theme);
        }
    }

    /// Install the default theme unless one is active
    pub fn init_default() {
        Self::cell();
    }

    /// The active theme, or the defaults if none was installed
    pub fn get() -> Arc<Theme> {
        Self::cell()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The active theme, if one was installed
    pub fn try_get() -> Option<Arc<Theme>> {
        THEME_STATE
            .get()
            .map(|lock| lock.read().unwrap_or_else(PoisonError::into_inner).clone())
    }

    /// Replace the active theme
    pub fn set(theme: Theme) {
        *Self::cell().write().unwrap_or_else(PoisonError::into_inner) = Arc::new(theme);
        tracing::debug!("theme replaced");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let theme = Theme::from_toml_str(
            r##"
            [colors]
            accent = "#ff0000"

            [metrics]
            checkbox_size = 16.0
            "##,
        )
        .unwrap();

        assert_eq!(theme.color(ColorToken::Accent), Color::RED);
        assert_eq!(theme.metrics.checkbox_size, 16.0);
        assert_eq!(theme.metrics.slider_height, MetricTokens::default().slider_height);
        assert_eq!(theme.color(ColorToken::Annotation), Color::WHITE);
    }

    #[test]
    fn test_unknown_color_token_is_rejected() {
        let err = Theme::from_toml_str("[colors]\nglow = \"#fff\"").unwrap_err();
        assert!(matches!(err, ThemeError::InvalidColor(_)));
    }

    #[test]
    fn test_bad_color_value_is_rejected() {
        let err = Theme::from_toml_str("[colors]\naccent = \"blue-ish\"").unwrap_err();
        assert!(matches!(err, ThemeError::InvalidColor(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = Theme::from_toml_str("[colors").unwrap_err();
        assert!(matches!(err, ThemeError::Toml(_)));
    }

    #[test]
    fn test_token_keys_round_trip() {
        for token in ColorToken::ALL {
            assert_eq!(ColorToken::from_key(token.key()), Some(token));
        }
    }

    #[test]
    fn test_theme_state_falls_back_to_defaults() {
        ThemeState::init_default();
        let theme = ThemeState::get();
        assert_eq!(theme.typography.line_height, 1.2);
    }
}
