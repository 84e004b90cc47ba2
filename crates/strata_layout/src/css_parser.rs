//! CSS subset parser for ElementStyle
//!
//! Widgets load their skins from small stylesheets. Parsing never fails
//! hard: problems are collected as [`ParseError`]s (logged via tracing at
//! DEBUG level), the offending rule or property is skipped and parsing
//! resumes after it.
//!
//! # Supported Syntax
//!
//! - ID selectors: `#element-id { ... }`
//! - State selectors: `#element-id:hover`, `:pressed`, `:checked`, `:disabled`
//! - Properties: `background`, `color`, `border-color`, `border-width`,
//!   `border-radius`, `width`, `height`, `opacity`
//! - Colors: hex (#rgb, #rrggbb, #rrggbbaa), rgb(), rgba(), named colors
//! - Lengths: px or unitless
//! - `/* block comments */`
//!
//! # Example
//!
//! ```rust
//! use strata_layout::css_parser::{ElementState, Stylesheet};
//!
//! let css = r#"
//!     #indicator { background: #202020; border-width: 1px; }
//!     #indicator:checked { background: rgb(200, 200, 200); }
//! "#;
//!
//! let result = Stylesheet::parse_with_errors(css);
//! assert!(result.errors.is_empty());
//!
//! let sheet = result.stylesheet;
//! assert!(sheet.get("indicator").is_some());
//! assert!(sheet.get_with_state("indicator", ElementState::Checked).is_some());
//! ```

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_until, take_while1},
    character::complete::{char, multispace1},
    combinator::{all_consuming, cut, opt, value},
    error::{context, ParseError as NomParseError, VerboseError, VerboseErrorKind},
    multi::many0,
    number::complete::float,
    sequence::{delimited, terminated},
    Finish, IResult,
};
use rustc_hash::FxHashMap;
use strata_core::Color;
use tracing::debug;

use crate::element_style::ElementStyle;

/// Parser result type using VerboseError for diagnostics
type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Severity level for parse diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A rule could not be parsed and was skipped
    Error,
    /// A property or state was not understood and was ignored
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic with its position in the source
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub severity: Severity,
    pub message: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Source text near the problem
    pub fragment: String,
    /// Context stack from nom's VerboseError
    pub contexts: Vec<String>,
    pub property: Option<String>,
    pub value: Option<String>,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CSS {}: line {}, column {}: {}",
            self.severity, self.line, self.column, self.message
        )?;
        if let Some(ref prop) = self.property {
            match self.value {
                Some(ref val) => write!(f, " ({}:{})", prop, val)?,
                None => write!(f, " ({})", prop)?,
            }
        }
        if !self.contexts.is_empty() {
            write!(f, "\n  Context: {}", self.contexts.join(" > "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    pub fn new(severity: Severity, message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            severity,
            message: message.into(),
            line,
            column,
            fragment: String::new(),
            contexts: Vec::new(),
            property: None,
            value: None,
        }
    }

    pub fn unknown_property(property: &str, line: usize, column: usize) -> Self {
        Self {
            property: Some(property.to_string()),
            contexts: vec!["property".to_string()],
            ..Self::new(
                Severity::Warning,
                format!("Unknown property '{}' (ignored)", property),
                line,
                column,
            )
        }
    }

    pub fn invalid_value(property: &str, value: &str, line: usize, column: usize) -> Self {
        Self {
            property: Some(property.to_string()),
            value: Some(value.to_string()),
            contexts: vec!["property value".to_string()],
            ..Self::new(
                Severity::Warning,
                format!("Invalid value for '{}': '{}'", property, value),
                line,
                column,
            )
        }
    }

    fn from_verbose(input: &str, err: VerboseError<&str>) -> Self {
        let (line, column, fragment) = match err.errors.first() {
            Some((frag, _)) => calculate_position(input, frag),
            None => (1, 1, String::new()),
        };

        let contexts = err
            .errors
            .iter()
            .filter_map(|(_, kind)| match kind {
                VerboseErrorKind::Context(ctx) => Some((*ctx).to_string()),
                _ => None,
            })
            .collect();

        Self {
            fragment,
            contexts,
            ..Self::new(Severity::Error, format_verbose_error(&err), line, column)
        }
    }
}

/// Result of parsing CSS with error collection
#[derive(Debug, Clone, Default)]
pub struct CssParseResult {
    /// The parsed stylesheet (partial if errors occurred)
    pub stylesheet: Stylesheet,
    pub errors: Vec<ParseError>,
}

impl CssParseResult {
    /// Whether any rule had to be skipped
    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(|e| e.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.errors.iter().any(|e| e.severity == Severity::Warning)
    }

    /// Log all errors and warnings via tracing
    pub fn log_diagnostics(&self) {
        for err in &self.errors {
            debug!(
                severity = %err.severity,
                line = err.line,
                column = err.column,
                message = %err.message,
                property = ?err.property,
                value = ?err.value,
                "CSS diagnostic"
            );
        }
    }
}

fn format_verbose_error(err: &VerboseError<&str>) -> String {
    let parts: Vec<String> = err
        .errors
        .iter()
        .map(|(input, kind)| match kind {
            VerboseErrorKind::Context(ctx) => format!("in {}", ctx),
            VerboseErrorKind::Char(c) => {
                let preview: String = input.chars().take(20).collect();
                format!("expected '{}' near \"{}\"", c, preview)
            }
            VerboseErrorKind::Nom(ek) => format!("{:?}", ek),
        })
        .collect();

    if parts.is_empty() {
        "unknown parse error".to_string()
    } else {
        parts.join(", ")
    }
}

/// Element state for pseudo-class selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementState {
    Hover,
    Pressed,
    Checked,
    Disabled,
}

impl ElementState {
    /// Parse a state from a pseudo-class name
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hover" => Some(ElementState::Hover),
            "pressed" => Some(ElementState::Pressed),
            "checked" => Some(ElementState::Checked),
            "disabled" => Some(ElementState::Disabled),
            _ => None,
        }
    }
}

impl std::fmt::Display for ElementState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementState::Hover => write!(f, "hover"),
            ElementState::Pressed => write!(f, "pressed"),
            ElementState::Checked => write!(f, "checked"),
            ElementState::Disabled => write!(f, "disabled"),
        }
    }
}

/// A parsed CSS selector with optional state modifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CssSelector {
    /// The element ID (without #)
    pub id: String,
    pub state: Option<ElementState>,
}

impl CssSelector {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: None,
        }
    }

    pub fn with_state(id: impl Into<String>, state: ElementState) -> Self {
        Self {
            id: id.into(),
            state: Some(state),
        }
    }

    /// Storage key: `id` or `id:state`
    fn key(&self) -> String {
        match &self.state {
            Some(state) => format!("{}:{}", self.id, state),
            None => self.id.clone(),
        }
    }
}

/// Styles keyed by selector
#[derive(Clone, Debug, Default)]
pub struct Stylesheet {
    styles: FxHashMap<String, ElementStyle>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse CSS, collecting every diagnostic
    ///
    /// Rules that parse are kept even when others fail.
    pub fn parse_with_errors(css: &str) -> CssParseResult {
        let mut errors = Vec::new();
        let mut stylesheet = Stylesheet::new();

        let rules = parse_stylesheet_with_errors(css, &mut errors);
        for (selector, style) in rules {
            // Later rules for the same selector extend earlier ones
            let key = selector.key();
            let merged = match stylesheet.styles.get(&key) {
                Some(existing) => existing.merge(&style),
                None => style,
            };
            stylesheet.styles.insert(key, merged);
        }

        CssParseResult { stylesheet, errors }
    }

    /// Parse CSS, logging diagnostics; fails with the first rule-level error
    pub fn parse(css: &str) -> Result<Self, ParseError> {
        let result = Self::parse_with_errors(css);
        result.log_diagnostics();

        match result
            .errors
            .into_iter()
            .find(|e| e.severity == Severity::Error)
        {
            Some(err) => Err(err),
            None => Ok(result.stylesheet),
        }
    }

    /// Parse CSS, logging errors and returning an empty stylesheet on failure
    pub fn parse_or_empty(css: &str) -> Self {
        Self::parse(css).unwrap_or_default()
    }

    /// Get a style by element ID (without the # prefix)
    pub fn get(&self, id: &str) -> Option<&ElementStyle> {
        self.styles.get(id)
    }

    /// Get the style of `#id:state`
    pub fn get_with_state(&self, id: &str, state: ElementState) -> Option<&ElementStyle> {
        self.styles.get(&CssSelector::with_state(id, state).key())
    }

    /// Base style of `id` with each set state's style merged on in order
    pub fn resolve(&self, id: &str, states: &[ElementState]) -> ElementStyle {
        states.iter().fold(
            self.get(id).cloned().unwrap_or_default(),
            |style, &state| match self.get_with_state(id, state) {
                Some(state_style) => style.merge(state_style),
                None => style,
            },
        )
    }

    pub fn contains(&self, id: &str) -> bool {
        self.styles.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

// ============================================================================
// Parsers
// ============================================================================

/// Line, column and a preview for a suffix of `original`
fn calculate_position(original: &str, fragment: &str) -> (usize, usize, String) {
    let offset = original.len().saturating_sub(fragment.len());
    let consumed = &original[..offset];

    let line = consumed.matches('\n').count() + 1;
    let column = consumed
        .rfind('\n')
        .map(|pos| offset - pos)
        .unwrap_or(offset + 1);

    let preview: String = fragment.chars().take(30).collect();
    (line, column, preview)
}

/// Parse whitespace and comments
fn ws<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, (), E> {
    value(
        (),
        many0(alt((value((), multispace1), value((), parse_comment)))),
    )(input)
}

fn parse_comment<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    delimited(tag("/*"), take_until("*/"), tag("*/"))(input)
}

/// Alphanumeric, hyphen, underscore
fn identifier<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

/// `#identifier` or `#identifier:state`; the state name is returned raw
fn id_selector(input: &str) -> ParseResult<(&str, Option<&str>)> {
    context("ID selector", |input| {
        let (input, _) = char('#')(input)?;
        let (input, id) = cut(identifier)(input)?;
        let (input, state) = opt(|i| {
            let (i, _) = char(':')(i)?;
            identifier(i)
        })(input)?;
        Ok((input, (id, state)))
    })(input)
}

/// Everything until `;` or `}`
fn property_value(input: &str) -> ParseResult<&str> {
    let (input, value) = context(
        "property value",
        take_while1(|c: char| c != ';' && c != '}'),
    )(input)?;
    Ok((input, value.trim()))
}

/// A declaration `name: value;` plus the input where its name starts
fn property_declaration(input: &str) -> ParseResult<(&str, &str, &str)> {
    let (input, _) = ws(input)?;
    let start = input;
    let (input, name) = context("property name", identifier)(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = context("colon after property name", char(':'))(input)?;
    let (input, _) = ws(input)?;
    let (input, value) = property_value(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = opt(char(';'))(input)?;
    Ok((input, (name, value, start)))
}

fn rule_block(input: &str) -> ParseResult<Vec<(&str, &str, &str)>> {
    let (input, _) = ws(input)?;
    let (input, _) = context("opening brace", char('{'))(input)?;
    let (input, properties) = many0(property_declaration)(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = context("closing brace", char('}'))(input)?;
    Ok((input, properties))
}

/// One rule; property-level problems go to `errors`
fn css_rule<'a>(
    original_css: &str,
    input: &'a str,
    errors: &mut Vec<ParseError>,
) -> ParseResult<'a, Option<(CssSelector, ElementStyle)>> {
    let (input, _) = ws(input)?;
    let selector_start = input;
    let (input, (id, state_name)) = context("CSS rule selector", id_selector)(input)?;
    let (input, properties) = context("CSS rule block", rule_block)(input)?;

    let state = match state_name {
        Some(name) => match ElementState::from_name(name) {
            Some(state) => Some(state),
            None => {
                let (line, column, fragment) = calculate_position(original_css, selector_start);
                errors.push(ParseError {
                    fragment,
                    ..ParseError::new(
                        Severity::Warning,
                        format!("Unknown state ':{}' (rule ignored)", name),
                        line,
                        column,
                    )
                });
                return Ok((input, None));
            }
        },
        None => None,
    };

    let mut style = ElementStyle::new();
    for (name, value, at) in properties {
        let (line, column, _) = calculate_position(original_css, at);
        apply_property_with_errors(&mut style, name, value, line, column, errors);
    }

    Ok((
        input,
        Some((
            CssSelector {
                id: id.to_string(),
                state,
            },
            style,
        )),
    ))
}

/// Parse rules one at a time; a broken rule is reported and skipped
fn parse_stylesheet_with_errors(
    css: &str,
    errors: &mut Vec<ParseError>,
) -> Vec<(CssSelector, ElementStyle)> {
    let mut rules = Vec::new();
    let mut remaining = css;

    loop {
        let trimmed = match ws::<VerboseError<&str>>(remaining).finish() {
            Ok((rest, ())) => rest,
            Err(err) => {
                errors.push(ParseError::from_verbose(css, err));
                break;
            }
        };
        if trimmed.is_empty() {
            break;
        }

        let parsed = css_rule(css, trimmed, errors).finish();
        match parsed {
            Ok((rest, rule)) => {
                rules.extend(rule);
                remaining = rest;
            }
            Err(err) => {
                errors.push(ParseError::from_verbose(css, err));
                // Resume after the end of the broken rule
                match trimmed.find('}') {
                    Some(pos) => remaining = &trimmed[pos + 1..],
                    None => break,
                }
            }
        }
    }

    rules
}

fn apply_property_with_errors(
    style: &mut ElementStyle,
    name: &str,
    value: &str,
    line: usize,
    column: usize,
    errors: &mut Vec<ParseError>,
) {
    let applied = match name {
        "background" | "background-color" => parse_color(value).map(|c| style.background = Some(c)),
        "color" => parse_color(value).map(|c| style.color = Some(c)),
        "border-color" => parse_color(value).map(|c| style.border_color = Some(c)),
        "border-width" => parse_px(value).map(|px| style.border_width = Some(px)),
        "border-radius" => parse_px(value).map(|px| style.corner_radius = Some(px)),
        "width" => parse_px(value).map(|px| style.width = Some(px)),
        "height" => parse_px(value).map(|px| style.height = Some(px)),
        "opacity" => parse_number(value).map(|o| style.opacity = Some(o.clamp(0.0, 1.0))),
        _ => {
            errors.push(ParseError::unknown_property(name, line, column));
            return;
        }
    };

    if applied.is_none() {
        errors.push(ParseError::invalid_value(name, value, line, column));
    }
}

fn parse_number(input: &str) -> Option<f32> {
    all_consuming(float::<&str, nom::error::Error<&str>>)(input.trim())
        .ok()
        .map(|(_, n)| n)
}

/// Pixel length: `4px` or `4`
fn parse_px(input: &str) -> Option<f32> {
    all_consuming(terminated(
        float::<&str, nom::error::Error<&str>>,
        opt(tag_no_case("px")),
    ))(input.trim())
    .ok()
    .map(|(_, px)| px)
}

fn parse_color(input: &str) -> Option<Color> {
    let input = input.trim();

    if let Ok((_, color)) = all_consuming(parse_hex_color)(input) {
        return color;
    }
    if let Ok((_, color)) = all_consuming(parse_rgb_function)(input) {
        return Some(color);
    }

    parse_named_color(input)
}

/// `#` followed by hex digits; the digit count is checked by `Color::parse_hex`
fn parse_hex_color(input: &str) -> ParseResult<Option<Color>> {
    let (input, _) = char('#')(input)?;
    let (input, hex) = take_while1(|c: char| c.is_ascii_hexdigit())(input)?;
    Ok((input, Color::parse_hex(hex)))
}

/// `rgb(r, g, b)` or `rgba(r, g, b, a)`; channels above 1 are read as 0-255
fn parse_rgb_function(input: &str) -> ParseResult<Color> {
    let (input, name) = alt((tag_no_case("rgba"), tag_no_case("rgb")))(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = char('(')(input)?;
    let (input, r) = channel(input)?;
    let (input, _) = char(',')(input)?;
    let (input, g) = channel(input)?;
    let (input, _) = char(',')(input)?;
    let (input, b) = channel(input)?;
    let (input, a) = if name.eq_ignore_ascii_case("rgba") {
        let (input, _) = char(',')(input)?;
        channel(input)?
    } else {
        (input, 1.0)
    };
    let (input, _) = char(')')(input)?;

    let (r, g, b) = if r > 1.0 || g > 1.0 || b > 1.0 {
        (r / 255.0, g / 255.0, b / 255.0)
    } else {
        (r, g, b)
    };

    Ok((input, Color::rgba(r, g, b, a)))
}

fn channel(input: &str) -> ParseResult<f32> {
    delimited(ws, float, ws)(input)
}

fn parse_named_color(name: &str) -> Option<Color> {
    match name.to_ascii_lowercase().as_str() {
        "black" => Some(Color::BLACK),
        "white" => Some(Color::WHITE),
        "red" => Some(Color::RED),
        "green" => Some(Color::rgb(0.0, 0.5, 0.0)),
        "blue" => Some(Color::BLUE),
        "gray" | "grey" => Some(Color::GRAY),
        "transparent" => Some(Color::TRANSPARENT),
        _ => None,
    }
}
