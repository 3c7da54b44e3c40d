use indexmap::IndexMap;

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Token table resolving `--name` color indirections.
///
/// Color inputs anywhere in the scene are either literal hex strings or a
/// `--token` reference into the active theme.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    tokens: IndexMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut tokens = IndexMap::new();
        for (name, color) in [
            ("--up", Color::rgb(0.15, 0.65, 0.40)),
            ("--down", Color::rgb(0.85, 0.25, 0.25)),
            ("--grid", Color::rgba(0.5, 0.5, 0.5, 0.25)),
            ("--label", Color::rgb(0.55, 0.58, 0.62)),
            ("--crosshair", Color::rgba(0.6, 0.6, 0.65, 0.8)),
            ("--panel", Color::rgba(0.10, 0.11, 0.13, 0.85)),
            ("--text", Color::rgb(0.85, 0.87, 0.90)),
        ] {
            tokens.insert(name.to_owned(), color);
        }
        Self { tokens }
    }
}

impl Theme {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            tokens: IndexMap::new(),
        }
    }

    pub fn set_token(&mut self, name: impl Into<String>, color: Color) -> ChartResult<()> {
        let name = name.into();
        if !name.starts_with("--") {
            return Err(ChartError::InvalidData(format!(
                "theme token `{name}` must start with `--`"
            )));
        }
        color.validate()?;
        self.tokens.insert(name, color);
        Ok(())
    }

    /// Resolves a color input: a `--token` looks up the theme table, any
    /// other string parses as a hex literal.
    pub fn resolve(&self, input: &str) -> ChartResult<Color> {
        if input.starts_with("--") {
            return self
                .tokens
                .get(input)
                .copied()
                .ok_or_else(|| ChartError::UnknownColorToken(input.to_owned()));
        }
        parse_hex_color(input)
    }
}

/// Parses `#rrggbb` / `#rrggbbaa` literals into a normalized color.
pub fn parse_hex_color(input: &str) -> ChartResult<Color> {
    let digits = input
        .strip_prefix('#')
        .ok_or_else(|| ChartError::InvalidData(format!("invalid color literal `{input}`")))?;

    let channel = |offset: usize| -> ChartResult<f64> {
        let pair = digits
            .get(offset..offset + 2)
            .ok_or_else(|| ChartError::InvalidData(format!("invalid color literal `{input}`")))?;
        let raw = u8::from_str_radix(pair, 16)
            .map_err(|_| ChartError::InvalidData(format!("invalid color literal `{input}`")))?;
        Ok(f64::from(raw) / 255.0)
    };

    match digits.len() {
        6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
        8 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
        _ => Err(ChartError::InvalidData(format!(
            "invalid color literal `{input}`"
        ))),
    }
}
