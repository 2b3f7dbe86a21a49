use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::Rgba8,
    error::{SealError, SealResult},
};

/// Parse a CSS-style hex color: `#RGB`, `#RRGGBB` or `#RRGGBBAA` (case-insensitive, `#` optional).
pub fn parse_hex_color(s: &str) -> SealResult<Rgba8> {
    let s = s.trim();
    if s.is_empty() {
        return Err(SealError::validation("color must be non-empty"));
    }
    let hex = s.strip_prefix('#').unwrap_or(s);
    if !hex.is_ascii() {
        return Err(SealError::validation(format!("invalid hex color \"{s}\"")));
    }

    fn hex_byte(pair: &str) -> SealResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| SealError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    fn hex_nibble(c: &str) -> SealResult<u8> {
        let v = hex_byte(c)?;
        Ok(v * 16 + v)
    }

    match hex.len() {
        3 => Ok(Rgba8::opaque(
            hex_nibble(&hex[0..1])?,
            hex_nibble(&hex[1..2])?,
            hex_nibble(&hex[2..3])?,
        )),
        6 => Ok(Rgba8::opaque(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
        )),
        8 => Ok(Rgba8 {
            r: hex_byte(&hex[0..2])?,
            g: hex_byte(&hex[2..4])?,
            b: hex_byte(&hex[4..6])?,
            a: hex_byte(&hex[6..8])?,
        }),
        _ => Err(SealError::validation(
            "hex color must be #RGB, #RRGGBB or #RRGGBBAA (case-insensitive)",
        )),
    }
}

pub fn format_hex_color(c: Rgba8) -> String {
    if c.a == 255 {
        format!("#{:02X}{:02X}{:02X}", c.r, c.g, c.b)
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", c.r, c.g, c.b, c.a)
    }
}

impl std::str::FromStr for Rgba8 {
    type Err = SealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_color(s)
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format_hex_color(*self))
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex_color(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Rgba8::opaque(*r, *g, *b)),
                [r, g, b, a] => Ok(Rgba8 {
                    r: *r,
                    g: *g,
                    b: *b,
                    a: *a,
                }),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
