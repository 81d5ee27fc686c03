//! Glyph text that tolerates unpaired surrogates.
//!
//! PDF text layers regularly contain code points that are not Unicode scalar
//! values (lone UTF-16 surrogates from broken ToUnicode maps). They must reach
//! the output untouched, so a glyph keeps its text as generalized UTF-8
//! (WTF-8) bytes instead of a `String`: valid scalars are plain UTF-8 and a
//! surrogate is encoded as its three-byte sequence.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, Error as _, Visitor};
use serde_json::value::RawValue;
use smallvec::SmallVec;

/// One logical character of a page, possibly a merged ligature.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Glyph(SmallVec<[u8; 4]>);

impl Glyph {
    /// Builds a glyph from a single code point.
    ///
    /// Surrogates (U+D800..=U+DFFF) are accepted; anything above U+10FFFF is not.
    pub fn from_code_point(cp: u32) -> Option<Self> {
        if cp > 0x10FFFF {
            return None;
        }
        let mut bytes = SmallVec::new();
        encode_code_point(cp, &mut bytes);
        Some(Self(bytes))
    }

    /// Raw generalized UTF-8 bytes of the glyph.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The glyph as `&str`, unless it contains a surrogate.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_space(&self) -> bool {
        self.0.as_slice() == b" "
    }

    /// Number of code points, i.e. the number of output columns it fills.
    pub fn char_count(&self) -> usize {
        self.0.iter().filter(|&&b| b & 0xC0 != 0x80).count()
    }

    /// Concatenation of `self` followed by `other`.
    pub fn concat(&self, other: &Glyph) -> Glyph {
        let mut bytes = self.0.clone();
        bytes.extend_from_slice(&other.0);
        Glyph(bytes)
    }
}

fn encode_code_point(cp: u32, out: &mut SmallVec<[u8; 4]>) {
    match cp {
        0..=0x7F => out.push(cp as u8),
        0x80..=0x7FF => {
            out.push(0xC0 | (cp >> 6) as u8);
            out.push(0x80 | (cp & 0x3F) as u8);
        }
        0x800..=0xFFFF => {
            out.push(0xE0 | (cp >> 12) as u8);
            out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
            out.push(0x80 | (cp & 0x3F) as u8);
        }
        _ => {
            out.push(0xF0 | (cp >> 18) as u8);
            out.push(0x80 | ((cp >> 12) & 0x3F) as u8);
            out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
            out.push(0x80 | (cp & 0x3F) as u8);
        }
    }
}

impl From<&str> for Glyph {
    fn from(s: &str) -> Self {
        Self(SmallVec::from_slice(s.as_bytes()))
    }
}

impl From<char> for Glyph {
    fn from(c: char) -> Self {
        let mut buf = [0u8; 4];
        Self::from(&*c.encode_utf8(&mut buf))
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => write!(f, "Glyph({s:?})"),
            None => write!(f, "Glyph({:x?})", self.0.as_slice()),
        }
    }
}

/// Text of a glyph as it appears in the dump.
///
/// serde_json hands string contents to a bytes visitor as generalized UTF-8,
/// so an escaped lone surrogate (`"\udc00"`, the form ASCII-only JSON
/// encoders write) arrives as its three-byte sequence instead of failing.
struct GlyphBytes(SmallVec<[u8; 4]>);

struct GlyphBytesVisitor;

impl<'de> Visitor<'de> for GlyphBytesVisitor {
    type Value = GlyphBytes;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a glyph string")
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<GlyphBytes, E> {
        Ok(GlyphBytes(SmallVec::from_slice(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<GlyphBytes, E> {
        self.visit_bytes(v.as_bytes())
    }
}

impl<'de> Deserialize<'de> for GlyphBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_bytes(GlyphBytesVisitor)
    }
}

/// A glyph is either a JSON string or an integer code point.
///
/// The raw value is inspected first: a string reaching `deserialize_any`
/// would be decoded as `str` and reject lone surrogates.
impl<'de> Deserialize<'de> for Glyph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let text = raw.get().trim_start();
        if text.starts_with('"') {
            let mut de = serde_json::Deserializer::from_str(text);
            let GlyphBytes(bytes) = GlyphBytes::deserialize(&mut de).map_err(D::Error::custom)?;
            return Ok(Glyph(bytes));
        }
        let cp: u32 = serde_json::from_str(text).map_err(D::Error::custom)?;
        Glyph::from_code_point(cp)
            .ok_or_else(|| D::Error::custom(format!("code point {cp:#x} out of range")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surrogate_round_trips_as_three_bytes() {
        let g = Glyph::from_code_point(0xD800).unwrap();
        assert_eq!(g.as_bytes(), &[0xED, 0xA0, 0x80]);
        assert_eq!(g.char_count(), 1);
        assert!(g.as_str().is_none());
    }

    #[test]
    fn test_scalar_code_point_matches_utf8() {
        let g = Glyph::from_code_point(0xFB01).unwrap();
        assert_eq!(g, Glyph::from('\u{FB01}'));
        assert_eq!(g.as_str(), Some("\u{FB01}"));
    }

    #[test]
    fn test_out_of_range_code_point() {
        assert!(Glyph::from_code_point(0x110000).is_none());
    }

    #[test]
    fn test_char_count_counts_code_points() {
        assert_eq!(Glyph::from("a\u{0301}").char_count(), 2);
        assert_eq!(Glyph::from("\u{1F600}").char_count(), 1);
    }

    #[test]
    fn test_deserialize_string_and_integer() {
        let g: Glyph = serde_json::from_str("\"x\"").unwrap();
        assert_eq!(g, Glyph::from("x"));
        let g: Glyph = serde_json::from_str("56320").unwrap();
        assert_eq!(g.as_bytes(), &[0xED, 0xB0, 0x80]);
    }

    #[test]
    fn test_deserialize_escaped_lone_surrogate() {
        let g: Glyph = serde_json::from_str(r#""\udc00""#).unwrap();
        assert_eq!(g.as_bytes(), &[0xED, 0xB0, 0x80]);
        assert_eq!(g.char_count(), 1);
    }

    #[test]
    fn test_deserialize_escaped_surrogate_pair() {
        let g: Glyph = serde_json::from_str(r#""\ud83d\ude00""#).unwrap();
        assert_eq!(g, Glyph::from('\u{1F600}'));
    }

    #[test]
    fn test_deserialize_rejects_other_types() {
        assert!(serde_json::from_str::<Glyph>("1.5").is_err());
        assert!(serde_json::from_str::<Glyph>("null").is_err());
        assert!(serde_json::from_str::<Glyph>("1114112").is_err());
    }
}
