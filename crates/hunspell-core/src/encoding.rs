// Dictionary text encodings declared by the affix file's SET directive

use std::fmt;

/// Error for an encoding label the engine cannot decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("unknown text encoding {0:?}")]
    Unknown(String),
}

/// Characters that differ between ISO-8859-15 and ISO-8859-1, as
/// `(byte, code point)` pairs.
const LATIN9_OVERRIDES: &[(u8, char)] = &[
    (0xA4, '\u{20AC}'), // €
    (0xA6, '\u{0160}'), // Š
    (0xA8, '\u{0161}'), // š
    (0xB4, '\u{017D}'), // Ž
    (0xB8, '\u{017E}'), // ž
    (0xBC, '\u{0152}'), // Œ
    (0xBD, '\u{0153}'), // œ
    (0xBE, '\u{0178}'), // Ÿ
];

/// Text encoding of a dictionary's `.aff` and `.dic` files.
///
/// `Raw` keeps an unrecognized label: its bytes are decoded one to one as
/// Latin-1 code points, so that encoding a decoded string restores the
/// original bytes. Dictionaries without a `SET` line are ISO-8859-1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    Utf8,
    #[default]
    Latin1,
    Latin9,
    Raw(String),
}

impl TextEncoding {
    /// Resolve a `SET` label. Matching ignores case and `-`/`_` separators.
    pub fn from_label(label: &str) -> Result<Self, EncodingError> {
        let key: String = label
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .map(|c| c.to_ascii_uppercase())
            .collect();
        match key.as_str() {
            "UTF8" => Ok(TextEncoding::Utf8),
            "ISO88591" | "LATIN1" | "ISO8859" => Ok(TextEncoding::Latin1),
            "ISO885915" | "LATIN9" => Ok(TextEncoding::Latin9),
            _ => Err(EncodingError::Unknown(label.to_string())),
        }
    }

    /// Identifier reported to callers, in the form dictionaries spell it.
    pub fn name(&self) -> &str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Latin1 => "ISO8859-1",
            TextEncoding::Latin9 => "ISO8859-15",
            TextEncoding::Raw(label) => label,
        }
    }

    /// Decode file contents. A UTF-8 byte order mark is dropped; invalid
    /// UTF-8 sequences become U+FFFD.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                String::from_utf8_lossy(bytes).into_owned()
            }
            TextEncoding::Latin1 | TextEncoding::Raw(_) => {
                bytes.iter().map(|&b| char::from(b)).collect()
            }
            TextEncoding::Latin9 => bytes
                .iter()
                .map(|&b| {
                    LATIN9_OVERRIDES
                        .iter()
                        .find(|(byte, _)| *byte == b)
                        .map_or(char::from(b), |&(_, c)| c)
                })
                .collect(),
        }
    }

    /// Encode text for callers that exchange bytes in the dictionary
    /// encoding. Characters the encoding cannot represent become `?`.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Latin1 | TextEncoding::Raw(_) => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
            TextEncoding::Latin9 => text
                .chars()
                .map(|c| {
                    if let Some(&(byte, _)) = LATIN9_OVERRIDES.iter().find(|(_, ch)| *ch == c) {
                        return byte;
                    }
                    match u8::try_from(u32::from(c)) {
                        Ok(b) if !LATIN9_OVERRIDES.iter().any(|(byte, _)| *byte == b) => b,
                        _ => b'?',
                    }
                })
                .collect(),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_resolve() {
        assert_eq!(TextEncoding::from_label("UTF-8"), Ok(TextEncoding::Utf8));
        assert_eq!(TextEncoding::from_label("utf8"), Ok(TextEncoding::Utf8));
        assert_eq!(TextEncoding::from_label("ISO8859-1"), Ok(TextEncoding::Latin1));
        assert_eq!(TextEncoding::from_label("ISO-8859-15"), Ok(TextEncoding::Latin9));
    }

    #[test]
    fn unknown_label_is_an_error() {
        assert_eq!(
            TextEncoding::from_label("KOI8-R"),
            Err(EncodingError::Unknown("KOI8-R".to_string()))
        );
    }

    #[test]
    fn names() {
        assert_eq!(TextEncoding::Utf8.name(), "UTF-8");
        assert_eq!(TextEncoding::default().name(), "ISO8859-1");
        assert_eq!(TextEncoding::Raw("KOI8-R".into()).to_string(), "KOI8-R");
    }

    #[test]
    fn utf8_decode_strips_bom() {
        let text = TextEncoding::Utf8.decode(b"\xEF\xBB\xBFcaf\xC3\xA9");
        assert_eq!(text, "caf\u{00E9}");
    }

    #[test]
    fn latin1_round_trips_bytes() {
        let bytes = b"caf\xE9 na\xEFve";
        let text = TextEncoding::Latin1.decode(bytes);
        assert_eq!(text, "caf\u{00E9} na\u{00EF}ve");
        assert_eq!(TextEncoding::Latin1.encode(&text), bytes.to_vec());
    }

    #[test]
    fn raw_labels_preserve_bytes() {
        let raw = TextEncoding::Raw("KOI8-R".into());
        let bytes: Vec<u8> = (0x80..=0xFF).collect();
        assert_eq!(raw.encode(&raw.decode(&bytes)), bytes);
    }

    #[test]
    fn latin9_differs_from_latin1() {
        assert_eq!(TextEncoding::Latin9.decode(&[0xA4]), "\u{20AC}");
        assert_eq!(TextEncoding::Latin9.encode("\u{20AC}"), vec![0xA4]);
        // '¤' (U+00A4) has no slot in ISO-8859-15
        assert_eq!(TextEncoding::Latin9.encode("\u{00A4}"), vec![b'?']);
    }

    #[test]
    fn unencodable_characters_become_question_marks() {
        assert_eq!(TextEncoding::Latin1.encode("a\u{20AC}b"), b"a?b".to_vec());
    }
}
