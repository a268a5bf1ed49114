// Morphological description fields attached to entries and affix rules

use std::fmt;

pub const FIELD_STEM: &str = "st";
pub const FIELD_PART_OF_SPEECH: &str = "po";
pub const FIELD_ALLOMORPH: &str = "al";
pub const FIELD_PHONETIC: &str = "ph";
pub const FIELD_DERIVATIONAL_SUFFIX: &str = "ds";
pub const FIELD_INFLECTIONAL_SUFFIX: &str = "is";
pub const FIELD_TERMINAL_SUFFIX: &str = "ts";
pub const FIELD_SURFACE_PREFIX: &str = "sp";
pub const FIELD_DERIVATIONAL_PREFIX: &str = "dp";
pub const FIELD_INFLECTIONAL_PREFIX: &str = "ip";
pub const FIELD_TERMINAL_PREFIX: &str = "tp";
pub const FIELD_PART: &str = "pa";
pub const FIELD_FLAG: &str = "fl";

/// One `tag:value` field. Free-form tokens without a tag keep an empty tag
/// and are rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MorphField {
    pub tag: String,
    pub value: String,
}

impl fmt::Display for MorphField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tag.is_empty() {
            f.write_str(&self.value)
        } else {
            write!(f, "{}:{}", self.tag, self.value)
        }
    }
}

/// Whether a whitespace-delimited token has the `xx:` field shape.
pub fn is_field_token(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(a), Some(b), Some(':')) if a.is_alphanumeric() && b.is_alphanumeric()
    )
}

/// Ordered list of morphological fields.
///
/// Unlike a map, the order of insertion is kept: analysis output lists the
/// entry's fields first, then each affix step's fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MorphFields {
    fields: Vec<MorphField>,
}

impl MorphFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse whitespace-separated fields such as `po:noun is:plural`.
    pub fn parse(text: &str) -> Self {
        let fields = text
            .split_whitespace()
            .map(|token| match token.split_once(':') {
                Some((tag, value)) if is_field_token(token) => MorphField {
                    tag: tag.to_string(),
                    value: value.to_string(),
                },
                _ => MorphField {
                    tag: String::new(),
                    value: token.to_string(),
                },
            })
            .collect();
        Self { fields }
    }

    pub fn push(&mut self, tag: impl Into<String>, value: impl Into<String>) {
        self.fields.push(MorphField {
            tag: tag.into(),
            value: value.into(),
        });
    }

    pub fn extend_from(&mut self, other: &MorphFields) {
        self.fields.extend(other.fields.iter().cloned());
    }

    /// First value for a tag.
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.tag == tag)
            .map(|f| f.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &MorphField> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for MorphFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fields_are_empty() {
        let m = MorphFields::new();
        assert!(m.is_empty());
        assert_eq!(m.to_string(), "");
    }

    #[test]
    fn parse_keeps_order() {
        let m = MorphFields::parse("po:verb is:past st:go");
        assert_eq!(m.len(), 3);
        assert_eq!(m.get(FIELD_PART_OF_SPEECH), Some("verb"));
        assert_eq!(m.get(FIELD_STEM), Some("go"));
        assert_eq!(m.to_string(), "po:verb is:past st:go");
    }

    #[test]
    fn get_returns_first_value() {
        let mut m = MorphFields::new();
        m.push(FIELD_INFLECTIONAL_SUFFIX, "plural");
        m.push(FIELD_INFLECTIONAL_SUFFIX, "genitive");
        assert_eq!(m.get(FIELD_INFLECTIONAL_SUFFIX), Some("plural"));
    }

    #[test]
    fn untagged_tokens_render_verbatim() {
        let m = MorphFields::parse("[noun] po:noun");
        assert_eq!(m.iter().next().map(|f| f.tag.as_str()), Some(""));
        assert_eq!(m.to_string(), "[noun] po:noun");
    }

    #[test]
    fn field_token_shape() {
        assert!(is_field_token("po:noun"));
        assert!(is_field_token("st:"));
        assert!(!is_field_token("noun"));
        assert!(!is_field_token("a:b"));
        assert!(!is_field_token("http://x"));
    }

    #[test]
    fn extend_appends() {
        let mut a = MorphFields::parse("st:run");
        a.extend_from(&MorphFields::parse("is:ing"));
        assert_eq!(a.to_string(), "st:run is:ing");
    }
}
