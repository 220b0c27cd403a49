//! The fixed named-entity table.
//!
//! Contract:
//! - Body text decodes exactly five names: `quot`, `amp`, `apos`, `lt`, `gt`.
//! - No numeric references and no other names; an unknown name decodes to nothing.
//! - Attribute values only unescape `&quot;`, since `"` is the attribute delimiter.
use std::borrow::Cow;

pub const NAMED_ENTITIES: [(&str, char); 5] = [
    ("quot", '"'),
    ("amp", '&'),
    ("apos", '\''),
    ("lt", '<'),
    ("gt", '>'),
];

const QUOT_ENTITY: &str = "&quot;";

/// Looks up the text between `&` and `;`.
pub fn decode_entity(name: &str) -> Option<char> {
    NAMED_ENTITIES
        .iter()
        .find_map(|&(entity, ch)| (entity == name).then_some(ch))
}

pub(crate) fn unescape_attribute_value(raw: &str) -> Cow<'_, str> {
    if raw.contains(QUOT_ENTITY) {
        Cow::Owned(raw.replace(QUOT_ENTITY, "\""))
    } else {
        Cow::Borrowed(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_entity_knows_the_five_names() {
        assert_eq!(decode_entity("quot"), Some('"'));
        assert_eq!(decode_entity("amp"), Some('&'));
        assert_eq!(decode_entity("apos"), Some('\''));
        assert_eq!(decode_entity("lt"), Some('<'));
        assert_eq!(decode_entity("gt"), Some('>'));
    }

    #[test]
    fn decode_entity_rejects_everything_else() {
        for name in ["", "nbsp", "AMP", "#38", "#x26", "amp ", "copy"] {
            assert_eq!(decode_entity(name), None, "unexpected decode for {name:?}");
        }
    }

    #[test]
    fn attribute_values_only_unescape_quot() {
        assert_eq!(unescape_attribute_value("say &quot;hi&quot;"), "say \"hi\"");
        assert_eq!(unescape_attribute_value("a &amp; b &lt;c&gt;"), "a &amp; b &lt;c&gt;");
        assert!(matches!(unescape_attribute_value("plain"), Cow::Borrowed("plain")));
    }
}
