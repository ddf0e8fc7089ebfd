use once_cell::sync::Lazy;
use regex::Regex;

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\[\]]*)\]").unwrap());

/// Bracketed markers inside layer names that drive rig classification.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tag {
    Bone,
    Slot,
    Merge,
    Ignore,
    Anchor,
    Root,
    BoneEnd,
}

impl Tag {
    pub fn keyword(self) -> &'static str {
        match self {
            Tag::Bone => "bone",
            Tag::Slot => "slot",
            Tag::Merge => "merge",
            Tag::Ignore => "ignore",
            Tag::Anchor => "anchor",
            Tag::Root => "root",
            Tag::BoneEnd => "bone_end",
        }
    }
}

pub fn has_tag(name: &str, tag: Tag) -> bool {
    TAG_PATTERN
        .captures_iter(name)
        .any(|capture| capture[1].trim().eq_ignore_ascii_case(tag.keyword()))
}

/// Removes every bracketed tag and trims the remainder.
pub fn strip_tags(name: &str) -> String {
    TAG_PATTERN.replace_all(name, "").trim().to_string()
}

/// Tag-stripped name with a single tag appended, e.g. `"hand [bone]"`.
pub fn with_tag(name: &str, tag: Tag) -> String {
    format!("{} [{}]", strip_tags(name), tag.keyword())
}

#[cfg(test)]
mod tests {
    use super::{has_tag, strip_tags, with_tag, Tag};

    #[test]
    fn test_tag_matching_is_case_insensitive() {
        assert!(has_tag("torso [bone]", Tag::Bone));
        assert!(has_tag("torso [BONE]", Tag::Bone));
        assert!(has_tag("tail [ Bone_End ]", Tag::BoneEnd));
        assert!(!has_tag("torso [bone]", Tag::Slot));
        assert!(!has_tag("trombone", Tag::Bone));
    }

    #[test]
    fn test_strip_tags_removes_every_bracketed_segment() {
        assert_eq!(strip_tags("head [bone]"), "head");
        assert_eq!(strip_tags("[merge] eyes [ignore]"), "eyes");
        assert_eq!(strip_tags("plain"), "plain");
    }

    #[test]
    fn test_with_tag_replaces_existing_tags() {
        assert_eq!(with_tag("hand [merge]", Tag::Bone), "hand [bone]");
        assert_eq!(with_tag("hand", Tag::BoneEnd), "hand [bone_end]");
    }
}
