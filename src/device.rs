/// Failed block-device lookup.
///
/// `kind` is the category that was searched (`disk`, `partition`, ...) and
/// `needle` the criterion that matched nothing. Both stay available as fields
/// so callers can retry with a different criterion without parsing text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BlockDeviceLookupError {
    kind: String,
    needle: String,
    message: String,
}

impl BlockDeviceLookupError {
    pub fn new(kind: impl Into<String>, needle: impl Into<String>) -> Self {
        let kind = kind.into();
        let needle = needle.into();
        let message =
            format!("Block device not found. Lookup details: kind=\"{kind}\", needle=\"{needle}\"");
        Self {
            kind,
            needle,
            message,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_kind_and_needle() {
        let err = BlockDeviceLookupError::new("disk", "/dev/sda");
        assert_eq!(
            err.message(),
            "Block device not found. Lookup details: kind=\"disk\", needle=\"/dev/sda\""
        );
        assert_eq!(err.kind(), "disk");
        assert_eq!(err.needle(), "/dev/sda");
        assert_eq!(err.to_string(), err.message());
    }

    #[test]
    fn empty_lookup_values_still_render() {
        let err = BlockDeviceLookupError::new("", "");
        assert!(err.message().ends_with("kind=\"\", needle=\"\""));
    }
}
