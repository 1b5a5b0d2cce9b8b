use serde::{Deserialize, Serialize};

/// Capability of a left-side value that models a possibly pre-existing resource.
pub trait Target {
    /// True if a real counterpart already exists, independent of any match.
    fn target_exists(&self) -> bool;

    /// Whether the user agreed to overwrite an existing counterpart.
    fn is_replace_ok(&self) -> bool;

    fn set_replace_ok(&mut self, replace_ok: bool);

    /// A match may be imported when nothing would be overwritten, or the user
    /// agreed to the overwrite.
    fn is_importable(&self) -> bool {
        !self.target_exists() || self.is_replace_ok()
    }
}

/// An expected content slot, e.g. a message title waiting for audio.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AudioTarget {
    /// Title the slot is known by
    pub title: String,

    /// Identifier of audio already attached to this slot, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_item: Option<String>,

    #[serde(default)]
    pub replace_ok: bool,
}

impl AudioTarget {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            existing_item: None,
            replace_ok: false,
        }
    }

    #[must_use]
    pub fn with_existing_item(mut self, id: impl Into<String>) -> Self {
        self.existing_item = Some(id.into());
        self
    }
}

impl Target for AudioTarget {
    fn target_exists(&self) -> bool {
        self.existing_item.is_some()
    }

    fn is_replace_ok(&self) -> bool {
        self.replace_ok
    }

    fn set_replace_ok(&mut self, replace_ok: bool) {
        self.replace_ok = replace_ok;
    }
}

impl std::fmt::Display for AudioTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// A greeting recipient: a community, optionally narrowed to a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recipient {
    pub community: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// The recipient already has a recorded greeting
    #[serde(default)]
    pub has_greeting: bool,

    #[serde(default)]
    pub replace_ok: bool,
}

impl Recipient {
    pub fn new(community: impl Into<String>) -> Self {
        Self {
            community: community.into(),
            group: None,
            has_greeting: false,
            replace_ok: false,
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        let group = group.into();
        self.group = if group.trim().is_empty() {
            None
        } else {
            Some(group)
        };
        self
    }

    #[must_use]
    pub fn with_greeting(mut self, has_greeting: bool) -> Self {
        self.has_greeting = has_greeting;
        self
    }

    /// Every label a file for this recipient might plausibly be named after:
    /// the community alone, then "community - group" and "group - community".
    #[must_use]
    pub fn candidate_labels(&self) -> Vec<String> {
        let mut labels = vec![self.community.clone()];
        if let Some(group) = &self.group {
            labels.push(format!("{} - {}", self.community, group));
            labels.push(format!("{} - {}", group, self.community));
        }
        labels
    }
}

impl Target for Recipient {
    fn target_exists(&self) -> bool {
        self.has_greeting
    }

    fn is_replace_ok(&self) -> bool {
        self.replace_ok
    }

    fn set_replace_ok(&mut self, replace_ok: bool) {
        self.replace_ok = replace_ok;
    }
}

impl std::fmt::Display for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.group {
            Some(group) => write!(f, "{} - {}", self.community, group),
            None => write!(f, "{}", self.community),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_importable_without_existing_target() {
        let target = AudioTarget::new("Malaria prevention");
        assert!(!target.target_exists());
        assert!(target.is_importable());
    }

    #[test]
    fn test_existing_target_needs_consent() {
        let mut target = AudioTarget::new("Malaria prevention").with_existing_item("LB-2_abc");
        assert!(target.target_exists());
        assert!(!target.is_importable());

        target.set_replace_ok(true);
        assert!(target.is_importable());
    }

    #[test]
    fn test_recipient_candidate_labels() {
        let alone = Recipient::new("Jirapa");
        assert_eq!(alone.candidate_labels(), vec!["Jirapa"]);
        assert_eq!(alone.to_string(), "Jirapa");

        let grouped = Recipient::new("Jirapa").with_group("Women");
        assert_eq!(
            grouped.candidate_labels(),
            vec!["Jirapa", "Jirapa - Women", "Women - Jirapa"]
        );
        assert_eq!(grouped.to_string(), "Jirapa - Women");
    }

    #[test]
    fn test_blank_group_is_ignored() {
        let recipient = Recipient::new("Jirapa").with_group("  ");
        assert!(recipient.group.is_none());
    }
}
