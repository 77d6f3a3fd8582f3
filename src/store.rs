use std::fmt;

/// Separator used by the host field between two tags
pub const DELIMITER: &str = ", ";

/// Stable identity of a tag, assigned when the tag enters a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagId(u64);

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub text: String,
}

/// Whether the tag container is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

/// Ordered list of tags owned by one widget instance
#[derive(Debug, Clone, Default)]
pub struct TagStore {
    tags: Vec<Tag>,
    next_id: u64,
}

impl TagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from the host's serialized value
    /// `None` and the empty string both give an empty store.
    /// Empty segments (leading, trailing or doubled delimiters) are dropped.
    pub fn parse(serialized: Option<&str>) -> Self {
        let mut store = Self::new();
        let Some(serialized) = serialized.filter(|s| !s.is_empty()) else {
            return store;
        };

        let mut dropped = 0usize;
        for segment in serialized.split(DELIMITER) {
            if store.add(segment).is_none() {
                dropped += 1;
            }
        }
        if dropped > 0 {
            tracing::debug!(dropped, "ignored empty segments in serialized tags");
        }
        store
    }

    /// Append a tag. Empty text is ignored and yields `None`.
    pub fn add(&mut self, text: &str) -> Option<TagId> {
        if text.is_empty() {
            return None;
        }
        let id = TagId(self.next_id);
        self.next_id += 1;
        self.tags.push(Tag {
            id,
            text: text.to_string(),
        });
        Some(id)
    }

    /// Remove the tag carrying `id`
    pub fn remove(&mut self, id: TagId) -> Option<Tag> {
        let index = self.tags.iter().position(|tag| tag.id == id)?;
        Some(self.tags.remove(index))
    }

    /// Remove the first tag whose text equals `text`
    pub fn remove_value(&mut self, text: &str) -> Option<Tag> {
        let index = self.tags.iter().position(|tag| tag.text == text)?;
        Some(self.tags.remove(index))
    }

    pub fn serialize(&self) -> String {
        self.texts().join(DELIMITER)
    }

    pub fn visibility(&self) -> Visibility {
        if self.tags.is_empty() {
            Visibility::Hidden
        } else {
            Visibility::Visible
        }
    }

    pub fn get(&self, id: TagId) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.tags.iter().map(|tag| tag.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
