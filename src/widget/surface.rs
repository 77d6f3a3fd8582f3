use crate::store::{TagId, TagStore, Visibility};

/// A rendered tag with its close control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub id: TagId,
    pub text: String,
}

/// One instruction for the render surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOp {
    /// Initial full draw
    Mount { visibility: Visibility, chips: Vec<Chip> },
    AppendChip(Chip),
    RemoveChip(TagId),
    SetVisibility(Visibility),
}

pub fn render_chips(store: &TagStore) -> Vec<Chip> {
    store
        .iter()
        .map(|tag| Chip {
            id: tag.id,
            text: tag.text.clone(),
        })
        .collect()
}

/// What is currently drawn for one widget
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSurface {
    pub container_visible: bool,
    pub chips: Vec<Chip>,
}

impl RenderSurface {
    pub fn apply(&mut self, op: RenderOp) {
        match op {
            RenderOp::Mount { visibility, chips } => {
                self.container_visible = visibility == Visibility::Visible;
                self.chips = chips;
            }
            RenderOp::AppendChip(chip) => self.chips.push(chip),
            RenderOp::RemoveChip(id) => self.chips.retain(|chip| chip.id != id),
            RenderOp::SetVisibility(visibility) => {
                self.container_visible = visibility == Visibility::Visible;
            }
        }
    }

    pub fn apply_all(&mut self, ops: impl IntoIterator<Item = RenderOp>) {
        for op in ops {
            self.apply(op);
        }
    }

    pub fn position(&self, id: TagId) -> Option<usize> {
        self.chips.iter().position(|chip| chip.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_chips_keeps_store_order() {
        let store = TagStore::parse(Some("Alpha, Beta"));
        let chips = render_chips(&store);
        let texts: Vec<_> = chips.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn remove_chip_only_touches_matching_id() {
        let mut store = TagStore::new();
        let a = store.add("Alpha").unwrap();
        let b = store.add("Alpha").unwrap();
        let mut surface = RenderSurface::default();
        surface.apply(RenderOp::Mount {
            visibility: store.visibility(),
            chips: render_chips(&store),
        });
        surface.apply(RenderOp::RemoveChip(b));
        assert_eq!(surface.chips.len(), 1);
        assert_eq!(surface.position(a), Some(0));
        assert!(surface.container_visible);
    }
}
