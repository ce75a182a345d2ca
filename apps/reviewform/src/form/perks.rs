use crate::models::Perk;

/// Perk multi-select: the catalogue's `is_selected` flags plus the ordered list of selected ids.
///
/// Invariant: `selected` holds exactly the ids of perks flagged selected, in the order
/// they were picked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerkSelectionSet {
    catalogue: Vec<Perk>,
    selected: Vec<i64>,
}

impl PerkSelectionSet {
    /// Installs a freshly fetched catalogue. Every perk starts unselected.
    pub fn load(&mut self, perks: Vec<Perk>) {
        self.catalogue = perks
            .into_iter()
            .map(|mut perk| {
                perk.is_selected = false;
                perk
            })
            .collect();
        self.selected.clear();
    }

    /// Flips the perk's selection. Returns the new state, or `None` for an unknown id.
    pub fn toggle(&mut self, perk_id: i64) -> Option<bool> {
        let perk = self.catalogue.iter_mut().find(|p| p.id == perk_id)?;

        if !perk.is_selected {
            perk.is_selected = true;
            self.selected.push(perk.id);
        } else {
            perk.is_selected = false;
            if let Some(i) = self.selected.iter().position(|id| *id == perk.id) {
                self.selected.remove(i);
            }
        }

        Some(perk.is_selected)
    }

    pub fn is_selected(&self, perk_id: i64) -> bool {
        self.catalogue
            .iter()
            .any(|p| p.id == perk_id && p.is_selected)
    }

    pub fn selected_ids(&self) -> &[i64] {
        &self.selected
    }

    pub fn catalogue(&self) -> &[Perk] {
        &self.catalogue
    }
}
