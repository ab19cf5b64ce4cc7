//! Item stacks carried by the character and furniture installed at home.
//! Both are emptied when the character reincarnates.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, FurnitureSlot, ItemType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub id: String,
    pub quantity: u32,
}

/// Ordered item stacks; the oldest stack comes first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    stacks: Vec<ItemStack>,
}

impl Inventory {
    pub fn add(&mut self, id: &str, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.stacks.iter_mut().find(|s| s.id == id) {
            Some(stack) => stack.quantity = stack.quantity.saturating_add(quantity),
            None => self.stacks.push(ItemStack {
                id: id.to_string(),
                quantity,
            }),
        }
    }

    /// Remove `quantity` of an item. Returns false, changing nothing, if
    /// fewer are held.
    pub fn remove(&mut self, id: &str, quantity: u32) -> bool {
        let Some(index) = self.stacks.iter().position(|s| s.id == id) else {
            return quantity == 0;
        };
        let stack = &mut self.stacks[index];
        if stack.quantity < quantity {
            return false;
        }
        stack.quantity -= quantity;
        if stack.quantity == 0 {
            self.stacks.remove(index);
        }
        true
    }

    pub fn quantity(&self, id: &str) -> u32 {
        self.stacks
            .iter()
            .find(|s| s.id == id)
            .map_or(0, |s| s.quantity)
    }

    /// Id of the oldest held stack of the given type.
    pub fn first_of_type(&self, item_type: ItemType, catalog: &Catalog) -> Option<&str> {
        self.stacks
            .iter()
            .find(|s| {
                catalog
                    .item_by_id(&s.id)
                    .is_some_and(|item| item.item_type == item_type)
            })
            .map(|s| s.id.as_str())
    }

    pub fn stacks(&self) -> &[ItemStack] {
        &self.stacks
    }

    pub fn clear(&mut self) {
        self.stacks.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}

/// One furniture id per home slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Home {
    pub bed: Option<String>,
    pub bathtub: Option<String>,
    pub kitchen: Option<String>,
    pub workbench: Option<String>,
}

impl Home {
    pub fn get(&self, slot: FurnitureSlot) -> Option<&str> {
        match slot {
            FurnitureSlot::Bed => self.bed.as_deref(),
            FurnitureSlot::Bathtub => self.bathtub.as_deref(),
            FurnitureSlot::Kitchen => self.kitchen.as_deref(),
            FurnitureSlot::Workbench => self.workbench.as_deref(),
        }
    }

    /// Install furniture in `slot`, returning what it replaced.
    pub fn set(&mut self, slot: FurnitureSlot, id: Option<String>) -> Option<String> {
        let target = match slot {
            FurnitureSlot::Bed => &mut self.bed,
            FurnitureSlot::Bathtub => &mut self.bathtub,
            FurnitureSlot::Kitchen => &mut self.kitchen,
            FurnitureSlot::Workbench => &mut self.workbench,
        };
        std::mem::replace(target, id)
    }

    /// Installed furniture ids in slot order.
    pub fn installed(&self) -> impl Iterator<Item = &str> {
        FurnitureSlot::ALL.into_iter().filter_map(|slot| self.get(slot))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_merges_stacks() {
        let mut inv = Inventory::default();
        inv.add("rice", 2);
        inv.add("elmLog", 1);
        inv.add("rice", 3);
        assert_eq!(inv.quantity("rice"), 5);
        assert_eq!(inv.stacks().len(), 2);
        assert_eq!(inv.stacks()[0].id, "rice");
    }

    #[test]
    fn add_zero_is_ignored() {
        let mut inv = Inventory::default();
        inv.add("rice", 0);
        assert!(inv.is_empty());
    }

    #[test]
    fn remove_exact_drops_stack() {
        let mut inv = Inventory::default();
        inv.add("melon", 2);
        assert!(inv.remove("melon", 2));
        assert!(inv.is_empty());
    }

    #[test]
    fn remove_too_many_fails() {
        let mut inv = Inventory::default();
        inv.add("melon", 1);
        assert!(!inv.remove("melon", 2));
        assert_eq!(inv.quantity("melon"), 1);
        assert!(!inv.remove("peach", 1));
    }

    #[test]
    fn first_food_skips_materials() {
        let catalog = Catalog::standard();
        let mut inv = Inventory::default();
        inv.add("ironOre", 4);
        inv.add("carp", 1);
        inv.add("rice", 1);
        assert_eq!(inv.first_of_type(ItemType::Food, &catalog), Some("carp"));
        assert_eq!(inv.first_of_type(ItemType::Manual, &catalog), None);
    }

    #[test]
    fn home_slots() {
        let mut home = Home::default();
        assert!(home.set(FurnitureSlot::Bed, Some("mat".into())).is_none());
        assert_eq!(
            home.set(FurnitureSlot::Bed, Some("heatedBed".into())),
            Some("mat".to_string())
        );
        home.set(FurnitureSlot::Workbench, Some("anvil".into()));
        let installed: Vec<&str> = home.installed().collect();
        assert_eq!(installed, vec!["heatedBed", "anvil"]);
        home.clear();
        assert_eq!(home.installed().count(), 0);
    }
}
