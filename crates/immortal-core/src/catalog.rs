//! Static item and furniture definitions.
//!
//! The catalog is pure data. Entries that do something when used name an
//! effect id; the matching handler lives in [`crate::effects`] and is
//! resolved by the session at use time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemType {
    Food,
    Wood,
    Ore,
    Metal,
    Manual,
}

/// Where a piece of furniture goes in the home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FurnitureSlot {
    Bed,
    Bathtub,
    Kitchen,
    Workbench,
}

impl FurnitureSlot {
    pub const ALL: [FurnitureSlot; 4] = [
        FurnitureSlot::Bed,
        FurnitureSlot::Bathtub,
        FurnitureSlot::Kitchen,
        FurnitureSlot::Workbench,
    ];
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: &'static str,
    pub name: &'static str,
    pub item_type: ItemType,
    /// Base price in money.
    pub value: f64,
    pub description: &'static str,
    pub use_label: Option<&'static str>,
    pub use_description: Option<&'static str>,
    /// Whether one unit is removed from the inventory on use.
    pub use_consumes: bool,
    /// Handler to run on use, if the item can be used at all.
    pub effect: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Furniture {
    pub id: &'static str,
    pub name: &'static str,
    pub slot: FurnitureSlot,
    pub value: f64,
    pub description: &'static str,
    /// Handler run once per day while installed.
    pub effect: &'static str,
}

/// Lookup tables for every item and furniture definition.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: HashMap<&'static str, Item>,
    furniture: HashMap<&'static str, Furniture>,
}

impl Catalog {
    /// The full game catalog.
    pub fn standard() -> Self {
        Self::from_entries(standard_items(), standard_furniture())
    }

    pub fn from_entries(items: Vec<Item>, furniture: Vec<Furniture>) -> Self {
        Self {
            items: items.into_iter().map(|i| (i.id, i)).collect(),
            furniture: furniture.into_iter().map(|f| (f.id, f)).collect(),
        }
    }

    pub fn item_by_id(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn furniture_by_id(&self, id: &str) -> Option<&Furniture> {
        self.furniture.get(id)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn furniture(&self) -> impl Iterator<Item = &Furniture> {
        self.furniture.values()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn furniture(
    id: &'static str,
    name: &'static str,
    slot: FurnitureSlot,
    description: &'static str,
) -> Furniture {
    Furniture {
        id,
        name,
        slot,
        value: 1.0,
        description,
        effect: id,
    }
}

fn food(
    id: &'static str,
    value: f64,
    description: &'static str,
    use_description: &'static str,
) -> Item {
    Item {
        id,
        name: id,
        item_type: ItemType::Food,
        value,
        description,
        use_label: Some("Eat"),
        use_description: Some(use_description),
        use_consumes: true,
        effect: Some(id),
    }
}

fn material(
    id: &'static str,
    name: &'static str,
    item_type: ItemType,
    value: f64,
    description: &'static str,
) -> Item {
    Item {
        id,
        name,
        item_type,
        value,
        description,
        use_label: None,
        use_description: None,
        use_consumes: false,
        effect: None,
    }
}

fn manual(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    use_description: &'static str,
) -> Item {
    Item {
        id,
        name,
        item_type: ItemType::Manual,
        value: 1.0,
        description,
        use_label: Some("Read"),
        use_description: Some(use_description),
        use_consumes: true,
        effect: Some(id),
    }
}

/// Every furniture definition in the game.
pub fn standard_furniture() -> Vec<Furniture> {
    use FurnitureSlot::*;
    vec![
        // Beds
        furniture(
            "blanket",
            "Blanket",
            Bed,
            "A tattered blanket. Not much, but it could keep you warm at night.",
        ),
        furniture(
            "mat",
            "Sleeping Mat",
            Bed,
            "A thin woven mat to sleep on. Improves stamina gain each night.",
        ),
        furniture(
            "canopyBed",
            "Canopy Bed",
            Bed,
            "A fine bed with a cover. Curtains keep the mosquitoes off you during the night.",
        ),
        furniture(
            "heatedBed",
            "Heated Bed",
            Bed,
            "A bed built over a small clay oven. Keeps you toasty on even the coldest nights.",
        ),
        furniture(
            "bedOfNails",
            "Bed of Nails",
            Bed,
            "A solid board with nails poking upwards. Certain to toughen you up.",
        ),
        // Baths
        furniture(
            "waterBucket",
            "water bucket",
            Bathtub,
            "A bucket of water that lets you splash water on your face.",
        ),
        furniture("washBasin", "wash basin", Bathtub, "A wash basin with a rag to clean yourself."),
        furniture(
            "woodenTub",
            "wooden tub",
            Bathtub,
            "A tall and narrow tub where you can squat and bathe.",
        ),
        furniture(
            "bronzeTub",
            "bronze tub",
            Bathtub,
            "A luxurious tub where you can get sparkling clean.",
        ),
        furniture(
            "heatedTub",
            "heated tub",
            Bathtub,
            "A luxurious tub with its own heating stove. Good for your health and beauty.",
        ),
        // Kitchens
        furniture("cookPot", "cook pot", Kitchen, "A simple pot over a fire to boil your food."),
        furniture(
            "roastingSpit",
            "roasting spit",
            Kitchen,
            "A simple spit to go along with your cookpot, letting you add more variety to your diet.",
        ),
        furniture("wok", "wok", Kitchen, "A large metal wok to stir-fry a tasty dinner."),
        furniture(
            "chefKitchen",
            "chef kitchen",
            Kitchen,
            "An elaborate kitchen that allows you to cook anything.",
        ),
        // Workbenches
        furniture("anvil", "anvil", Workbench, "An anvil to work on blacksmithing."),
        furniture("herbGarden", "herb garden", Workbench, "A pleasant garden growing herbs."),
        furniture("cauldron", "cauldron", Workbench, "A cauldron for practicing alchemy."),
    ]
}

/// Every item definition in the game.
pub fn standard_items() -> Vec<Item> {
    use ItemType::*;
    vec![
        // Food
        food(
            "rice",
            1.0,
            "A basic staple of life. One pouch will sustain you for a day.",
            "Fills your belly.",
        ),
        food(
            "cabbage",
            5.0,
            "A simple, healthy vegetable.",
            "Fills your belly and helps you be healthy.",
        ),
        food(
            "beans",
            10.0,
            "A handful of healthy vegetables.",
            "Fills your belly and helps you be healthy.",
        ),
        food(
            "broccoli",
            20.0,
            "A very healthy vegetable.",
            "Fills your belly and helps you be healthy.",
        ),
        food("melon", 30.0, "A delicious fruit.", "Fills your belly and helps you be healthy."),
        food(
            "peach",
            50.0,
            "A highly prized and delicious fruit.",
            "Fills your belly and can even lead to a long life.",
        ),
        food(
            "meat",
            50.0,
            "Some delicious meat.",
            "Fills your belly. Can also improve your health and stamina.",
        ),
        food(
            "carp",
            50.0,
            "A common fish.",
            "Fills your belly. Might also improve your health and stamina.",
        ),
        // Wood
        material("elmLog", "elm log", Wood, 1.0, "A terrible quality log."),
        material("cypressLog", "cypress log", Wood, 2.0, "A poor quality log."),
        material("walnutLog", "walnut log", Wood, 3.0, "An adequate quality log."),
        material("laurelwoodLog", "laurelwood log", Wood, 4.0, "A nice quality log."),
        material("pearwoodLog", "pearwood log", Wood, 5.0, "A good quality log."),
        material("rosewoodLog", "rosewood log", Wood, 6.0, "A great quality log."),
        material("zitanLog", "zitan log", Wood, 7.0, "An excellent quality log."),
        material("blackwoodLog", "blackwood log", Wood, 8.0, "An amazing quality log."),
        material("peachwoodLog", "peachwood log", Wood, 9.0, "A spiritual quality log."),
        // Ore
        material("copperOre", "copper ore", Ore, 1.0, "A chunk of copper ore."),
        material(
            "bronzeOre",
            "mixed ore",
            Ore,
            2.0,
            "A chunk of ore containing copper, tin, lead, and zinc.",
        ),
        material("ironOre", "iron ore", Ore, 3.0, "A chunk of iron ore."),
        // Metal
        material("copperBar", "copper bar", Metal, 1.0, "A bar of copper."),
        material("bronzeBar", "bronze bar", Metal, 2.0, "A bar of bronze."),
        material("ironBar", "iron bar", Metal, 3.0, "A bar of iron."),
        material("junk", "junk", Metal, 1.0, "Some metal junk."),
        // Manuals
        manual(
            "perpetualFarmingManual",
            "Manual of Perpetual Farming",
            "This manual teaches you to automatically replant fields when they are harvested.",
            "Permanently unlock automatic farm replanting.",
        ),
        manual(
            "restartActivityManual",
            "Manual of Remembered Plans",
            "This manual teaches you to automatically resume activities from your previous life. Only activities that you qualify for when you reach adulthood are available to resume.",
            "Permanently unlock preserving activity plans across reincarnations.",
        ),
        manual(
            "autoSellManual",
            "Manual of Mercantile Fluency",
            "This manual teaches you to automatically sell items.",
            "Permanently unlock Autosell button in the inventory panel.",
        ),
        manual(
            "autoUseManual",
            "Manual of Facilitated Usage",
            "This manual teaches you to automatically use items.",
            "Permanently unlock Autouse button in the inventory panel.",
        ),
        manual(
            "autoBuyLandManual",
            "Manual of Land Acquisition",
            "This manual teaches you to automatically purchase land.",
            "Permanently unlock automatic land purchasing.",
        ),
        manual(
            "autoBuyHomeManual",
            "Manual of Home Improvement",
            "This manual teaches you to automatically upgrade your home.",
            "Permanently unlock automatic home upgrades.",
        ),
        manual(
            "autoBuyFurnitureManual",
            "Manual of Home Furnishing",
            "This manual teaches you to automatically buy the last furniture you bought for your home in future lives.",
            "Permanently unlock automatic purchasing for furniture.",
        ),
        manual(
            "autoFieldManual",
            "Manual of Field Conversion",
            "This manual teaches you to automatically plow open land into fields.",
            "Permanently unlock automatic field plowing.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::standard();
        let rice = catalog.item_by_id("rice").expect("rice");
        assert_eq!(rice.item_type, ItemType::Food);
        assert!(rice.use_consumes);
        assert_eq!(rice.use_label, Some("Eat"));

        let anvil = catalog.furniture_by_id("anvil").expect("anvil");
        assert_eq!(anvil.slot, FurnitureSlot::Workbench);
    }

    #[test]
    fn unknown_ids_miss() {
        let catalog = Catalog::standard();
        assert!(catalog.item_by_id("dragonScale").is_none());
        assert!(catalog.furniture_by_id("rice").is_none());
        assert!(catalog.item_by_id("blanket").is_none());
    }

    #[test]
    fn ids_unique() {
        let items = standard_items();
        let ids: HashSet<_> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), items.len());

        let furniture = standard_furniture();
        let ids: HashSet<_> = furniture.iter().map(|f| f.id).collect();
        assert_eq!(ids.len(), furniture.len());
    }

    #[test]
    fn materials_are_inert() {
        let catalog = Catalog::standard();
        for item in catalog.items() {
            match item.item_type {
                ItemType::Wood | ItemType::Ore | ItemType::Metal => {
                    assert!(item.effect.is_none(), "{} should be inert", item.id);
                    assert!(!item.use_consumes);
                }
                ItemType::Food | ItemType::Manual => {
                    assert!(item.effect.is_some(), "{} should be usable", item.id);
                    assert!(item.use_consumes);
                }
            }
        }
    }

    #[test]
    fn every_slot_has_furniture() {
        let catalog = Catalog::standard();
        for slot in FurnitureSlot::ALL {
            assert!(catalog.furniture().any(|f| f.slot == slot), "{:?}", slot);
        }
    }

    #[test]
    fn catalog_sizes() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.items().count(), 32);
        assert_eq!(catalog.furniture().count(), 17);
        assert_eq!(
            catalog
                .items()
                .filter(|i| i.item_type == ItemType::Manual)
                .count(),
            8
        );
    }
}
