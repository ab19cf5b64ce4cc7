//! Equipment slots. Storage only; equipping rules live elsewhere.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EquipmentPosition {
    Head,
    Body,
    LeftHand,
    RightHand,
    Legs,
    Feet,
}

impl EquipmentPosition {
    pub const ALL: [EquipmentPosition; 6] = [
        EquipmentPosition::Head,
        EquipmentPosition::Body,
        EquipmentPosition::LeftHand,
        EquipmentPosition::RightHand,
        EquipmentPosition::Legs,
        EquipmentPosition::Feet,
    ];
}

/// An item that can be worn or wielded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub description: String,
    pub value: f64,
    pub slot: EquipmentPosition,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentSlots {
    pub head: Option<Equipment>,
    pub body: Option<Equipment>,
    pub left_hand: Option<Equipment>,
    pub right_hand: Option<Equipment>,
    pub legs: Option<Equipment>,
    pub feet: Option<Equipment>,
}

impl EquipmentSlots {
    pub fn get(&self, position: EquipmentPosition) -> Option<&Equipment> {
        match position {
            EquipmentPosition::Head => self.head.as_ref(),
            EquipmentPosition::Body => self.body.as_ref(),
            EquipmentPosition::LeftHand => self.left_hand.as_ref(),
            EquipmentPosition::RightHand => self.right_hand.as_ref(),
            EquipmentPosition::Legs => self.legs.as_ref(),
            EquipmentPosition::Feet => self.feet.as_ref(),
        }
    }

    fn slot_mut(&mut self, position: EquipmentPosition) -> &mut Option<Equipment> {
        match position {
            EquipmentPosition::Head => &mut self.head,
            EquipmentPosition::Body => &mut self.body,
            EquipmentPosition::LeftHand => &mut self.left_hand,
            EquipmentPosition::RightHand => &mut self.right_hand,
            EquipmentPosition::Legs => &mut self.legs,
            EquipmentPosition::Feet => &mut self.feet,
        }
    }

    /// Put `item` into `position`, returning whatever was there.
    pub fn set(
        &mut self,
        position: EquipmentPosition,
        item: Option<Equipment>,
    ) -> Option<Equipment> {
        std::mem::replace(self.slot_mut(position), item)
    }

    /// Empty every slot.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        EquipmentPosition::ALL.iter().all(|&p| self.get(p).is_none())
    }
}
