//! Element and modality balance of a chart.

use crate::angle::sign_index;
use crate::aspects::patterns::finite_positions;
use crate::ephemeris::types::BodyPosition;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

/// Element of a sign (0 = Aries)
pub fn element_of(sign: usize) -> Element {
    match sign % 4 {
        0 => Element::Fire,
        1 => Element::Earth,
        2 => Element::Air,
        _ => Element::Water,
    }
}

pub fn modality_of(sign: usize) -> Modality {
    match sign % 3 {
        0 => Modality::Cardinal,
        1 => Modality::Fixed,
        _ => Modality::Mutable,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ElementBalance {
    pub fire: usize,
    pub earth: usize,
    pub air: usize,
    pub water: usize,
}

impl ElementBalance {
    /// Element with the most bodies; ties go to the earlier of fire, earth,
    /// air, water.
    pub fn dominant(&self) -> Element {
        let mut best = (Element::Fire, self.fire);
        for candidate in [
            (Element::Earth, self.earth),
            (Element::Air, self.air),
            (Element::Water, self.water),
        ] {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        best.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModalityBalance {
    pub cardinal: usize,
    pub fixed: usize,
    pub mutable: usize,
}

impl ModalityBalance {
    /// Modality with the most bodies; ties go to the earlier of cardinal,
    /// fixed, mutable.
    pub fn dominant(&self) -> Modality {
        let mut best = (Modality::Cardinal, self.cardinal);
        for candidate in [
            (Modality::Fixed, self.fixed),
            (Modality::Mutable, self.mutable),
        ] {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        best.0
    }
}

/// Count bodies by the element of their sign. Non-finite longitudes are
/// left out.
pub fn element_balance(positions: &[BodyPosition]) -> ElementBalance {
    let mut balance = ElementBalance::default();
    for pos in finite_positions(positions) {
        match element_of(sign_index(pos.lon)) {
            Element::Fire => balance.fire += 1,
            Element::Earth => balance.earth += 1,
            Element::Air => balance.air += 1,
            Element::Water => balance.water += 1,
        }
    }
    balance
}

pub fn modality_balance(positions: &[BodyPosition]) -> ModalityBalance {
    let mut balance = ModalityBalance::default();
    for pos in finite_positions(positions) {
        match modality_of(sign_index(pos.lon)) {
            Modality::Cardinal => balance.cardinal += 1,
            Modality::Fixed => balance.fixed += 1,
            Modality::Mutable => balance.mutable += 1,
        }
    }
    balance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_tables() {
        assert_eq!(element_of(0), Element::Fire);
        assert_eq!(element_of(3), Element::Water);
        assert_eq!(element_of(9), Element::Earth);
        assert_eq!(modality_of(4), Modality::Fixed);
        assert_eq!(modality_of(11), Modality::Mutable);
        assert_eq!(modality_of(6), Modality::Cardinal);
    }

    #[test]
    fn test_dominant_prefers_earlier_on_tie() {
        let balance = ElementBalance {
            fire: 1,
            earth: 2,
            air: 2,
            water: 0,
        };
        assert_eq!(balance.dominant(), Element::Earth);
        assert_eq!(ModalityBalance::default().dominant(), Modality::Cardinal);
    }
}
