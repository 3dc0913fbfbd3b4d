//! Combo catalogue and point tables.

/// Named face-value patterns, declared from lowest to highest tier.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum ComboKind {
    #[default]
    #[strum(serialize = "No combo")]
    NoCombo,
    #[strum(serialize = "Pair")]
    Pair,
    #[strum(serialize = "Two Pair")]
    TwoPair,
    #[strum(serialize = "Three of a Kind")]
    ThreeOfAKind,
    #[strum(serialize = "Straight Tri")]
    StraightTri,
    #[strum(serialize = "Four of a Kind")]
    FourOfAKind,
    #[strum(serialize = "Straight Quad")]
    StraightQuad,
    #[strum(serialize = "Full House")]
    FullHouse,
    #[strum(serialize = "Straight Penta")]
    StraightPenta,
    #[strum(serialize = "Five of a Kind")]
    FiveOfAKind,
    #[strum(serialize = "Fuller House")]
    FullerHouse,
    #[strum(serialize = "Triples Pair")]
    TriplesPair,
    #[strum(serialize = "Straight Sex")]
    StraightSex,
    #[strum(serialize = "YAHTZEE")]
    Yahtzee,
}

impl ComboKind {
    /// Every combo in tier order, lowest first.
    pub const ALL: [ComboKind; 14] = [
        ComboKind::NoCombo,
        ComboKind::Pair,
        ComboKind::TwoPair,
        ComboKind::ThreeOfAKind,
        ComboKind::StraightTri,
        ComboKind::FourOfAKind,
        ComboKind::StraightQuad,
        ComboKind::FullHouse,
        ComboKind::StraightPenta,
        ComboKind::FiveOfAKind,
        ComboKind::FullerHouse,
        ComboKind::TriplesPair,
        ComboKind::StraightSex,
        ComboKind::Yahtzee,
    ];

    pub fn is_straight(self) -> bool {
        matches!(
            self,
            ComboKind::StraightTri
                | ComboKind::StraightQuad
                | ComboKind::StraightPenta
                | ComboKind::StraightSex
        )
    }

    pub fn is_long_straight(self) -> bool {
        matches!(self, ComboKind::StraightPenta | ComboKind::StraightSex)
    }

    pub fn is_combo(self) -> bool {
        self != ComboKind::NoCombo
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Points awarded per combo.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboTable {
    points: [u32; 14],
}

impl ComboTable {
    const STANDARD: [u32; 14] = [0, 2, 5, 5, 5, 10, 10, 15, 15, 15, 20, 20, 20, 25];
    const CHAIN_REACTOR: [u32; 14] = [0, 3, 7, 7, 7, 12, 12, 18, 18, 18, 25, 25, 25, 30];

    pub fn standard() -> Self {
        Self {
            points: Self::STANDARD,
        }
    }

    /// Boosted table granted by the chain-reactor relic.
    pub fn chain_reactor() -> Self {
        Self {
            points: Self::CHAIN_REACTOR,
        }
    }

    pub fn from_points(points: [u32; 14]) -> Self {
        Self { points }
    }

    pub fn points(&self, kind: ComboKind) -> u32 {
        self.points[kind.index()]
    }
}

impl Default for ComboTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn all_is_in_declaration_order() {
        for pair in ComboKind::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn display_names_round_trip() {
        assert_eq!(ComboKind::FullHouse.to_string(), "Full House");
        assert_eq!(ComboKind::from_str("yahtzee").unwrap(), ComboKind::Yahtzee);
        assert_eq!(ComboKind::NoCombo.as_ref(), "No combo");
    }

    #[test]
    fn chain_reactor_never_pays_less() {
        let base = ComboTable::standard();
        let boosted = ComboTable::chain_reactor();
        for kind in ComboKind::ALL {
            assert!(boosted.points(kind) >= base.points(kind), "{kind}");
        }
        assert_eq!(boosted.points(ComboKind::Yahtzee), 30);
    }
}
