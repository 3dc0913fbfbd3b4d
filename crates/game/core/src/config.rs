/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Number of dice in a fresh hand. Loadouts are padded or truncated to this size.
    pub hand_size: u8,
    /// Per-zone die cap at the start of every encounter.
    pub max_dice_per_zone: u8,
    /// Rolls granted at the start of each turn before relic bonuses.
    pub base_rolls_per_turn: u8,
    pub player_max_health: u32,
    pub bomb_countdown: u8,
    pub medicine_uses: u8,
    pub comet_triggers: u8,
    pub charger_triggers: u8,
    pub charger_triggers_upgraded: u8,
    pub battery_uses: u8,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Six loadout dice plus one battery slot.
    pub const MAX_HAND_SIZE: usize = 7;
    pub const MAX_DICE_PER_ZONE: usize = 6;
    /// Upper bound on wildcards searched exhaustively (6^6 assignments).
    pub const MAX_WILDCARDS: usize = 6;
    pub const MIN_FACE: u8 = 1;
    pub const MAX_FACE: u8 = 6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HAND_SIZE: u8 = 6;
    pub const DEFAULT_MAX_DICE_PER_ZONE: u8 = 6;
    pub const DEFAULT_ROLLS_PER_TURN: u8 = 3;
    pub const DEFAULT_PLAYER_MAX_HEALTH: u32 = 100;
    pub const DEFAULT_BOMB_COUNTDOWN: u8 = 3;
    pub const DEFAULT_MEDICINE_USES: u8 = 3;
    pub const DEFAULT_COMET_TRIGGERS: u8 = 1;
    pub const DEFAULT_CHARGER_TRIGGERS: u8 = 3;
    pub const DEFAULT_CHARGER_TRIGGERS_UPGRADED: u8 = 5;
    pub const DEFAULT_BATTERY_USES: u8 = 3;

    pub fn new() -> Self {
        Self {
            hand_size: Self::DEFAULT_HAND_SIZE,
            max_dice_per_zone: Self::DEFAULT_MAX_DICE_PER_ZONE,
            base_rolls_per_turn: Self::DEFAULT_ROLLS_PER_TURN,
            player_max_health: Self::DEFAULT_PLAYER_MAX_HEALTH,
            bomb_countdown: Self::DEFAULT_BOMB_COUNTDOWN,
            medicine_uses: Self::DEFAULT_MEDICINE_USES,
            comet_triggers: Self::DEFAULT_COMET_TRIGGERS,
            charger_triggers: Self::DEFAULT_CHARGER_TRIGGERS,
            charger_triggers_upgraded: Self::DEFAULT_CHARGER_TRIGGERS_UPGRADED,
            battery_uses: Self::DEFAULT_BATTERY_USES,
        }
    }

    pub fn with_hand_size(mut self, hand_size: u8) -> Self {
        self.hand_size = hand_size.clamp(1, Self::MAX_DICE_PER_ZONE as u8);
        self
    }

    pub fn with_rolls_per_turn(mut self, rolls: u8) -> Self {
        self.base_rolls_per_turn = rolls;
        self
    }

    pub fn with_player_max_health(mut self, health: u32) -> Self {
        self.player_max_health = health;
        self
    }

    /// Clamps a requested per-zone cap into `1..=hand_size`.
    pub fn clamp_zone_cap(&self, requested: u8) -> u8 {
        let upper = self.hand_size.min(Self::MAX_DICE_PER_ZONE as u8).max(1);
        requested.clamp(1, upper)
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_cap_is_clamped_to_hand_size() {
        let config = CombatConfig::new().with_hand_size(4);
        assert_eq!(config.clamp_zone_cap(0), 1);
        assert_eq!(config.clamp_zone_cap(3), 3);
        assert_eq!(config.clamp_zone_cap(9), 4);
    }
}
