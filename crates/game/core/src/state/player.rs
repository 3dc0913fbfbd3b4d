use crate::combat::{self, Mitigation};

/// Persistent player profile plus the per-turn block.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub health: u32,
    pub max_health: u32,
    pub block: u32,
    pub burn: u32,
    pub gold: u32,
}

impl PlayerState {
    pub fn new(max_health: u32) -> Self {
        Self {
            health: max_health,
            max_health,
            block: 0,
            burn: 0,
            gold: 0,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Enemy attack: block absorbs first.
    pub fn take_hit(&mut self, amount: u32) -> Mitigation {
        let mitigation = combat::mitigate(amount, &mut self.block);
        Mitigation {
            blocked: mitigation.blocked,
            damage: combat::apply_damage(&mut self.health, mitigation.damage),
        }
    }

    /// Burn damage, bypassing block. Returns the health lost.
    pub fn take_burn_tick(&mut self) -> u32 {
        combat::apply_damage(&mut self.health, self.burn)
    }

    pub fn heal(&mut self, amount: u32) -> u32 {
        combat::heal(&mut self.health, self.max_health, amount)
    }

    pub fn add_burn(&mut self, amount: u32) -> u32 {
        self.burn = self.burn.saturating_add(amount);
        amount
    }

    pub fn reduce_burn(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.burn);
        self.burn -= removed;
        removed
    }

    pub fn add_gold(&mut self, amount: u32) -> u32 {
        self.gold = self.gold.saturating_add(amount);
        amount
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(crate::config::CombatConfig::DEFAULT_PLAYER_MAX_HEALTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_spend_block_before_health() {
        let mut player = PlayerState::new(50);
        player.block = 8;
        let hit = player.take_hit(10);
        assert_eq!(hit.blocked, 8);
        assert_eq!(hit.damage, 2);
        assert_eq!(player.health, 48);
        assert_eq!(player.block, 0);
    }

    #[test]
    fn burn_ignores_block() {
        let mut player = PlayerState::new(50);
        player.block = 30;
        player.add_burn(4);
        assert_eq!(player.take_burn_tick(), 4);
        assert_eq!(player.health, 46);
        assert_eq!(player.block, 30);
    }

    #[test]
    fn burn_reduction_stops_at_zero() {
        let mut player = PlayerState::new(50);
        player.add_burn(2);
        assert_eq!(player.reduce_burn(5), 2);
        assert_eq!(player.burn, 0);
    }

    #[test]
    fn burn_stacks_saturate() {
        let mut player = PlayerState::new(50);
        player.add_burn(u32::MAX);
        player.add_burn(7);
        assert_eq!(player.burn, u32::MAX);
    }
}
