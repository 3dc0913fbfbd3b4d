//! Sources of randomness consumed by the combat engine.
//!
//! [`Entropy`] binds an [`RngOracle`] to the combat seed and the draw cursor
//! stored in [`crate::state::CombatState`], so every draw advances the cursor
//! exactly once and replays stay reproducible. [`EnemyRng`] is the owned
//! stream an enemy receives when it is created, for procedural move choices.
mod rng;

pub use rng::{PcgRng, RngOracle, compute_seed};

/// Purpose tags mixed into draw seeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum DrawPurpose {
    FaceRoll = 1,
    CurseTarget = 2,
    CrowdControl = 3,
    EnemyChoice = 4,
}

/// Cursor-advancing view over an oracle.
pub struct Entropy<'a> {
    oracle: &'a dyn RngOracle,
    seed: u64,
    cursor: &'a mut u64,
}

impl<'a> Entropy<'a> {
    pub fn new(oracle: &'a dyn RngOracle, seed: u64, cursor: &'a mut u64) -> Self {
        Self {
            oracle,
            seed,
            cursor,
        }
    }

    fn next_seed(&mut self, subject: u32, purpose: DrawPurpose) -> u64 {
        let seed = compute_seed(self.seed, *self.cursor, subject, purpose as u32);
        *self.cursor = self.cursor.wrapping_add(1);
        seed
    }

    /// Rolls a six-sided face for the given subject.
    pub fn roll_face(&mut self, subject: u32) -> u8 {
        let seed = self.next_seed(subject, DrawPurpose::FaceRoll);
        self.oracle.roll_die(seed, 6) as u8
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize, purpose: DrawPurpose) -> usize {
        let seed = self.next_seed(len as u32, purpose);
        self.oracle.range(seed, 0, len.saturating_sub(1) as u32) as usize
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T], purpose: DrawPurpose) {
        for i in (1..items.len()).rev() {
            let seed = self.next_seed(i as u32, purpose);
            let j = self.oracle.range(seed, 0, i as u32) as usize;
            items.swap(i, j);
        }
    }

    /// Picks `count` distinct elements uniformly at random, in draw order.
    pub fn sample<T: Copy>(&mut self, pool: &[T], count: usize, purpose: DrawPurpose) -> Vec<T> {
        let mut remaining: Vec<T> = pool.to_vec();
        let mut picked = Vec::with_capacity(count.min(pool.len()));
        while picked.len() < count && !remaining.is_empty() {
            let idx = self.index(remaining.len(), purpose);
            picked.push(remaining.swap_remove(idx));
        }
        picked
    }
}

/// Seeded draw stream owned by one enemy for one encounter.
///
/// Enemies draw only from their own hooks, never from previews, so the
/// stream advances once per committed choice and replays stay stable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnemyRng {
    seed: u64,
    cursor: u64,
}

impl EnemyRng {
    pub fn new(seed: u64) -> Self {
        Self { seed, cursor: 0 }
    }

    /// Stream for the `encounter`-th encounter of a run.
    pub fn for_encounter(run_seed: u64, encounter: usize) -> Self {
        Self::new(compute_seed(
            run_seed,
            encounter as u64,
            0,
            DrawPurpose::EnemyChoice as u32,
        ))
    }

    pub fn next_u32(&mut self) -> u32 {
        let seed = compute_seed(self.seed, self.cursor, 0, DrawPurpose::EnemyChoice as u32);
        self.cursor = self.cursor.wrapping_add(1);
        PcgRng.next_u32(seed)
    }

    /// Uniform index in `0..len`, or `None` when `len` is zero.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.next_u32() as usize % len)
    }

    pub fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        self.index(items.len()).map(|idx| items[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_draw_advances_the_cursor() {
        let mut cursor = 0;
        let mut entropy = Entropy::new(&PcgRng, 99, &mut cursor);
        entropy.roll_face(1);
        entropy.roll_face(1);
        assert_eq!(cursor, 2);
    }

    #[test]
    fn sample_returns_distinct_elements() {
        let mut cursor = 0;
        let mut entropy = Entropy::new(&PcgRng, 5, &mut cursor);
        let picked = entropy.sample(&[1, 2, 3, 4, 5], 3, DrawPurpose::CurseTarget);
        assert_eq!(picked.len(), 3);
        let mut sorted = picked.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 3);
    }

    #[test]
    fn sample_is_capped_by_pool_size() {
        let mut cursor = 0;
        let mut entropy = Entropy::new(&PcgRng, 5, &mut cursor);
        assert_eq!(entropy.sample(&[1, 2], 5, DrawPurpose::CurseTarget).len(), 2);
    }

    #[test]
    fn enemy_streams_replay_per_encounter() {
        let mut first = EnemyRng::for_encounter(7, 2);
        let mut again = EnemyRng::for_encounter(7, 2);
        let drawn: Vec<u32> = (0..4).map(|_| first.next_u32()).collect();
        let replayed: Vec<u32> = (0..4).map(|_| again.next_u32()).collect();
        assert_eq!(drawn, replayed);
        assert_ne!(EnemyRng::for_encounter(7, 3).next_u32(), drawn[0]);
    }

    #[test]
    fn enemy_choice_stays_in_the_pool() {
        let mut rng = EnemyRng::new(3);
        assert_eq!(rng.choose::<u8>(&[]), None);
        for _ in 0..50 {
            assert!(matches!(rng.choose(&['a', 'b', 'c']), Some('a' | 'b' | 'c')));
        }
    }

    #[test]
    fn shuffle_keeps_all_elements() {
        let mut cursor = 0;
        let mut entropy = Entropy::new(&PcgRng, 11, &mut cursor);
        let mut items = [1, 2, 3, 4, 5, 6];
        entropy.shuffle(&mut items, DrawPurpose::CrowdControl);
        let mut sorted = items;
        sorted.sort();
        assert_eq!(sorted, [1, 2, 3, 4, 5, 6]);
    }
}
