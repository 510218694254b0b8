//! Random challenge generation
//!
//! A challenge picks one eligible boss uniformly at random, then a kill count
//! uniformly from that boss's kill range (or the generator's default range for
//! bosses without one).

use bosskill_types::{Boss, Challenge, DEFAULT_KILL_RANGE, KillRange};
use hashbrown::HashSet;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::ChallengeError;

pub struct ChallengeGenerator<R = StdRng> {
    rng: R,
    default_range: KillRange,
}

impl ChallengeGenerator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic generator, for tests and reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ChallengeGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            default_range: DEFAULT_KILL_RANGE,
        }
    }

    pub fn with_default_range(mut self, range: KillRange) -> Self {
        self.default_range = range;
        self
    }

    pub fn default_range(&self) -> KillRange {
        self.default_range
    }

    /// Draw a challenge from `eligible`.
    ///
    /// Repeated names count once, so the draw stays uniform over distinct
    /// bosses whatever the input order or duplication.
    pub fn generate(&mut self, eligible: &[Boss]) -> Result<Challenge, ChallengeError> {
        let candidates = distinct_by_name(eligible);
        let boss = candidates
            .choose(&mut self.rng)
            .ok_or(ChallengeError::NoEligibleBosses)?;

        let range = boss.kill_range().unwrap_or(self.default_range);
        let kills = self.rng.gen_range(range.min()..=range.max());

        Ok(Challenge {
            boss: boss.name.clone(),
            kills,
        })
    }
}

fn distinct_by_name(bosses: &[Boss]) -> Vec<&Boss> {
    let mut seen = HashSet::with_capacity(bosses.len());
    bosses
        .iter()
        .filter(|boss| seen.insert(boss.name.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashMap;

    fn names(names: &[&str]) -> Vec<Boss> {
        names.iter().map(|n| Boss::new(*n)).collect()
    }

    #[test]
    fn empty_set_fails() {
        let mut generator = ChallengeGenerator::seeded(1);
        assert!(matches!(
            generator.generate(&[]),
            Err(ChallengeError::NoEligibleBosses)
        ));
    }

    #[test]
    fn never_picks_outside_the_set() {
        let bosses = names(&["DragonA", "DragonB", "DragonC"]);
        let mut generator = ChallengeGenerator::seeded(7);
        for _ in 0..500 {
            let challenge = generator.generate(&bosses).unwrap();
            assert!(bosses.iter().any(|b| b.name == challenge.boss));
        }
    }

    #[test]
    fn default_range_applies_to_rangeless_bosses() {
        let bosses = names(&["DragonA"]);
        let mut generator = ChallengeGenerator::seeded(3);
        for _ in 0..500 {
            let challenge = generator.generate(&bosses).unwrap();
            assert!(DEFAULT_KILL_RANGE.contains(challenge.kills), "{challenge:?}");
        }
    }

    #[test]
    fn boss_range_overrides_default() {
        let range = KillRange::new(1, 3).unwrap();
        let bosses = vec![Boss::with_range("Chambers of Xeric", range)];
        let mut generator = ChallengeGenerator::seeded(11);
        let mut seen = HashSet::new();
        for _ in 0..300 {
            let challenge = generator.generate(&bosses).unwrap();
            assert!(range.contains(challenge.kills));
            seen.insert(challenge.kills);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn configured_default_range_is_used() {
        let range = KillRange::new(5, 5).unwrap();
        let mut generator = ChallengeGenerator::seeded(2).with_default_range(range);
        let challenge = generator.generate(&names(&["DragonA"])).unwrap();
        assert_eq!(challenge.kills, 5);
    }

    #[test]
    fn selection_is_roughly_uniform() {
        let bosses = names(&["A", "B", "C", "D"]);
        let mut generator = ChallengeGenerator::seeded(42);
        let draws = 8_000;
        let mut counts: HashMap<String, u32> = HashMap::new();
        for _ in 0..draws {
            *counts.entry(generator.generate(&bosses).unwrap().boss).or_default() += 1;
        }

        let expected = draws / bosses.len() as u32;
        for boss in &bosses {
            let count = counts.get(&boss.name).copied().unwrap_or(0);
            // 15% tolerance is far outside sampling noise at this size
            assert!(
                count.abs_diff(expected) < expected * 15 / 100,
                "{} drawn {count} times, expected about {expected}",
                boss.name
            );
        }
    }

    #[test]
    fn duplicates_do_not_bias_selection() {
        let mut bosses = names(&["A"; 9]);
        bosses.push(Boss::new("B"));
        let mut generator = ChallengeGenerator::seeded(5);
        let b_count = (0..4_000)
            .filter(|_| generator.generate(&bosses).unwrap().boss == "B")
            .count();
        assert!((1_600..2_400).contains(&b_count), "B drawn {b_count} times");
    }
}
