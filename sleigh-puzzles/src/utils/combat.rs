//! Two-army combat with deterministic targeting.
//!
//! A round is target selection, then attacks in initiative order, then
//! removal of destroyed groups. Ties are broken by effective power and
//! initiative, so a battle always plays out the same way.

use std::cmp::Reverse;
use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    ImmuneSystem,
    Infection,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::ImmuneSystem => f.write_str("Immune System"),
            Side::Infection => f.write_str("Infection"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub side: Side,
    pub units: u64,
    /// Per unit. A group with zero hit points loses every unit it is hit with.
    pub hit_points: u64,
    pub attack_damage: u64,
    pub attack_type: String,
    pub initiative: u32,
    pub weaknesses: Vec<String>,
    pub immunities: Vec<String>,
}

impl Group {
    pub fn effective_power(&self) -> u64 {
        self.units.saturating_mul(self.attack_damage)
    }

    /// Damage this group would deal to `defender` right now.
    pub fn damage_to(&self, defender: &Group) -> u64 {
        if defender.immunities.contains(&self.attack_type) {
            0
        } else if defender.weaknesses.contains(&self.attack_type) {
            self.effective_power().saturating_mul(2)
        } else {
            self.effective_power()
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CombatError {
    /// A round passed in which no unit died; the fight would never end.
    #[error("stalemate in round {round}")]
    Stalemate { round: usize },
    #[error("no groups to fight")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Victory {
    pub winner: Side,
    pub remaining_units: u64,
    pub rounds: usize,
}

#[derive(Debug, Clone)]
pub struct Battle {
    groups: Vec<Group>,
    rounds: usize,
}

impl Battle {
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups, rounds: 0 }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Raise the attack damage of every group on `side`.
    pub fn boost(&mut self, side: Side, amount: u64) {
        for group in self.groups.iter_mut().filter(|g| g.side == side) {
            group.attack_damage = group.attack_damage.saturating_add(amount);
        }
    }

    /// The side still standing once the other has no groups left.
    pub fn winner(&self) -> Option<Side> {
        let first = self.groups.first()?.side;
        self.groups.iter().all(|g| g.side == first).then_some(first)
    }

    /// Chosen defender for each group, indexed like [`Battle::groups`].
    ///
    /// Attackers choose in descending (effective power, initiative). Each
    /// takes the unclaimed enemy it would damage most, then the one with the
    /// highest effective power, then the highest initiative. A group that
    /// cannot damage any candidate chooses nothing.
    pub fn select_targets(&self) -> Vec<Option<usize>> {
        let mut order: Vec<usize> = (0..self.groups.len()).collect();
        order.sort_by_key(|&i| {
            let g = &self.groups[i];
            Reverse((g.effective_power(), g.initiative))
        });

        let mut claimed = vec![false; self.groups.len()];
        let mut targets = vec![None; self.groups.len()];

        for attacker in order {
            let a = &self.groups[attacker];
            let choice = self
                .groups
                .iter()
                .enumerate()
                .filter(|&(d, defender)| defender.side != a.side && !claimed[d])
                .map(|(d, defender)| {
                    let key = (a.damage_to(defender), defender.effective_power(), defender.initiative);
                    (key, d)
                })
                .filter(|&((damage, _, _), _)| damage > 0)
                .max_by_key(|&(key, _)| key);

            if let Some((_, defender)) = choice {
                claimed[defender] = true;
                targets[attacker] = Some(defender);
            }
        }
        targets
    }

    /// Play one round and return the number of units killed.
    pub fn round(&mut self) -> Result<u64, CombatError> {
        if self.groups.is_empty() {
            return Err(CombatError::Empty);
        }
        self.rounds += 1;
        let targets = self.select_targets();

        let mut order: Vec<usize> = (0..self.groups.len()).collect();
        order.sort_by_key(|&i| Reverse(self.groups[i].initiative));

        let mut killed = 0;
        for attacker in order {
            if self.groups[attacker].units == 0 {
                continue;
            }
            let Some(defender) = targets[attacker] else {
                continue;
            };
            let damage = self.groups[attacker].damage_to(&self.groups[defender]);
            let target = &mut self.groups[defender];
            let lost = damage
                .checked_div(target.hit_points)
                .map_or(target.units, |lost| lost.min(target.units));
            target.units -= lost;
            killed += lost;
        }

        self.groups.retain(|g| g.units > 0);

        if killed == 0 {
            return Err(CombatError::Stalemate { round: self.rounds });
        }
        Ok(killed)
    }

    /// Fight until one side is left.
    pub fn fight(mut self) -> Result<Victory, CombatError> {
        loop {
            if let Some(winner) = self.winner() {
                let remaining_units = self.groups.iter().map(|g| g.units).sum();
                debug!(%winner, remaining_units, rounds = self.rounds, "battle over");
                return Ok(Victory {
                    winner,
                    remaining_units,
                    rounds: self.rounds,
                });
            }
            self.round()?;
        }
    }
}

/// Smallest attack boost for `side` that wins the battle, trying
/// `0..=max_boost` in order. Stalemates count as not winning.
pub fn minimal_boost(battle: &Battle, side: Side, max_boost: u64) -> Option<(u64, Victory)> {
    for boost in 0..=max_boost {
        let mut trial = battle.clone();
        trial.boost(side, boost);
        match trial.fight() {
            Ok(victory) if victory.winner == side => {
                info!(boost, remaining_units = victory.remaining_units, "winning boost found");
                return Some((boost, victory));
            }
            Ok(_) => {}
            Err(err) => debug!(boost, %err, "no winner"),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(
        side: Side,
        units: u64,
        hit_points: u64,
        (attack_damage, attack_type): (u64, &str),
        initiative: u32,
        weaknesses: &[&str],
        immunities: &[&str],
    ) -> Group {
        Group {
            side,
            units,
            hit_points,
            attack_damage,
            attack_type: attack_type.to_string(),
            initiative,
            weaknesses: weaknesses.iter().map(|s| s.to_string()).collect(),
            immunities: immunities.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn sample() -> Battle {
        Battle::new(vec![
            group(Side::ImmuneSystem, 17, 5390, (4507, "fire"), 2, &["radiation", "bludgeoning"], &[]),
            group(Side::ImmuneSystem, 989, 1274, (25, "slashing"), 3, &["bludgeoning", "slashing"], &["fire"]),
            group(Side::Infection, 801, 4706, (116, "bludgeoning"), 1, &["radiation"], &[]),
            group(Side::Infection, 4485, 2961, (12, "slashing"), 4, &["fire", "cold"], &["radiation"]),
        ])
    }

    #[test]
    fn test_damage_modifiers() {
        let battle = sample();
        let g = battle.groups();
        // Infection group 1 (bludgeoning) against immune group 1, weak to bludgeoning
        assert_eq!(g[2].damage_to(&g[0]), 2 * 801 * 116);
        // Immune group 1 (fire) against infection group 2, weak to fire
        assert_eq!(g[0].damage_to(&g[3]), 2 * 17 * 4507);
        // Immune group 2 is weak to slashing
        assert_eq!(g[3].damage_to(&g[1]), 2 * 4485 * 12);
        // Slashing against infection group 2 has no modifier
        assert_eq!(g[1].damage_to(&g[3]), 989 * 25);
        // Fire against immune group 2 is blocked
        assert_eq!(g[0].damage_to(&g[1]), 0);
    }

    #[test]
    fn test_first_round_targets() {
        let targets = sample().select_targets();
        assert_eq!(targets, vec![Some(3), Some(2), Some(0), Some(1)]);
    }

    #[test]
    fn test_sample_battle() {
        let mut battle = sample();
        battle.round().unwrap();
        let units: Vec<_> = battle.groups().iter().map(|g| (g.side, g.units)).collect();
        assert_eq!(
            units,
            vec![(Side::ImmuneSystem, 905), (Side::Infection, 797), (Side::Infection, 4434)]
        );

        let victory = sample().fight().unwrap();
        assert_eq!(victory.winner, Side::Infection);
        assert_eq!(victory.remaining_units, 782 + 4434);
    }

    #[test]
    fn test_boosted_sample() {
        let mut battle = sample();
        battle.boost(Side::ImmuneSystem, 1570);
        let victory = battle.fight().unwrap();
        assert_eq!(victory.winner, Side::ImmuneSystem);
        assert_eq!(victory.remaining_units, 51);
    }

    #[test]
    fn test_minimal_boost_on_sample() {
        let (boost, victory) = minimal_boost(&sample(), Side::ImmuneSystem, 2000).unwrap();
        assert_eq!(boost, 1570);
        assert_eq!(victory.remaining_units, 51);
        assert!(minimal_boost(&sample(), Side::ImmuneSystem, 100).is_none());
    }

    #[test]
    fn test_stalemate_is_an_error() {
        // Each side is immune to the other's only attack type
        let battle = Battle::new(vec![
            group(Side::ImmuneSystem, 10, 10, (5, "fire"), 1, &[], &["cold"]),
            group(Side::Infection, 10, 10, (5, "cold"), 2, &[], &["fire"]),
        ]);
        assert_eq!(battle.fight(), Err(CombatError::Stalemate { round: 1 }));
    }

    #[test]
    fn test_chip_damage_stalemate() {
        // Damage lands but never enough to kill a unit
        let battle = Battle::new(vec![
            group(Side::ImmuneSystem, 1, 100, (1, "fire"), 1, &[], &[]),
            group(Side::Infection, 1, 100, (1, "cold"), 2, &[], &[]),
        ]);
        assert!(matches!(battle.fight(), Err(CombatError::Stalemate { .. })));
    }

    #[test]
    fn test_equal_power_attackers_choose_by_initiative() {
        // Both immune groups have effective power 100 and both prefer the
        // fire-weak group; the one with initiative 7 claims it first.
        let battle = Battle::new(vec![
            group(Side::ImmuneSystem, 10, 50, (10, "fire"), 5, &[], &[]),
            group(Side::ImmuneSystem, 20, 50, (5, "fire"), 7, &[], &[]),
            group(Side::Infection, 10, 50, (1, "cold"), 1, &["fire"], &[]),
            group(Side::Infection, 10, 50, (1, "cold"), 2, &[], &[]),
        ]);
        let targets = battle.select_targets();
        assert_eq!(targets[1], Some(2));
        assert_eq!(targets[0], Some(3));
    }

    #[test]
    fn test_equal_damage_prefers_power_then_initiative() {
        let attacker = group(Side::ImmuneSystem, 1, 50, (10, "fire"), 9, &[], &[]);

        let by_power = Battle::new(vec![
            attacker.clone(),
            group(Side::Infection, 5, 50, (2, "cold"), 3, &[], &[]),
            group(Side::Infection, 5, 50, (4, "cold"), 1, &[], &[]),
        ]);
        assert_eq!(by_power.select_targets()[0], Some(2));

        let by_initiative = Battle::new(vec![
            attacker,
            group(Side::Infection, 5, 50, (4, "cold"), 3, &[], &[]),
            group(Side::Infection, 5, 50, (4, "cold"), 1, &[], &[]),
        ]);
        assert_eq!(by_initiative.select_targets()[0], Some(1));
    }

    #[test]
    fn test_zero_hit_point_group_is_wiped_out() {
        let mut battle = Battle::new(vec![
            group(Side::ImmuneSystem, 3, 10, (1, "fire"), 2, &[], &[]),
            group(Side::Infection, 40, 0, (1, "cold"), 1, &[], &["cold"]),
        ]);
        assert_eq!(battle.round(), Ok(40));
        assert_eq!(battle.winner(), Some(Side::ImmuneSystem));
    }
}
