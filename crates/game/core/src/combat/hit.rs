//! To-hit odds and the hit check.

/// Inputs to the to-hit formula, gathered from attacker, defender and weapon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HitFactors {
    pub attacker_agility: i32,
    pub attacker_speed: i32,
    pub defender_agility: i32,
    pub defender_speed: i32,
    pub attack_odds: i32,
    /// Worn-armor penalty of the attacker after expertise.
    pub armor_factor: i32,
    pub defense_bonus: i32,
    /// Player's ability with the readied weapon's type; `None` for monsters
    /// and for unarmed attacks.
    pub weapon_ability: Option<i32>,
    /// Odds bonus of the readied weapon, 0 when there is none.
    pub weapon_odds: i32,
}

impl HitFactors {
    /// Highest effective agility counted.
    pub const AGILITY_CAP: i32 = 30;
    pub const ABILITY_CAP: i32 = 100;
    pub const WEAPON_ODDS_CAP: i32 = 30;
}

/// Percent chance to hit.
///
/// # Formula
///
/// ```text
/// odds = 2 * (min(att_ag * att_speed, 30) - min(def_ag * def_speed, 30))
///      + attack_odds - armor_factor - defense_bonus
///      + min(weapon_ability, 100)      (player only)
///      + min(weapon_odds, 30)
/// ```
///
/// Every term is capped on its own before it is added.
pub fn to_hit_odds(factors: &HitFactors) -> i32 {
    let attacker = (factors.attacker_agility * factors.attacker_speed).min(HitFactors::AGILITY_CAP);
    let defender = (factors.defender_agility * factors.defender_speed).min(HitFactors::AGILITY_CAP);
    let mut odds = 2 * (attacker - defender) + factors.attack_odds
        - factors.armor_factor
        - factors.defense_bonus;
    if let Some(ability) = factors.weapon_ability {
        odds += ability.min(HitFactors::ABILITY_CAP);
    }
    odds + factors.weapon_odds.min(HitFactors::WEAPON_ODDS_CAP)
}

/// Rolls of this or less are critical hits while criticals are enabled.
pub const CRITICAL_THRESHOLD: i32 = 5;

/// Rolls of this or more, on a miss with a real weapon, are fumbles.
pub const FUMBLE_THRESHOLD: i32 = 97;

/// How a 1d100 attack roll went.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitCheck {
    Critical,
    Hit,
    Miss,
    Fumble,
}

/// Classifies an attack roll.
///
/// A roll at or under `odds` hits. A roll of 5 or less is critical even
/// against hopeless odds, unless criticals are disabled.
pub fn check_hit(roll: i32, odds: i32, criticals: bool, armed: bool) -> HitCheck {
    let critical = criticals && roll <= CRITICAL_THRESHOLD;
    if critical {
        HitCheck::Critical
    } else if roll <= odds {
        HitCheck::Hit
    } else if armed && roll >= FUMBLE_THRESHOLD {
        HitCheck::Fumble
    } else {
        HitCheck::Miss
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_adds_capped_terms() {
        let factors = HitFactors {
            attacker_agility: 15,
            attacker_speed: 1,
            defender_agility: 10,
            defender_speed: 1,
            attack_odds: 20,
            armor_factor: 0,
            defense_bonus: 0,
            weapon_ability: Some(50),
            weapon_odds: 10,
        };
        assert_eq!(to_hit_odds(&factors), 90);
    }

    #[test]
    fn each_term_is_capped_separately() {
        let factors = HitFactors {
            attacker_agility: 20,
            attacker_speed: 2,
            defender_agility: 5,
            defender_speed: 1,
            weapon_ability: Some(140),
            weapon_odds: 45,
            ..HitFactors::default()
        };
        // 2 * (30 - 5) + 100 + 30
        assert_eq!(to_hit_odds(&factors), 180);
    }

    #[test]
    fn low_rolls_are_critical_only_when_enabled() {
        assert_eq!(check_hit(3, 1, true, true), HitCheck::Critical);
        assert_eq!(check_hit(3, 0, false, true), HitCheck::Miss);
        assert_eq!(check_hit(3, 10, false, true), HitCheck::Hit);
    }

    #[test]
    fn high_misses_fumble_only_with_a_weapon() {
        assert_eq!(check_hit(98, 50, true, true), HitCheck::Fumble);
        assert_eq!(check_hit(98, 50, true, false), HitCheck::Miss);
        assert_eq!(check_hit(96, 50, true, true), HitCheck::Miss);
        assert_eq!(check_hit(98, 99, true, true), HitCheck::Hit);
    }
}
