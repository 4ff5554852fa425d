//! Combat outcome prediction boundary

use crate::core::{Piece, Terrain, TimeOfDay};

/// Probability distribution over a unit's hitpoints after a fight, indexed
/// by hitpoint value. Index 0 is death.
#[derive(Debug, Clone, PartialEq)]
pub struct HpDist(pub Vec<f32>);

impl HpDist {
    /// All mass on a single hitpoint value
    pub fn certain(hp: i32) -> Self {
        let mut probs = vec![0.0; hp as usize + 1];
        probs[hp as usize] = 1.0;
        Self(probs)
    }

    pub fn expected(&self) -> f32 {
        self.0
            .iter()
            .enumerate()
            .map(|(hp, p)| hp as f32 * p)
            .sum()
    }

    pub fn chance_of_death(&self) -> f32 {
        self.0.first().copied().unwrap_or(0.0)
    }
}

/// Result of predicting one attack: both post-fight distributions and the
/// weapon the attacker should use.
#[derive(Debug, Clone)]
pub struct CombatOutcome {
    pub attacker_hp: HpDist,
    pub defender_hp: HpDist,
    pub weapon: usize,
}

/// External combat predictor. `defender_prior`, when present, is the
/// defender's distribution left by the previous attacker in the same plan;
/// the model folds its attack into that state rather than the on-board
/// hitpoints.
pub trait CombatModel {
    fn best_weapon_and_outcome(
        &self,
        attacker: &Piece,
        defender: &Piece,
        defender_prior: Option<&HpDist>,
        attacker_terrain: Terrain,
        defender_terrain: Terrain,
        time: TimeOfDay,
    ) -> CombatOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certain_distribution() {
        let dist = HpDist::certain(3);
        assert_eq!(dist.expected(), 3.0);
        assert_eq!(dist.chance_of_death(), 0.0);
    }

    #[test]
    fn test_expected_and_death_mass() {
        let dist = HpDist(vec![0.25, 0.0, 0.5, 0.25]);
        assert_eq!(dist.chance_of_death(), 0.25);
        assert!((dist.expected() - 1.75).abs() < 1e-6);
    }
}
