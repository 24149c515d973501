//! Game-balance constants and their runtime grouping.

/// Bonus for each primary residence left dry.
pub const RESIDENCE_BONUS: i32 = 3;
/// Bonus for each critical facility left dry.
pub const CRITICAL_FACILITY_BONUS: i32 = 10;
/// Penalty for each hazard facility that floods.
pub const HAZARD_PENALTY: i32 = 5;
/// Extra penalty per residence orthogonally adjacent to a flooded hazard.
pub const HAZARD_EXPOSURE_PENALTY: i32 = 1;

/// Score weights applied after a flood. `Default` uses the constants above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreWeights {
    pub residence_bonus: i32,
    pub critical_facility_bonus: i32,
    pub hazard_penalty: i32,
    pub hazard_exposure_penalty: i32,
}

impl ScoreWeights {
    pub const STANDARD: ScoreWeights = ScoreWeights {
        residence_bonus: RESIDENCE_BONUS,
        critical_facility_bonus: CRITICAL_FACILITY_BONUS,
        hazard_penalty: HAZARD_PENALTY,
        hazard_exposure_penalty: HAZARD_EXPOSURE_PENALTY,
    };
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}
