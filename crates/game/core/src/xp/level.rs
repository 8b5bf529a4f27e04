/// Maps accumulated XP to a level.
///
/// `level(xp) = 1 + isqrt(xp / xp_per_level_unit)`, so level `n` starts at
/// `xp_per_level_unit * (n - 1)^2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelCurve {
    pub xp_per_level_unit: u64,
}

impl LevelCurve {
    pub const DEFAULT_XP_PER_LEVEL_UNIT: u64 = 100;

    pub fn level(&self, total_xp: u64) -> u32 {
        let units = total_xp / self.xp_per_level_unit.max(1);
        u32::try_from(units.isqrt())
            .unwrap_or(u32::MAX - 1)
            .saturating_add(1)
    }

    /// First XP total belonging to `level`.
    pub fn level_start(&self, level: u32) -> u64 {
        let steps = u64::from(level.saturating_sub(1));
        self.xp_per_level_unit
            .max(1)
            .saturating_mul(steps.saturating_mul(steps))
    }

    /// XP still missing to reach the next level.
    pub fn xp_to_next_level(&self, total_xp: u64) -> u64 {
        let next = self.level(total_xp).saturating_add(1);
        self.level_start(next).saturating_sub(total_xp)
    }

    pub fn is_new_level(&self, current_total_xp: u64, delta_xp: u64) -> bool {
        self.level(current_total_xp) != self.level(current_total_xp.saturating_add(delta_xp))
    }
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self {
            xp_per_level_unit: Self::DEFAULT_XP_PER_LEVEL_UNIT,
        }
    }
}
