use super::{XpConfig, XpError};

/// Persisted progression of one user.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserProfile {
    pub uid: String,
    pub total_xp: u64,
    pub diamonds: i64,
}

impl UserProfile {
    /// A fresh profile holding the configured starting diamonds.
    pub fn new(uid: impl Into<String>, config: &XpConfig) -> Self {
        Self {
            uid: uid.into(),
            total_xp: 0,
            diamonds: config.initial_diamonds,
        }
    }

    pub fn level(&self, config: &XpConfig) -> u32 {
        config.level.level(self.total_xp)
    }

    /// The profile after `award` has been applied.
    ///
    /// Callers persist the returned value; the engine never writes it back.
    pub fn with_award(&self, award: &XpAward) -> Self {
        Self {
            uid: self.uid.clone(),
            total_xp: award.new_total_xp,
            diamonds: self.diamonds.saturating_add(award.diamonds_reward),
        }
    }
}

/// Decision returned by [`award_xp`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct XpAward {
    pub earned_xp: u64,
    pub previous_total_xp: u64,
    pub new_total_xp: u64,
    pub previous_level: u32,
    pub new_level: u32,
    pub leveled_up: bool,
    /// Diamonds the caller should add; zero unless a level was gained.
    pub diamonds_reward: i64,
}

/// Computes the effect of `delta_xp` on a profile without mutating it.
///
/// Fails with [`XpError::ProfileNotFound`] when no profile could be resolved.
pub fn award_xp(
    profile: Option<&UserProfile>,
    delta_xp: u64,
    config: &XpConfig,
) -> Result<XpAward, XpError> {
    let profile = profile.ok_or(XpError::ProfileNotFound)?;

    let previous_total_xp = profile.total_xp;
    let new_total_xp = previous_total_xp.saturating_add(delta_xp);
    let previous_level = config.level.level(previous_total_xp);
    let new_level = config.level.level(new_total_xp);
    let leveled_up = config.level.is_new_level(previous_total_xp, delta_xp);

    Ok(XpAward {
        earned_xp: delta_xp,
        previous_total_xp,
        new_total_xp,
        previous_level,
        new_level,
        leveled_up,
        diamonds_reward: if leveled_up {
            config.new_level_diamonds
        } else {
            0
        },
    })
}
