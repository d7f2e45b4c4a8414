//! Playback configuration, validation, and error types.

use std::error::Error;
use std::fmt;

use glam::Mat4;

use ember_core::StructureError;
use ember_pool::{PoolConfig, PoolError};

/// Errors from [`Playback::new`](crate::Playback::new).
#[derive(Clone, Debug, PartialEq)]
pub enum PlayError {
    /// A [`PlaybackConfig`] invariant was violated.
    InvalidConfig {
        /// Description of the violated invariant.
        reason: String,
    },
    /// The effect definition and the live container tree diverged
    /// during construction. Indicates a construction-time bug, not a
    /// runtime input error; nothing is partially built.
    Structure(StructureError),
    /// The instance pool could not be created.
    Pool(PoolError),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => write!(f, "invalid playback config: {reason}"),
            Self::Structure(e) => write!(f, "structure: {e}"),
            Self::Pool(e) => write!(f, "pool: {e}"),
        }
    }
}

impl Error for PlayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Structure(e) => Some(e),
            Self::Pool(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StructureError> for PlayError {
    fn from(e: StructureError) -> Self {
        Self::Structure(e)
    }
}

impl From<PoolError> for PlayError {
    fn from(e: PoolError) -> Self {
        Self::Pool(e)
    }
}

/// Complete configuration for one playback.
///
/// Validated by [`Playback::new`](crate::Playback::new); immutable
/// afterwards.
#[derive(Clone, Copy, Debug)]
pub struct PlaybackConfig {
    /// Seed for the playback's deterministic random stream.
    pub seed: u64,
    /// Hard cap on simultaneously live instances across the whole tree.
    /// Spawns past the ceiling are dropped silently. Default: 4096.
    pub instance_ceiling: u32,
    /// Instance pool sizing.
    pub pool: PoolConfig,
    /// World transform of the effect root.
    pub transform: Mat4,
}

impl PlaybackConfig {
    /// Default live-instance ceiling.
    pub const DEFAULT_INSTANCE_CEILING: u32 = 4096;

    /// A config with the given seed and defaults everywhere else.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Validate all invariants.
    pub fn validate(&self) -> Result<(), PlayError> {
        if self.instance_ceiling == 0 {
            return Err(PlayError::InvalidConfig {
                reason: "instance_ceiling must be at least 1".to_string(),
            });
        }
        if !self.transform.is_finite() {
            return Err(PlayError::InvalidConfig {
                reason: "transform must be finite".to_string(),
            });
        }
        self.pool.validate()?;
        Ok(())
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            instance_ceiling: Self::DEFAULT_INSTANCE_CEILING,
            pool: PoolConfig::default(),
            transform: Mat4::IDENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(PlaybackConfig::default().validate().is_ok());
        assert_eq!(PlaybackConfig::seeded(9).seed, 9);
    }

    #[test]
    fn zero_ceiling_rejected() {
        let config = PlaybackConfig {
            instance_ceiling: 0,
            ..PlaybackConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PlayError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn non_finite_transform_rejected() {
        let config = PlaybackConfig {
            transform: Mat4::from_translation(glam::Vec3::splat(f32::NAN)),
            ..PlaybackConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PlayError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn pool_errors_convert() {
        let config = PlaybackConfig {
            pool: PoolConfig {
                chunk_capacity: 0,
                max_chunks: 1,
            },
            ..PlaybackConfig::default()
        };
        assert!(matches!(config.validate(), Err(PlayError::Pool(_))));
    }
}
