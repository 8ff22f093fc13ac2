//! Oracle access errors.

use crate::error::{CombatError, ErrorSeverity};
use crate::state::{ActorId, Position};

/// Errors that occur when a caller asks for data that is not there.
///
/// The tick itself never raises these; it skips the offending record instead.
/// They surface from explicit lookups made by the runtime or by tests.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// Archetype id is not present in the catalog.
    #[error("archetype '{0}' not found")]
    ArchetypeNotFound(String),

    /// Actor id does not address a slot in the arena.
    #[error("actor {0} not found")]
    ActorNotFound(ActorId),

    /// Position is outside the map bounds.
    #[error("position {0:?} is out of map bounds")]
    PositionOutOfBounds(Position),
}

impl CombatError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            OracleError::ArchetypeNotFound(_) | OracleError::PositionOutOfBounds(_) => {
                ErrorSeverity::Validation
            }
            OracleError::ActorNotFound(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::ArchetypeNotFound(_) => "ORACLE_ARCHETYPE_NOT_FOUND",
            OracleError::ActorNotFound(_) => "ORACLE_ACTOR_NOT_FOUND",
            OracleError::PositionOutOfBounds(_) => "ORACLE_POSITION_OUT_OF_BOUNDS",
        }
    }
}
