//! Active enums mirroring the Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Mirrors the `movement_kind` Postgres enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "movement_kind")]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    /// Stock added (new lot received).
    #[sea_orm(string_value = "added")]
    Added,
    /// Stock removed through a sale.
    #[sea_orm(string_value = "removed")]
    Removed,
    /// Direct quantity override on a lot.
    #[sea_orm(string_value = "edited")]
    Edited,
}

impl From<stockfarm_core::movement::MovementKind> for MovementKind {
    fn from(kind: stockfarm_core::movement::MovementKind) -> Self {
        match kind {
            stockfarm_core::movement::MovementKind::Added => Self::Added,
            stockfarm_core::movement::MovementKind::Removed => Self::Removed,
            stockfarm_core::movement::MovementKind::Edited => Self::Edited,
        }
    }
}

impl From<MovementKind> for stockfarm_core::movement::MovementKind {
    fn from(kind: MovementKind) -> Self {
        match kind {
            MovementKind::Added => Self::Added,
            MovementKind::Removed => Self::Removed,
            MovementKind::Edited => Self::Edited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(stockfarm_core::movement::MovementKind::Added)]
    #[case(stockfarm_core::movement::MovementKind::Removed)]
    #[case(stockfarm_core::movement::MovementKind::Edited)]
    fn test_kind_roundtrip(#[case] kind: stockfarm_core::movement::MovementKind) {
        let db_kind: MovementKind = kind.into();
        let back: stockfarm_core::movement::MovementKind = db_kind.into();
        assert_eq!(back, kind);
    }
}
