// ── Entity kinds ──
//
// One variant per cached collection. Each kind owns a backend resource
// path, a snapshot key, and the nouns used in failure messages.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A distinct cached collection with its own repository instance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EntityKind {
    Product,
    Category,
    Admin,
    Stat,
}

impl EntityKind {
    /// Backend resource path, relative to the API root.
    pub fn resource(self) -> &'static str {
        match self {
            Self::Product => "products",
            Self::Category => "categories",
            Self::Admin => "admins",
            Self::Stat => "stats",
        }
    }

    /// Key under which the persisted snapshot is stored.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Product => "cached_products",
            Self::Category => "cached_categories",
            Self::Admin => "cached_admins",
            Self::Stat => "cached_stats",
        }
    }

    /// Noun for a single record, as used in mutation failure messages.
    pub fn singular(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Category => "category",
            Self::Admin => "admin",
            Self::Stat => "statistics",
        }
    }

    /// Noun for the whole collection, as used in load failure messages.
    pub fn plural(self) -> &'static str {
        match self {
            Self::Product => "products",
            Self::Category => "categories",
            Self::Admin => "admins",
            Self::Stat => "statistics",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn storage_keys_are_partitioned_per_kind() {
        let keys: HashSet<_> = EntityKind::iter().map(EntityKind::storage_key).collect();
        assert_eq!(keys.len(), 4);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Product".parse::<EntityKind>().unwrap(), EntityKind::Product);
        assert_eq!("stat".parse::<EntityKind>().unwrap(), EntityKind::Stat);
        assert!("orders".parse::<EntityKind>().is_err());
    }

    #[test]
    fn stat_nouns_read_as_statistics() {
        assert_eq!(EntityKind::Stat.plural(), "statistics");
        assert_eq!(EntityKind::Category.plural(), "categories");
    }
}
