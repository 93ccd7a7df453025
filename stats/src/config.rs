//! Configuration options for the statistics registry.

use common::{StatKind, StorageConfig};
use serde::{Deserialize, Serialize};

/// Configuration for opening a [`StatsRegistry`](crate::StatsRegistry).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Storage backend configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Statistics to register when the registry opens.
    ///
    /// Re-declaring an already registered name is a no-op per the register
    /// contract, so declarations may overlap freely.
    #[serde(default)]
    pub statistics: Vec<StatDecl>,
}

/// A statistic declared up front in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDecl {
    /// Statistic name, unique across the registry.
    pub name: String,

    /// Statistic kind, fixed at registration.
    pub kind: StatKind,
}
