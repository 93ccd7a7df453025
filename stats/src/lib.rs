//! openstats - An in-process statistics registry.
//!
//! openstats tracks named statistics inside a single process. A statistic is
//! either a value, replaced wholesale on every update, or a counter, moved by
//! relative increments. Statistics are registered once under a unique name
//! and read back individually or as a point-in-time snapshot.
//!
//! # Architecture
//!
//! [`StatsRegistry`] is a thin access layer over a pluggable storage backend.
//! The backend owns all statistic state and provides the atomicity guarantees;
//! the registry validates nothing itself and simply translates backend
//! outcomes into its public error type. The backend is resolved exactly once,
//! when the registry is opened, and bound for its lifetime.
//!
//! # Key Concepts
//!
//! * **StatsRegistry**: The main entry point for registering, mutating, and
//!   reading statistics.
//! * **StatKind**: Whether a statistic is a value or a counter. The kind is
//!   fixed at registration.
//! * **StatValue**: The payload of a statistic. Counters always read back as
//!   integers; value statistics hold whatever payload was last stored.
//!
//! # Example
//!
//! ```ignore
//! use openstats::{Config, StatKind, StatsRegistry};
//!
//! let stats = StatsRegistry::open(Config::default()).await?;
//!
//! stats.register("requests", StatKind::Counter).await?;
//! stats.increment("requests").await?;
//! stats.increment_by("requests", 10).await?;
//!
//! stats.register("build", StatKind::Value).await?;
//! stats.update("build", "1.4.2").await?;
//!
//! for entry in stats.get_all().await? {
//!     println!("{}: {}", entry.name, entry.value);
//! }
//! ```

mod config;
mod error;
mod registry;

pub use common::{ShardedStorageConfig, StatEntry, StatKind, StatValue, Storage, StorageConfig};
pub use config::{Config, StatDecl};
pub use error::{Error, Result};
pub use registry::StatsRegistry;
