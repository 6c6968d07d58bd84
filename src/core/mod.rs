//! Route recovery and reconciliation.
//!
//! ## Pipeline
//!
//! 1. `scanner`: recover declared paths from page files
//! 2. `inventory`: read lazily imported routes from the router source
//! 3. `registry`: merge both and resolve duplicate paths
//! 4. `serializer`: flat record format consumed by the generators
//!
//! `context` wires the stages to configuration and the file system.

pub mod context;
pub mod inventory;
pub mod registry;
pub mod scanner;
pub mod serializer;

pub use context::{RouteScan, RunContext};
pub use inventory::{ExistingRouteSet, InventoryEntry, InventoryReader};
pub use registry::{
    Claimant, DuplicatePolicy, DuplicateReport, ExclusionReason, LargestSourceWins, PathMismatch,
    RegistryBuild, RegistryBuilder, RouteEntry, RouteRegistry, RouteSource,
};
pub use scanner::{PageRecord, PageScanner, ScanWarning, Strategy};
pub use serializer::{DelimiterCollision, Serialized};
