//! Weight-and-balance configuration document model.
//!
//! # Data Flow
//! ```text
//! defaults.rs (baseline construction)        codec (imported JSON)
//!         │                                         │
//!         └──────────────▶ Root ◀───────────────────┘
//!                           │
//!                           ├─▶ session (typed edits, renumber.rs)
//!                           ├─▶ validation (structural + semantic checks)
//!                           └─▶ codec (export)
//! ```
//!
//! # Design Decisions
//! - One typed tree, owned by the caller; no entity is shared across variations
//! - Interchange key names are the camelCase field names, fixed by serde renames
//! - Optional fields are `Option` and omitted on export when absent
//! - Lookup tables are row sequences; the legacy single-row shape is still read

pub mod defaults;
pub mod primitives;
pub mod renumber;
pub mod schema;

pub use defaults::{make_default_variation, new_root};
pub use primitives::{CabinType, DigitalSignature, HighlightedResult, MassUnit, Point, Range};
pub use renumber::{renumber, renumber_in_place, Identified};
pub use schema::{
    Aircraft, Bag, BagWeightPolicy, Cabin, CabinSection, CombinedLimit, Configuration,
    ConfigurationGroup, Envelope, EnvelopeType, Fuel, General, Hold, HoldConfiguration, Lines,
    ManualRange, Passenger, PaxWeightPolicy, Records, Root, StructuralMtow, Table, Variation,
    WeightPolicy,
};
