pub mod address_map;
pub mod consolidate;
pub mod ledger;
pub mod matcher;
pub mod settings;
#[allow(clippy::module_inception)]
pub mod spend;
pub mod summary;

pub use address_map::*;
pub use consolidate::*;
pub use ledger::*;
pub use matcher::*;
pub use settings::*;
pub use spend::*;
pub use summary::*;
