// Shared domain types, used by both the engine layer and the UI layer.
// Neither layer depends on the other; both import from this module.

pub mod envelope;
pub mod snapshot;

pub use envelope::*;
pub use snapshot::*;
