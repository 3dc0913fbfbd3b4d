//! Die and zone model.
mod die;
mod loadout;
mod zone;

pub use die::{BlueprintId, Die, DieBlueprint, DieFlags, DieId, DieKind};
pub use loadout::{Loadout, LoadoutEntry};
pub use zone::{Board, Location, PlacementError, Zone, ZoneKind};
