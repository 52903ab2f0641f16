//! Units and the static data they are built from

pub mod catalog;
pub mod template;
pub mod unit;

pub use catalog::TemplateCatalog;
pub use template::{RangedProfile, UnitTemplate, WeaponSet};
pub use unit::Unit;
