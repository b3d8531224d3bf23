pub mod event;
pub mod object;
pub mod region;

// re-export for cleaner imports
pub use self::event::Event;
pub use self::object::Object;
pub use self::region::{Placement, Region};
