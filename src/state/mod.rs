pub mod entries;
pub mod mode;
pub mod navigation;
pub mod selection;

pub use entries::{EntryState, LoadTicket};
pub use mode::SelectionMode;
pub use navigation::NavigationState;
pub use selection::SelectionSet;
