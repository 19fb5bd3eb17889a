pub mod drag;
pub mod profile;
pub mod selection;
pub mod wallet;

pub use drag::{DragState, Pointer};
pub use profile::UserProfile;
pub use selection::SelectionSet;
pub use wallet::Wallet;
