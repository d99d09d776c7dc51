pub mod clock;
pub mod debounce;
pub mod search_state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use debounce::Debouncer;
pub use search_state::SearchStateController;
