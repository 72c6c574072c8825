pub mod controller;
pub mod loop_worker;
pub mod poller;

pub use controller::WatchController;
pub use poller::{CycleOutcome, PollState, UpdatePoller};
