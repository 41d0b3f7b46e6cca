//! Timed sequencing.
//!
//! Every timed phase of a turn (roll delay, per-step delay, feature pause,
//! slide, hand-off, reset cooldown) is a task in one [`Scheduler`]. Nothing
//! blocks and nothing runs in parallel: the owner advances a virtual clock
//! and each task runs to completion before the next one is popped.
//!
//! ## Example Usage
//!
//! ```
//! use snakes_ladders::schedule::Scheduler;
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.schedule(400, "step");
//! scheduler.schedule(300, "roll");
//!
//! assert_eq!(scheduler.pop_due(1000), Some("roll"));
//! assert_eq!(scheduler.now(), 300);
//!
//! // Tearing the session down drops whatever is left.
//! assert_eq!(scheduler.cancel_all(), 1);
//! assert_eq!(scheduler.pop_due(1000), None);
//! ```

mod queue;

pub use queue::{Scheduler, TaskId};
