//! Game engine: turn state machine, session lifecycle and presentation seam.
//!
//! - `turn`: [`TurnEngine`], a pure transition function from
//!   `(state, input)` to a list of [`Effect`]s
//! - `session`: [`Session`], which applies those effects against the
//!   scheduler and the [`Presenter`]
//! - `event`: the [`GameEvent`] stream
//! - `presenter`: hooks a view implements
//! - `messages`: status and game-over text

mod event;
mod messages;
mod presenter;
mod session;
mod turn;

pub use event::GameEvent;
pub use messages::{rolled, won, WINNER_TITLE};
pub use presenter::{HeadlessPresenter, Presenter};
pub use session::{Session, SessionTask};
pub use turn::{Effect, Effects, TurnEngine, TurnTask};
