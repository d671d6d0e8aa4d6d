//! Display-side core: who owns the match state for a session, how inbound
//! controller fields become labels, and the event loop that drives both.

pub mod event_loop;
pub mod menu;
pub mod projection;
pub mod session;
pub mod sync;
pub mod transport;

pub use event_loop::{run_session, select_mode, SessionExit};
pub use projection::{ClockFormat, DisplayProjection, Renderer, ScoreboardLabels};
pub use session::{Button, Mode, Session, SessionControl, SessionEvent};
pub use sync::{ActionSink, ChannelActionSink, FeedMirror, FieldUpdate};
pub use transport::{ControllerLink, LinkError};
