//! Content-addressed session identity
//!
//! A session ties a sequence of interactions to one piece of submitted
//! audio. Instead of a client-supplied identifier, the registry derives
//! identity from the content itself: same bytes, same session, for the life
//! of the server process.

mod registry;

pub use registry::{fingerprint, SessionRegistry};
