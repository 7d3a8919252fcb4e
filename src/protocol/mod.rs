pub mod frame;
pub mod messages;

pub use frame::{receive_message, send_message, FrameError, MAX_FRAME_SIZE};
pub use messages::{Mode, Request, Response, Status};
