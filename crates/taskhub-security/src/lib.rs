//! # TaskHub Security
//! 
//! Security primitives: password hashing, the session authority and its
//! background sweeper.

pub mod clock;
pub mod password;
pub mod session;
pub mod sweeper;

pub use clock::{Clock, ManualClock, SystemClock};
pub use password::PasswordService;
pub use session::{SessionAuthority, SessionError};
pub use sweeper::{SessionSweeper, SweeperHandle};
