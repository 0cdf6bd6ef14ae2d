//! Link abstraction for the serial connection to the bridge board.
//!
//! The session code only ever talks to a [`SerialPortAdapter`], so the real
//! hardware port and the scripted mock are interchangeable.

pub mod error;
pub mod mock;
pub mod sync_port;
pub mod traits;

pub use error::PortError;
pub use mock::MockSerialPort;
pub use sync_port::*;
pub use traits::*;
