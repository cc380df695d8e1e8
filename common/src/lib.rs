mod cursor;
mod error;
mod event;
mod participants;
mod projection;
mod structures;
mod timeline;

pub use cursor::*;
pub use error::*;
pub use event::*;
pub use participants::*;
pub use projection::*;
pub use structures::*;
pub use timeline::*;
