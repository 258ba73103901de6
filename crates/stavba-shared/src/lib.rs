//! # stavba-shared
//!
//! Vocabulary shared by the store and the client: storage keys and domain
//! constants, roles and themes, the clock abstraction and the HVAC
//! calculators.

pub mod calc;
pub mod clock;
pub mod constants;
pub mod error;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CalcError, ParseError};
pub use types::{Coordinate, Role, Theme, UserId};
