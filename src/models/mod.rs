// Model exports
pub mod domain;
pub mod round;

pub use domain::{Frequency, Person, PersonId};
pub use round::{Pair, RoundResult};
