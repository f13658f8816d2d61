pub mod code;
pub mod keying;

pub use code::{CharClass, MatchState, Symbol};
