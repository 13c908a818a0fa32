pub mod lookup;
pub mod parse;
