pub mod config;
pub mod ctx;
pub mod ops;

use ctx::LogCtx;

pub fn lookup() -> LogCtx<ops::lookup::Lookup> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn parse() -> LogCtx<ops::parse::Parse> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
