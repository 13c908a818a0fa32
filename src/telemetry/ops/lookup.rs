use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Lookup;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Fetch, Classify, Extract, Render }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Fetch => "fetch",
        Phase::Classify => "classify",
        Phase::Extract => "extract",
        Phase::Render => "render",
    }}
    fn span(&self) -> Span { match self {
        Phase::Fetch => info_span!("fetch"),
        Phase::Classify => info_span!("classify"),
        Phase::Extract => info_span!("extract"),
        Phase::Render => info_span!("render"),
    }}
}

impl OpMarker for Lookup {
    const NAME: &'static str = "lookup";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("lookup") }
}
