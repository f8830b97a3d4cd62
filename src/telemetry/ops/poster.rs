use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Poster;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Validate, Fetch, Extract }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Validate => "validate",
        Phase::Fetch => "fetch",
        Phase::Extract => "extract",
    }}
    fn span(&self) -> Span { match self {
        Phase::Validate => info_span!("validate"),
        Phase::Fetch => info_span!("fetch"),
        Phase::Extract => info_span!("extract"),
    }}
}

impl OpMarker for Poster {
    const NAME: &'static str = "poster";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("poster") }
}
