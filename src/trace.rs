//! Typed trace observer for coding diagnostics.
//!
//! Encoders and decoders emit structured [`TraceEvent`]s at well-defined
//! points (symbol assignment, payload emission, pivot insertion, feedback
//! handling). Rendering events to text or stdout is left to external
//! collaborators; the engine never formats strings on the hot path and
//! tracing never affects coding state.

/// A structured trace event with a stable zone name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TraceEvent {
    /// A source symbol was assigned to an encoder slot.
    SymbolAssigned {
        /// Slot index of the assigned symbol.
        index: usize,
    },
    /// An encoder emitted a systematic (uncoded) payload.
    SystematicPayload {
        /// Index of the symbol sent uncoded.
        index: usize,
    },
    /// An encoder or recoder emitted a coded payload.
    CodedPayload {
        /// Number of non-zero coefficients in the encoding vector.
        density: usize,
    },
    /// A decoder inserted a new pivot row.
    PivotInserted {
        /// Pivot column of the new row.
        pivot: usize,
        /// Decoder rank after insertion.
        rank: usize,
    },
    /// A received payload reduced to the zero vector and was discarded.
    RedundantPayload,
    /// Decoding completed: the matrix reached full rank.
    DecodingComplete,
    /// A decoder emitted a feedback message.
    FeedbackWritten {
        /// Number of slots reported as resolved.
        resolved: usize,
    },
    /// An encoder applied a feedback message to its window.
    FeedbackApplied {
        /// Slots excluded from future encoding-vector draws.
        excluded: usize,
        /// Lowest slot index still in play after applying the feedback.
        window_start: usize,
    },
}

impl TraceEvent {
    /// The zone this event belongs to, for callback-side filtering.
    pub fn zone(&self) -> &'static str {
        match self {
            TraceEvent::SymbolAssigned { .. } => "symbol_storage",
            TraceEvent::SystematicPayload { .. } | TraceEvent::CodedPayload { .. } => {
                "payload_generation"
            }
            TraceEvent::PivotInserted { .. } | TraceEvent::RedundantPayload => "decoder_state",
            TraceEvent::DecodingComplete => "decoder_state",
            TraceEvent::FeedbackWritten { .. } | TraceEvent::FeedbackApplied { .. } => "feedback",
        }
    }
}

/// Observer invoked with every trace event.
///
/// Implemented for closures, so `set_trace_callback(|event| ...)` works.
pub trait Tracer {
    /// Receive one event. Must not assume any particular ordering beyond
    /// the call sequence of the instance being observed.
    fn trace(&mut self, event: &TraceEvent);
}

impl<T: FnMut(&TraceEvent)> Tracer for T {
    fn trace(&mut self, event: &TraceEvent) {
        self(event)
    }
}

/// Shared emit helper: forwards to the tracer when one is installed.
pub(crate) fn emit(tracer: &mut Option<Box<dyn Tracer>>, event: TraceEvent) {
    if let Some(tracer) = tracer.as_mut() {
        tracer.trace(&event);
    }
}
