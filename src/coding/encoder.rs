use crate::coding::config::{CodingConfig, WindowPolicy};
use crate::coding::feedback::{Feedback, SlotStatus};
use crate::coding::payload::Payload;
use crate::coding::traits::{CodingError, PayloadWriter, RankState};
use crate::field::Field;
use crate::storage::Symbol;
use crate::trace::{self, TraceEvent, Tracer};
use crate::utils::CodingRng;
use std::marker::PhantomData;

/// Random Linear Network Coding encoder.
///
/// One type serves both stacks: with [`WindowPolicy::FullVector`] the whole
/// block is assigned at once via [`Encoder::set_const_symbols`]; with
/// [`WindowPolicy::SlidingWindow`] symbols arrive one at a time via
/// [`Encoder::set_const_symbol`] and decoder feedback shrinks the set of
/// candidate symbols for future encoding vectors.
///
/// The encoder owns the symbols it is given for the session lifetime.
pub struct Encoder<F: Field> {
    config: CodingConfig,
    /// Symbol slots; unassigned slots contribute the zero vector.
    slots: Vec<Option<Symbol>>,
    /// Number of assigned slots. For an encoder, rank is the number of
    /// symbols available for encoding.
    assigned: usize,
    systematic: bool,
    /// Slots already emitted uncoded during the systematic phase.
    systematic_sent: Vec<bool>,
    /// Slots excluded from coefficient draws after feedback.
    excluded: Vec<bool>,
    /// Per-slot count of payloads that included the slot. Feedback may
    /// only exclude a slot the encoder has itself sent at least once;
    /// feedback is advisory and can be lost, so exclusion is gated on
    /// local state.
    sent: Vec<u64>,
    rng: CodingRng,
    tracer: Option<Box<dyn Tracer>>,
    _field: PhantomData<F>,
}

impl<F: Field> Encoder<F> {
    /// Build an encoder for one generation. Systematic mode starts on.
    pub fn build(config: CodingConfig) -> Result<Self, CodingError> {
        config.validate()?;
        Ok(Self {
            slots: vec![None; config.max_symbols],
            assigned: 0,
            systematic: true,
            systematic_sent: vec![false; config.max_symbols],
            excluded: vec![false; config.max_symbols],
            sent: vec![0; config.max_symbols],
            rng: CodingRng::new(),
            tracer: None,
            _field: PhantomData,
            config,
        })
    }

    /// Build an encoder with a specific seed for deterministic behavior.
    pub fn with_seed(config: CodingConfig, seed: [u8; 32]) -> Result<Self, CodingError> {
        let mut encoder = Self::build(config)?;
        encoder.rng = CodingRng::from_seed(seed);
        Ok(encoder)
    }

    /// Install a trace observer.
    pub fn set_trace_callback<T: Tracer + 'static>(&mut self, tracer: T) {
        self.tracer = Some(Box::new(tracer));
    }

    /// Assign the whole block at once, partitioned into `max_symbols`
    /// symbols of `max_symbol_size` bytes each.
    pub fn set_const_symbols(&mut self, data: &[u8]) -> Result<(), CodingError> {
        if data.len() != self.config.block_size() {
            return Err(CodingError::SizeMismatch {
                expected: self.config.block_size(),
                actual: data.len(),
            });
        }
        for (index, chunk) in data.chunks_exact(self.config.max_symbol_size).enumerate() {
            self.assign(index, chunk.to_vec());
        }
        Ok(())
    }

    /// Assign a single symbol slot. Used by the sliding-window stack to
    /// make symbols available incrementally.
    pub fn set_const_symbol(&mut self, index: usize, data: &[u8]) -> Result<(), CodingError> {
        if index >= self.config.max_symbols {
            return Err(CodingError::SymbolIndexOutOfRange {
                index,
                max: self.config.max_symbols,
            });
        }
        if data.len() != self.config.max_symbol_size {
            return Err(CodingError::SizeMismatch {
                expected: self.config.max_symbol_size,
                actual: data.len(),
            });
        }
        self.assign(index, data.to_vec());
        Ok(())
    }

    fn assign(&mut self, index: usize, data: Vec<u8>) {
        if self.slots[index].is_none() {
            self.assigned += 1;
        }
        self.slots[index] = Some(Symbol::from_data(data));
        trace::emit(&mut self.tracer, TraceEvent::SymbolAssigned { index });
    }

    /// Emit uncoded symbols before switching to coded payloads.
    pub fn set_systematic_on(&mut self) {
        self.systematic = true;
    }

    /// Emit coded payloads only.
    pub fn set_systematic_off(&mut self) {
        self.systematic = false;
    }

    /// Whether systematic mode is on.
    pub fn is_systematic(&self) -> bool {
        self.systematic
    }

    /// Lowest symbol index still in play: the first slot not excluded by
    /// feedback. Strictly increases over time when feedback keeps
    /// arriving and low slots resolve.
    pub fn window_start(&self) -> usize {
        self.excluded
            .iter()
            .position(|&e| !e)
            .unwrap_or(self.config.max_symbols)
    }

    /// Number of slots acknowledged as resolved through feedback.
    pub fn symbols_acknowledged(&self) -> usize {
        self.excluded.iter().filter(|&&e| e).count()
    }

    /// Whether every assigned symbol has been acknowledged as resolved.
    /// Sliding-window session completion is per-slot, not a global rank
    /// check, because the window can still be growing.
    pub fn is_fully_acknowledged(&self) -> bool {
        self.assigned > 0
            && self
                .excluded
                .iter()
                .zip(self.slots.iter())
                .all(|(&excluded, slot)| slot.is_none() || excluded)
    }

    /// Apply a decoder feedback message, excluding resolved slots from
    /// future encoding-vector draws.
    ///
    /// Only valid on the sliding-window stack. An encoder that never
    /// receives feedback keeps functioning correctly; exclusion only
    /// shrinks the candidate set and saves computation.
    pub fn read_feedback(&mut self, bytes: &[u8]) -> Result<(), CodingError> {
        if self.config.window != WindowPolicy::SlidingWindow {
            return Err(CodingError::SlidingWindowOnly);
        }
        let feedback = Feedback::from_bytes(bytes, self.config.max_symbols)?;

        for (index, status) in feedback.statuses().iter().enumerate() {
            if *status == SlotStatus::Resolved
                && self.slots[index].is_some()
                && self.sent[index] > 0
            {
                self.excluded[index] = true;
            }
        }

        let excluded = self.symbols_acknowledged();
        let window_start = self.window_start();
        log::debug!("feedback applied: {excluded} slots excluded, window starts at {window_start}");
        trace::emit(
            &mut self.tracer,
            TraceEvent::FeedbackApplied {
                excluded,
                window_start,
            },
        );
        Ok(())
    }

    /// The next slot to send uncoded, if the systematic phase is active.
    fn next_systematic(&self) -> Option<usize> {
        if !self.systematic {
            return None;
        }
        self.slots.iter().enumerate().position(|(index, slot)| {
            slot.is_some() && !self.systematic_sent[index] && !self.excluded[index]
        })
    }

    /// Slots eligible for a coefficient draw: assigned and not excluded.
    /// When feedback has excluded every assigned slot the draw falls back
    /// to the full assigned set; feedback is advisory and a stray payload
    /// is merely redundant downstream.
    fn active_slots(&self) -> Vec<usize> {
        let active: Vec<usize> = (0..self.config.max_symbols)
            .filter(|&i| self.slots[i].is_some() && !self.excluded[i])
            .collect();
        if active.is_empty() {
            (0..self.config.max_symbols)
                .filter(|&i| self.slots[i].is_some())
                .collect()
        } else {
            active
        }
    }
}

impl<F: Field> PayloadWriter for Encoder<F> {
    /// Produce one payload.
    ///
    /// With systematic mode on and un-sent symbols remaining, emits the
    /// next original symbol as a basis-vector packet in O(1). Otherwise
    /// draws a fresh encoding vector with every coefficient uniform over
    /// the full field (zero included) for each symbol in the active
    /// window, and emits the weighted sum.
    fn write_payload(&mut self) -> Result<Vec<u8>, CodingError> {
        if self.assigned == 0 {
            return Err(CodingError::NoSymbolsSet);
        }

        if let Some(index) = self.next_systematic() {
            self.systematic_sent[index] = true;
            self.sent[index] += 1;
            let symbol = self.slots[index]
                .as_ref()
                .ok_or(CodingError::NoSymbolsSet)?
                .as_slice()
                .to_vec();
            trace::emit(&mut self.tracer, TraceEvent::SystematicPayload { index });
            return Ok(Payload::<F>::Systematic { index, symbol }.to_bytes());
        }

        let mut coefficients = vec![F::ZERO; self.config.max_symbols];
        let mut combined = Symbol::zero(self.config.max_symbol_size);
        let mut density = 0;

        for index in self.active_slots() {
            let coeff = self.rng.generate_coefficient::<F>();
            if coeff.is_zero() {
                continue;
            }
            coefficients[index] = coeff;
            let symbol = self.slots[index]
                .as_ref()
                .ok_or(CodingError::NoSymbolsSet)?;
            combined.add_assign(&symbol.scaled(coeff));
            self.sent[index] += 1;
            density += 1;
        }

        trace::emit(&mut self.tracer, TraceEvent::CodedPayload { density });
        Ok(Payload::Coded {
            coefficients,
            symbol: combined.into_inner(),
        }
        .to_bytes())
    }
}

impl<F: Field> RankState for Encoder<F> {
    fn rank(&self) -> usize {
        self.assigned
    }

    fn symbols(&self) -> usize {
        self.config.max_symbols
    }

    fn symbol_size(&self) -> usize {
        self.config.max_symbol_size
    }
}
