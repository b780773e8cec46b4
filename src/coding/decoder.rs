use crate::coding::config::{CodingConfig, WindowPolicy};
use crate::coding::feedback::{Feedback, SlotStatus};
use crate::coding::payload::Payload;
use crate::coding::traits::{CodingError, PayloadReader, PayloadWriter, RankState};
use crate::field::Field;
use crate::storage::Symbol;
use crate::trace::{self, TraceEvent, Tracer};
use crate::utils::CodingRng;

/// One pivot row of the decoding matrix: an encoding vector expressed in
/// terms of original symbol indices, and the matching coded symbol.
#[derive(Debug, Clone)]
struct PivotRow<F: Field> {
    vector: Vec<F>,
    symbol: Symbol,
}

impl<F: Field> PivotRow<F> {
    /// Whether the vector is the exact standard basis vector for `pivot`.
    /// The pivot coefficient itself is one by normalization.
    fn is_basis(&self, pivot: usize) -> bool {
        self.vector
            .iter()
            .enumerate()
            .all(|(index, coeff)| index == pivot || coeff.is_zero())
    }
}

/// Random Linear Network Coding decoder.
///
/// Maintains the decoding matrix in reduced row-echelon form through
/// incremental Gaussian elimination: each payload costs at most one pass
/// over the existing pivot rows, and completion is checkable after every
/// packet without a final solve.
///
/// The decoder doubles as a recoder: [`PayloadWriter::write_payload`]
/// emits fresh combinations of the rows it already holds, so a node that
/// has not finished decoding can still produce useful packets for
/// downstream nodes.
pub struct Decoder<F: Field> {
    config: CodingConfig,
    /// Pivot rows stored at their pivot index. Row `i`, when present, has
    /// a one at column `i` and zeros at every other pivot column.
    rows: Vec<Option<PivotRow<F>>>,
    rank: usize,
    rng: CodingRng,
    tracer: Option<Box<dyn Tracer>>,
}

impl<F: Field> Decoder<F> {
    /// Build a decoder for one generation.
    pub fn build(config: CodingConfig) -> Result<Self, CodingError> {
        config.validate()?;
        Ok(Self {
            rows: vec![None; config.max_symbols],
            rank: 0,
            rng: CodingRng::new(),
            tracer: None,
            config,
        })
    }

    /// Build a decoder with a specific seed, making recoded payloads
    /// deterministic.
    pub fn with_seed(config: CodingConfig, seed: [u8; 32]) -> Result<Self, CodingError> {
        let mut decoder = Self::build(config)?;
        decoder.rng = CodingRng::from_seed(seed);
        Ok(decoder)
    }

    /// Install a trace observer.
    pub fn set_trace_callback<T: Tracer + 'static>(&mut self, tracer: T) {
        self.tracer = Some(Box::new(tracer));
    }

    /// Whether the matrix reached full rank. Monotonic: once complete, a
    /// decoder never leaves that state.
    pub fn is_complete(&self) -> bool {
        self.rank == self.config.max_symbols
    }

    /// Whether slot `index` is fully resolved, either received uncoded or
    /// reduced to a basis row.
    pub fn is_symbol_uncoded(&self, index: usize) -> bool {
        match self.rows.get(index) {
            Some(Some(row)) => row.is_basis(index),
            _ => false,
        }
    }

    /// Count of rows that are exact basis vectors. Distinct from rank:
    /// a pivot row can still mix several original symbols.
    pub fn symbols_uncoded(&self) -> usize {
        (0..self.config.max_symbols)
            .filter(|&index| self.is_symbol_uncoded(index))
            .count()
    }

    /// The recovered symbol at `index`, available once its row reduces to
    /// a basis vector (possibly before the whole generation completes).
    pub fn symbol(&self, index: usize) -> Option<&[u8]> {
        match self.rows.get(index) {
            Some(Some(row)) if row.is_basis(index) => Some(row.symbol.as_slice()),
            _ => None,
        }
    }

    /// Copy the recovered block out of the decoding matrix.
    ///
    /// Valid only once decoding is complete: the matrix is in reduced
    /// row-echelon form with unit pivots, so row `i` holds original
    /// symbol `i` and concatenation reproduces the block exactly.
    pub fn copy_from_symbols(&self) -> Result<Vec<u8>, CodingError> {
        if !self.is_complete() {
            return Err(CodingError::NotComplete);
        }
        let mut data = Vec::with_capacity(self.config.block_size());
        for row in self.rows.iter().flatten() {
            data.extend_from_slice(row.symbol.as_slice());
        }
        Ok(data)
    }

    /// Report per-slot resolution status to the encoder.
    ///
    /// Only valid on the sliding-window stack.
    pub fn write_feedback(&mut self) -> Result<Vec<u8>, CodingError> {
        if self.config.window != WindowPolicy::SlidingWindow {
            return Err(CodingError::SlidingWindowOnly);
        }
        let statuses: Vec<SlotStatus> = (0..self.config.max_symbols)
            .map(|index| match &self.rows[index] {
                Some(row) if row.is_basis(index) => SlotStatus::Resolved,
                Some(_) => SlotStatus::Partial,
                None => SlotStatus::Unknown,
            })
            .collect();

        let feedback = Feedback::new(statuses);
        trace::emit(
            &mut self.tracer,
            TraceEvent::FeedbackWritten {
                resolved: feedback.resolved(),
            },
        );
        Ok(feedback.to_bytes())
    }

    /// Incremental Gaussian elimination for one incoming (vector, symbol)
    /// pair. Returns without touching rank when the vector reduces to
    /// zero.
    fn eliminate(&mut self, mut vector: Vec<F>, mut symbol: Symbol) -> Result<(), CodingError> {
        let n = self.config.max_symbols;

        // Forward pass over the whole vector: eliminate against every
        // stored row, and remember the first free column left with a
        // non-zero residual. A stored row leads at its own pivot and is
        // zero at the other pivot columns, so each elimination touches
        // columns at or past `col` only; subtraction is addition in
        // characteristic 2.
        let mut pivot = None;
        for col in 0..n {
            let coeff = vector[col];
            if coeff.is_zero() {
                continue;
            }
            match &self.rows[col] {
                Some(row) => {
                    for c in col..n {
                        vector[c] = vector[c].add(coeff.mul(row.vector[c]));
                    }
                    symbol.add_assign(&row.symbol.scaled(coeff));
                }
                None => {
                    if pivot.is_none() {
                        pivot = Some(col);
                    }
                }
            }
        }

        let Some(pivot) = pivot else {
            // Fully eliminated: the payload was linearly dependent on
            // existing knowledge. Discard without rank change.
            trace::emit(&mut self.tracer, TraceEvent::RedundantPayload);
            return Ok(());
        };

        // Normalize so the pivot coefficient is one; the coefficient is
        // non-zero here, so inversion cannot fail.
        let inverse = vector[pivot].invert().ok_or(CodingError::DecodingFailed)?;
        for col in pivot..n {
            vector[col] = vector[col].mul(inverse);
        }
        symbol.scale(inverse);

        // Back-substitute into every stored row with a non-zero
        // coefficient at the new pivot, keeping the matrix in full
        // reduced row-echelon form so decoded symbols stay readable
        // without a final solve pass.
        for other in 0..n {
            if other == pivot {
                continue;
            }
            if let Some(row) = self.rows[other].as_mut() {
                let factor = row.vector[pivot];
                if factor.is_zero() {
                    continue;
                }
                for col in pivot..n {
                    row.vector[col] = row.vector[col].add(factor.mul(vector[col]));
                }
                row.symbol.add_assign(&symbol.scaled(factor));
            }
        }

        self.rows[pivot] = Some(PivotRow { vector, symbol });
        self.rank += 1;
        log::trace!("pivot {pivot} inserted, rank {}/{n}", self.rank);
        trace::emit(
            &mut self.tracer,
            TraceEvent::PivotInserted {
                pivot,
                rank: self.rank,
            },
        );
        if self.rank == n {
            log::debug!("decoding complete at rank {n}");
            trace::emit(&mut self.tracer, TraceEvent::DecodingComplete);
        }
        Ok(())
    }
}

impl<F: Field> PayloadReader for Decoder<F> {
    fn read_payload(&mut self, payload: &[u8]) -> Result<(), CodingError> {
        let payload = Payload::<F>::from_bytes(
            payload,
            self.config.max_symbols,
            self.config.max_symbol_size,
        )?;
        let vector = payload.coefficients(self.config.max_symbols);
        let symbol = Symbol::from_data(payload.symbol().to_vec());
        self.eliminate(vector, symbol)
    }
}

impl<F: Field> PayloadWriter for Decoder<F> {
    /// Recode: emit a fresh combination of the rows this decoder already
    /// holds, with the encoding vector composed back into original symbol
    /// indices. The packet always lies in the span of what was received,
    /// so it can never leak rank the recoder does not possess. A rank-0
    /// recoder emits a zero packet the downstream decoder discards as
    /// redundant.
    fn write_payload(&mut self) -> Result<Vec<u8>, CodingError> {
        let n = self.config.max_symbols;
        let mut coefficients = vec![F::ZERO; n];
        let mut combined = Symbol::zero(self.config.max_symbol_size);
        let mut density = 0;

        for pivot in 0..n {
            let Some(row) = &self.rows[pivot] else {
                continue;
            };
            let weight = self.rng.generate_coefficient::<F>();
            if weight.is_zero() {
                continue;
            }
            for col in 0..n {
                coefficients[col] = coefficients[col].add(weight.mul(row.vector[col]));
            }
            combined.add_assign(&row.symbol.scaled(weight));
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

impl<F: Field> RankState for Decoder<F> {
    fn rank(&self) -> usize {
        self.rank
    }

    fn symbols(&self) -> usize {
        self.config.max_symbols
    }

    fn symbol_size(&self) -> usize {
        self.config.max_symbol_size
    }
}
