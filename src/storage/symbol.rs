use crate::field::Field;

/// A symbol is a fixed-size chunk of data in a network coding context.
///
/// A coded symbol is a linear combination (over the session's field) of
/// original symbols; the combination is built with [`Symbol::add_assign`]
/// and [`Symbol::scaled`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    data: Vec<u8>,
}

impl Symbol {
    /// Create a symbol from existing data.
    pub fn from_data(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Create a zero symbol of the given size.
    pub fn zero(size: usize) -> Self {
        Self {
            data: vec![0u8; size],
        }
    }

    /// Size of the symbol in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the symbol holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The underlying data as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consume the symbol and return the underlying data.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// Add another symbol to this one. In characteristic-2 fields this is a
    /// byte-wise XOR and doubles as subtraction.
    pub fn add_assign(&mut self, other: &Self) {
        debug_assert_eq!(self.data.len(), other.data.len());
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a ^= *b;
        }
    }

    /// Scale this symbol in place by a field element.
    pub fn scale<F: Field>(&mut self, scalar: F) {
        if scalar.is_zero() {
            self.data.fill(0);
        } else if scalar != F::ONE {
            for byte in &mut self.data {
                *byte = scalar.mul_byte(*byte);
            }
        }
    }

    /// A copy of this symbol scaled by a field element.
    pub fn scaled<F: Field>(&self, scalar: F) -> Self {
        let mut result = self.clone();
        result.scale(scalar);
        result
    }
}

impl From<Vec<u8>> for Symbol {
    fn from(data: Vec<u8>) -> Self {
        Self::from_data(data)
    }
}

impl AsRef<[u8]> for Symbol {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
