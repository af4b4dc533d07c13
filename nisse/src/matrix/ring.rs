/// Index into a ring of `N` slots.
///
/// Every step wraps modulo `N`, so callers never do the modular arithmetic
/// themselves.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RingIndex<const N: usize>(usize);

impl<const N: usize> RingIndex<N> {
    pub const fn new(index: usize) -> Self {
        Self(index % N)
    }

    pub const fn get(self) -> usize {
        self.0
    }

    pub const fn next(self) -> Self {
        self.add(1)
    }

    pub const fn prev(self) -> Self {
        self.sub(1)
    }

    pub const fn add(self, n: usize) -> Self {
        Self((self.0 + n % N) % N)
    }

    pub const fn sub(self, n: usize) -> Self {
        Self((self.0 + N - n % N) % N)
    }
}
