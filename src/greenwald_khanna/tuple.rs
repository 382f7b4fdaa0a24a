use std::cmp;

/// 3-tuple of an observation v[i], g[i] and delta[i].
#[derive(Debug, Clone, Copy)]
pub struct Tuple<T> {
    /// v[i], an observation kept by the summary
    pub value: T,

    /// the difference between the rank lower bounds of t[i] and t[i-1]
    /// g = r_min(v[i]) - r_min(v[i - 1])
    pub g: usize,

    /// the difference between the rank upper and lower bounds of t[i]
    /// delta = r_max(v[i]) - r_min(v[i])
    pub delta: usize,
}

impl<T> Tuple<T> {
    /// Creates a new instance of a Tuple
    pub fn new(value: T, g: usize, delta: usize) -> Tuple<T> {
        Tuple { value, g, delta }
    }

    /// Upper bound on the number of observations this tuple stands in for,
    /// counting itself.
    pub fn width(&self) -> usize {
        self.g + self.delta
    }
}

// Only the observation orders tuples; g and delta are bookkeeping.
impl<T> PartialEq for Tuple<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Tuple<T>) -> bool {
        self.value == other.value
    }
}

impl<T> PartialOrd for Tuple<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Tuple<T>) -> Option<cmp::Ordering> {
        self.value.partial_cmp(&other.value)
    }
}
