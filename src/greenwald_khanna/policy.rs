use crate::error::{Error, Result};

/// Schedule on which [`Summary::insert`](super::Summary::insert) runs
/// compression.
///
/// The policy only decides when compression happens; the procedure and the
/// error guarantee are the same under every policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressPolicy {
    /// Compress every `floor(1 / (2ε))` insertions.
    #[default]
    Periodic,
    /// Compress every `n` insertions. `n` must be at least one.
    Every(usize),
    /// Never compress implicitly. The owner calls
    /// [`Summary::compress`](super::Summary::compress) as it sees fit.
    Manual,
}

impl CompressPolicy {
    /// Resolve the policy into the number of insertions between two
    /// compressions, or `None` for [`CompressPolicy::Manual`].
    pub(crate) fn period(self, epsilon: f64) -> Result<Option<usize>> {
        match self {
            CompressPolicy::Periodic => {
                // epsilon < 0.5 keeps this at one or more; huge values
                // saturate on the cast.
                let period = (1f64 / (2f64 * epsilon)).floor() as usize;
                Ok(Some(period.max(1)))
            }
            CompressPolicy::Every(0) => Err(Error::invalid(
                "policy",
                "compression period must be at least 1 insertion",
            )),
            CompressPolicy::Every(n) => Ok(Some(n)),
            CompressPolicy::Manual => Ok(None),
        }
    }
}
