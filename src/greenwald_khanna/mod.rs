//! Greenwald Khanna calculates epsilon-approximate quantiles.
//! If the desired quantile is phi, the epsilon-approximate
//! quantile is any element whose rank lies between
//! `(phi - epsilon) x N` and `(phi + epsilon) x N`.
//!
//! terminology from the paper:
//!
//!   * S: set of observations
//!   * n: number of observations in S
//!   * v[i]: observation i in S
//!   * r: rank of observation in S from 1 to n.
//!   * `r_min(v[i])`: lower bound on rank r of v[i]
//!   * `r_max(v[i])`: upper bound on rank r of v[i]
//!   * `g[i] = r_min(v[i]) - r_min(v[i - 1])`
//!   * `delta[i] = r_max(v[i]) - r_min(v[i])`
//!   * `t[i] = tuple(v[i], g[i], delta[i])`
//!   * phi: quantile as a real number in the range [0,1]
//!
//! identities:
//!
//! * `r_min(v[i]) = forall j<=i sum of g[j]`
//! * `r_max(v[i]) = ( forall j<=i sum of g[j] ) + delta[i]`
//! * sum of g[i] = n
//! * delta of the first and last tuple is always 0
//!
//! results:
//!
//! * `g[i] + delta[i] <= floor(2 * epsilon * n)` for every inner tuple
//! * the summary holds `O((1/epsilon) * log(epsilon * n))` tuples
//!
//! `@inproceedings{Greenwald:2001:SOC:375663.375670,
//!       author = {Greenwald, Michael and Khanna, Sanjeev},
//!       title = {Space-efficient Online Computation of Quantile Summaries},
//!       booktitle = {Proceedings of the 2001 ACM SIGMOD International
//!                    Conference on Management of Data},
//!       series = {SIGMOD '01},
//!       year = {2001},
//!       pages = {58--66},
//!       doi = {10.1145/375663.375670},
//!       publisher = {ACM},
//!     }`
//!
//! # Examples
//!
//! ```
//! use gk_quantiles::greenwald_khanna::Summary;
//!
//! let epsilon = 0.01;
//! let mut summary = Summary::new(epsilon).unwrap();
//!
//! let n = 1000;
//! for i in 1..=n {
//!     summary.insert(i as f64).unwrap();
//! }
//!
//! let in_range = |phi: f64, value: f64| {
//!     let lower = (phi - epsilon) * (n as f64);
//!     let upper = (phi + epsilon) * (n as f64) + 1.0;
//!     lower <= value && value <= upper
//! };
//! assert_eq!(summary.query(0.0).unwrap(), 1.0);
//! assert!(in_range(0.25, summary.query(0.25).unwrap()));
//! assert!(in_range(0.5, summary.query(0.5).unwrap()));
//! assert!(in_range(0.99, summary.query(0.99).unwrap()));
//! assert_eq!(summary.query(1.0).unwrap(), 1000.0);
//! ```

use std::fmt;

use crate::error::{Error, Result};

mod policy;
mod tuple;

pub use self::policy::CompressPolicy;
pub use self::tuple::Tuple;

/// An approximate quantile together with the rank interval it is known to
/// occupy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate<T> {
    /// The observation answering the query
    pub value: T,
    /// Lower bound on the true rank of `value`
    pub rank_min: usize,
    /// Upper bound on the true rank of `value`
    pub rank_max: usize,
}

/// The summary S of the observations seen so far.
///
/// A `Summary` answers quantile queries over everything inserted into it
/// while storing only a compressed, rank-annotated subset of the stream.
/// Mutation takes `&mut self`; callers sharing a summary across threads
/// must serialize access themselves.
#[derive(Debug, Clone)]
pub struct Summary<T = f64> {
    /// An ordered sequence of the selected observations
    tuples: Vec<Tuple<T>>,

    /// The error factor
    epsilon: f64,

    /// The number of observations
    n: usize,

    policy: CompressPolicy,
    // insertions between two implicit compressions, None when manual
    period: Option<usize>,
}

impl<T> Summary<T>
where
    T: Copy + PartialOrd,
{
    /// Create a new Summary compressing on the default schedule.
    ///
    /// For any quantile query phi the returned observation has a true rank
    /// within `epsilon * n` of `phi * n`. `epsilon` must lie strictly between
    /// 0 and 0.5.
    ///
    /// # Examples
    /// ```
    /// use gk_quantiles::greenwald_khanna::Summary;
    ///
    /// let summary: Summary = Summary::new(0.025).unwrap();
    /// assert_eq!(summary.count(), 0);
    /// assert!(Summary::<f64>::new(0.5).is_err());
    /// ```
    pub fn new(epsilon: f64) -> Result<Summary<T>> {
        Summary::with_policy(epsilon, CompressPolicy::default())
    }

    /// Create a new Summary compressing according to `policy`.
    ///
    /// # Examples
    /// ```
    /// use gk_quantiles::greenwald_khanna::{CompressPolicy, Summary};
    ///
    /// let mut summary = Summary::with_policy(0.1, CompressPolicy::Manual).unwrap();
    /// for i in 0..100 {
    ///     summary.insert(i as f64).unwrap();
    /// }
    /// assert_eq!(summary.len(), 100);
    /// summary.compress();
    /// assert!(summary.len() < 100);
    /// ```
    pub fn with_policy(epsilon: f64, policy: CompressPolicy) -> Result<Summary<T>> {
        if !(epsilon > 0f64 && epsilon < 0.5) {
            return Err(Error::invalid(
                "epsilon",
                format!("must lie in (0, 0.5), got {}", epsilon),
            ));
        }
        let period = policy.period(epsilon)?;

        Ok(Summary {
            tuples: Vec::new(),
            epsilon,
            n: 0,
            policy,
            period,
        })
    }

    /// Locates the correct position in the summary for the observation v and
    /// inserts a new tuple (v, 1, delta).
    ///
    /// delta is 0 when v becomes the new minimum or maximum. Otherwise the
    /// tuple inherits the uncertainty of the tuple it precedes, less the one
    /// rank it now accounts for itself.
    ///
    /// Observations that do not compare equal to themselves, such as NaN,
    /// are rejected. An [`Error::InvariantViolation`] signals a defect in
    /// this crate; the summary is left untouched when it is returned.
    pub fn insert(&mut self, v: T) -> Result<()> {
        if v.partial_cmp(&v).is_none() {
            return Err(Error::invalid(
                "value",
                "observation does not compare equal to itself",
            ));
        }

        let mut pos = self.tuples.partition_point(|t| t.value < v);
        if pos > 0 {
            // step over a run of equal observations
            while pos < self.tuples.len() && self.tuples[pos].value == v {
                pos += 1;
            }
        }

        let mut delta = 0;
        if pos != 0 && pos != self.tuples.len() {
            let succ = &self.tuples[pos];
            delta = succ.width() - 1;

            let bound = self.error_bound();
            if delta > bound {
                tracing::error!(
                    delta,
                    bound,
                    count = self.n,
                    "tuple delta exceeds the allowable error"
                );
                return Err(Error::InvariantViolation {
                    delta,
                    bound,
                    count: self.n,
                });
            }
        }

        self.tuples.insert(pos, Tuple::new(v, 1, delta));
        self.n += 1;

        if self.should_compress() {
            self.compress();
        }
        Ok(())
    }

    /// Merge runs of adjacent tuples whose combined uncertainty stays within
    /// `floor(2 * epsilon * n)`.
    ///
    /// The scan walks from the largest observation down. Each tuple t[i]
    /// absorbs as many of its predecessors as the bound allows, keeping its
    /// own v[i] and delta[i]. The first tuple is never absorbed. The sum of
    /// g and the ordering of the summary are preserved.
    pub fn compress(&mut self) {
        let before = self.tuples.len();
        if before < 3 {
            return;
        }
        let p = self.error_bound();

        let mut i = before - 1;
        while i >= 2 {
            let delta_i = self.tuples[i].delta;
            let mut roll = self.tuples[i].g;

            let mut j = i - 1;
            while j >= 1 && roll + self.tuples[j].g + delta_i <= p {
                roll += self.tuples[j].g;
                j -= 1;
            }
            // we went one index too far
            j += 1;

            if j < i {
                self.tuples[i].g = roll;
                self.tuples.drain(j..i);
            }
            i = j - 1;
        }

        tracing::trace!(
            count = self.n,
            before,
            after = self.tuples.len(),
            "compressed summary"
        );
    }

    /// Compute the epsilon-approximate phi-quantile from the summary.
    ///
    /// The minimum and maximum, phi of 0.0 and 1.0 respectively, are always
    /// known precisely.
    ///
    /// # Examples
    /// ```
    /// use gk_quantiles::greenwald_khanna::Summary;
    ///
    /// let mut summary = Summary::new(0.025).unwrap();
    /// for i in 1..10 {
    ///     summary.insert(i as f64).unwrap();
    /// }
    /// assert_eq!(summary.query(0.0).unwrap(), 1.0);
    /// assert_eq!(summary.query(0.95).unwrap(), 8.0);
    /// assert_eq!(summary.query(1.0).unwrap(), 9.0);
    /// ```
    pub fn query(&self, phi: f64) -> Result<T> {
        self.check_query(phi)?;
        let last = self.tuples.len() - 1;

        if phi == 0f64 {
            return Ok(self.tuples[0].value);
        }
        if phi == 1f64 {
            return Ok(self.tuples[last].value);
        }

        let idx = match self.locate(phi) {
            Some((idx, _)) => idx,
            None => last,
        };
        Ok(self.tuples[idx].value)
    }

    /// Same as [`Summary::query`] but also reports the rank interval
    /// `[rank_min, rank_max]` known for the returned observation.
    ///
    /// # Examples
    /// ```
    /// use gk_quantiles::greenwald_khanna::Summary;
    ///
    /// let mut summary = Summary::new(0.1).unwrap();
    /// for i in 0..4 {
    ///     summary.insert(i as f64).unwrap();
    /// }
    /// let min = summary.query_with_rank(0.0).unwrap();
    /// assert_eq!((min.value, min.rank_min, min.rank_max), (0.0, 1, 1));
    /// let max = summary.query_with_rank(1.0).unwrap();
    /// assert_eq!((max.value, max.rank_min, max.rank_max), (3.0, 4, 4));
    /// ```
    pub fn query_with_rank(&self, phi: f64) -> Result<Estimate<T>> {
        self.check_query(phi)?;
        let last = &self.tuples[self.tuples.len() - 1];

        if phi == 0f64 {
            let first = &self.tuples[0];
            return Ok(Estimate {
                value: first.value,
                rank_min: first.g,
                rank_max: first.width(),
            });
        }
        if phi == 1f64 {
            return Ok(Estimate {
                value: last.value,
                rank_min: self.n,
                rank_max: self.n + last.delta,
            });
        }

        Ok(match self.locate(phi) {
            Some((idx, rank_min)) => Estimate {
                value: self.tuples[idx].value,
                rank_min,
                rank_max: rank_min + self.tuples[idx].delta,
            },
            None => Estimate {
                value: last.value,
                rank_min: self.n,
                rank_max: self.n + last.delta,
            },
        })
    }

    /// Find the last tuple whose successor would overshoot the acceptable
    /// rank window for phi. Returns its index and r_min, or `None` when no
    /// tuple overshoots.
    fn locate(&self, phi: f64) -> Option<(usize, usize)> {
        let r = (phi * self.n as f64).floor() as usize;
        let en = (self.epsilon * self.n as f64) as usize;

        let mut rmin = 0;
        for (i, pair) in self.tuples.windows(2).enumerate() {
            let (prev, cur) = (&pair[0], &pair[1]);
            rmin += prev.g;
            if rmin + cur.width() > r + en {
                return Some((i, rmin));
            }
        }
        None
    }

    fn check_query(&self, phi: f64) -> Result<()> {
        if !(0f64..=1f64).contains(&phi) {
            return Err(Error::invalid(
                "phi",
                format!("quantile must lie in [0, 1], got {}", phi),
            ));
        }
        if self.tuples.is_empty() {
            return Err(Error::Empty);
        }
        Ok(())
    }

    fn should_compress(&self) -> bool {
        match self.period {
            Some(period) => self.n % period == 0,
            None => false,
        }
    }
}

impl<T> Summary<T> {
    /// Calculate p = floor(2 * epsilon * n), the largest g + delta an inner
    /// tuple may carry.
    pub fn error_bound(&self) -> usize {
        (self.epsilon * (2 * self.n) as f64).floor() as usize
    }

    /// The error factor this summary was created with.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// The compression schedule this summary was created with.
    pub fn policy(&self) -> CompressPolicy {
        self.policy
    }

    /// The number of observations inserted into the summary.
    pub fn count(&self) -> usize {
        self.n
    }

    /// Indication of the space usage of the summary.
    /// Returns the number of tuples currently held.
    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    /// Whether no observation has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Read-only view of the tuples, ordered by observation.
    pub fn tuples(&self) -> &[Tuple<T>] {
        &self.tuples
    }
}

/// Dumps every tuple with its rank range and maximum error, one per line.
impl<T> fmt::Display for Summary<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut rank = 0;
        for (i, t) in self.tuples.iter().enumerate() {
            rank += t.g;
            writeln!(
                f,
                "{}: v={} rank=[{}, {}] g={} delta={} max_err={}",
                i,
                t.value,
                rank,
                rank + t.delta,
                t.g,
                t.delta,
                t.width() / 2
            )?;
        }
        write!(
            f,
            "error range: {}",
            (self.epsilon * self.n as f64).floor() as usize
        )
    }
}
