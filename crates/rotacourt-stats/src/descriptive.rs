/// Descriptive statistics over a set of per-player quantities.
///
/// Used for playing-time distributions (minutes) and rotation counts (periods),
/// both expressed as `f32`. Variance is the population variance: the values are
/// the whole roster, not a sample of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveStats {
    /// Number of values.
    pub count: usize,
    /// The minimum value.
    pub min: f32,
    /// The maximum value.
    pub max: f32,
    /// The sum of all values.
    pub sum: f32,
    /// The arithmetic mean.
    pub mean: f32,
    /// The population variance.
    pub variance: f32,
    /// The population standard deviation.
    pub std_dev: f32,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from values in any order.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use rotacourt_stats::descriptive::DescriptiveStats;
    /// let minutes = [8.0, 4.0, 6.0];
    /// let stats = DescriptiveStats::new(minutes).unwrap();
    /// assert_eq!(stats.min, 4.0);
    /// assert_eq!(stats.max, 8.0);
    /// assert_eq!(stats.mean, 6.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        let min = values.iter().copied().min_by(f32::total_cmp)?;
        let max = values.iter().copied().max_by(f32::total_cmp)?;
        let count = values.len();
        let n = count as f32;
        let sum = values.iter().copied().sum::<f32>();
        let mean = sum / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n;
        let std_dev = variance.sqrt();

        Some(Self {
            count,
            min,
            max,
            sum,
            mean,
            variance,
            std_dev,
        })
    }

    /// Returns the spread between the largest and smallest value.
    #[must_use]
    pub fn range(&self) -> f32 {
        self.max - self.min
    }

    /// Returns `std_dev / mean`, or `None` when the mean is zero.
    ///
    /// A zero mean means every value is zero (the inputs are non-negative
    /// quantities), so callers usually treat `None` as "perfectly even".
    #[must_use]
    pub fn coefficient_of_variation(&self) -> Option<f32> {
        if self.mean.abs() <= f32::EPSILON {
            return None;
        }
        Some(self.std_dev / self.mean)
    }
}
