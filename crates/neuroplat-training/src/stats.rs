/// Spread of a generation's scores or fitness values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveStats {
    pub max: f32,
    pub mean: f32,
    /// Population standard deviation (divides by `n`).
    pub std_dev: f32,
}

impl DescriptiveStats {
    /// Returns `None` for an empty input.
    ///
    /// ```
    /// # use neuroplat_training::stats::DescriptiveStats;
    /// let stats = DescriptiveStats::new([5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.std_dev, 2.0_f32.sqrt());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        let max = values.iter().copied().max_by(f32::total_cmp)?;
        let n = values.len() as f32;
        let mean = values.iter().sum::<f32>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n;
        Some(Self {
            max,
            mean,
            std_dev: variance.sqrt(),
        })
    }
}
