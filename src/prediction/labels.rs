//! Age-group label sets

use serde::{Deserialize, Serialize};

use crate::error::FeatureError;

/// Age bins of the image model, in model output order
pub const IMAGE_AGE_BINS: [&str; 20] = [
    "1-5", "6-10", "11-15", "16-20", "21-25", "26-30", "31-35", "36-40", "41-45", "46-50",
    "51-55", "56-60", "61-65", "66-70", "71-75", "76-80", "81-85", "86-90", "91-95", "95+",
];

/// Ordered set of class labels; index `i` names model output `i`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBins {
    labels: Vec<String>,
}

impl AgeBins {
    /// Build the label set from raw training metadata values
    ///
    /// Labels are sorted and de-duplicated, which is the order the audio model
    /// was trained with (the sorted unique `new_age_bin` values).
    ///
    /// # Example
    ///
    /// ```
    /// use agegroup_features::prediction::labels::AgeBins;
    ///
    /// let bins = AgeBins::from_labels(["teens", "adults", "teens", "seniors"])?;
    /// assert_eq!(bins.labels(), ["adults", "seniors", "teens"]);
    /// # Ok::<(), agegroup_features::FeatureError>(())
    /// ```
    pub fn from_labels<I, S>(labels: I) -> Result<Self, FeatureError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        labels.sort();
        labels.dedup();

        if labels.is_empty() {
            return Err(FeatureError::InvalidInput(
                "Label set must not be empty".to_string(),
            ));
        }
        Ok(Self { labels })
    }

    /// Fixed 20-bin set of the image model (not re-sorted)
    pub fn image() -> Self {
        Self {
            labels: IMAGE_AGE_BINS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Labels in model output order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label for output index `index`
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for a constructed set
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
