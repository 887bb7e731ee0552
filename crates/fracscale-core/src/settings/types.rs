use serde::Serialize;

/// Experimental feature flags stored under one settings key.
///
/// Keeps the order the store reported and never holds duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FeatureSet {
    features: Vec<String>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// Add `feature`; returns false if it was already present.
    pub fn insert(&mut self, feature: impl Into<String>) -> bool {
        let feature = feature.into();
        if self.contains(&feature) {
            return false;
        }
        self.features.push(feature);
        true
    }

    /// Remove `feature`; returns false if it was absent.
    pub fn remove(&mut self, feature: &str) -> bool {
        let before = self.features.len();
        self.features.retain(|f| f != feature);
        self.features.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Membership comparison ignoring order.
    pub fn same_members(&self, other: &FeatureSet) -> bool {
        self.len() == other.len() && self.iter().all(|f| other.contains(f))
    }
}

impl<S: Into<String>> FromIterator<S> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = FeatureSet::new();
        for feature in iter {
            set.insert(feature);
        }
        set
    }
}
