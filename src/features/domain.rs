//! Feature list, derived groups, selections and the encoded input row.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::common::error::DashResult;

/// Group key for names that carry no underscore.
pub const FALLBACK_GROUP: &str = "Other";

/// Label of the empty form option; submitting it means no choice for the group.
pub const PLACEHOLDER: &str = "Select...";

/// Group key of a feature name: the text before the first underscore, or [`FALLBACK_GROUP`].
pub fn group_key(name: &str) -> &str {
    match name.split_once('_') {
        Some((prefix, _)) => prefix,
        None => FALLBACK_GROUP,
    }
}

/// Ordered feature names as the classifier expects its columns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureList(Vec<String>);

impl FeatureList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// First name that occurs more than once, if any.
    pub fn first_duplicate(&self) -> Option<&str> {
        let mut seen = std::collections::HashSet::with_capacity(self.0.len());
        self.iter().find(|name| !seen.insert(*name))
    }
}

/// One display bucket: a prefix key and its sorted members.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FeatureGroup {
    pub key: String,
    pub features: Vec<String>,
}

impl FeatureGroup {
    pub fn contains(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Groups in display order (case-insensitive by key).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FeatureGroups {
    groups: Vec<FeatureGroup>,
}

impl FeatureGroups {
    pub(crate) fn from_sorted(groups: Vec<FeatureGroup>) -> Self {
        Self { groups }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureGroup> {
        self.groups.iter()
    }

    pub fn as_slice(&self) -> &[FeatureGroup] {
        &self.groups
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&FeatureGroup> {
        self.groups.iter().find(|g| g.key == key)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Split into left and right form columns at `max(1, len / 2)`.
    pub fn split_columns(&self) -> (&[FeatureGroup], &[FeatureGroup]) {
        let mid = (self.groups.len() / 2).max(1).min(self.groups.len());
        self.groups.split_at(mid)
    }
}

/// At most one chosen feature per group key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>")]
pub struct Selections(BTreeMap<String, String>);

impl From<BTreeMap<String, String>> for Selections {
    fn from(choices: BTreeMap<String, String>) -> Self {
        let mut selections = Self::none();
        for (group, feature) in choices {
            selections.choose(group, feature);
        }
        selections
    }
}

impl Selections {
    /// No group has a choice.
    pub fn none() -> Self {
        Self::default()
    }

    /// Record `feature` as the choice for `group`, replacing any earlier one.
    /// Empty values and [`PLACEHOLDER`] mean "none chosen" and clear the group.
    pub fn choose(&mut self, group: impl Into<String>, feature: impl Into<String>) {
        let group = group.into();
        let feature = feature.into();
        if feature.is_empty() || feature == PLACEHOLDER {
            self.0.remove(&group);
        } else {
            self.0.insert(group, feature);
        }
    }

    pub fn with(mut self, group: impl Into<String>, feature: impl Into<String>) -> Self {
        self.choose(group, feature);
        self
    }

    pub fn get(&self, group: &str) -> Option<&str> {
        self.0.get(group).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(g, f)| (g.as_str(), f.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Single encoded row: every feature name with a 0/1 value, in feature-list order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputVector {
    columns: Vec<String>,
    values: Vec<u8>,
}

impl InputVector {
    pub(crate) fn new(columns: Vec<String>, values: Vec<u8>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<u8> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| self.values[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Numeric row handed to the classifier.
    pub fn as_row(&self) -> Vec<f64> {
        self.values.iter().map(|&v| f64::from(v)).collect()
    }
}

/// Repository contract for the feature-list artifact.
pub trait FeatureRepo {
    fn load_features(&self) -> DashResult<FeatureList>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_key_takes_text_before_first_underscore() {
        assert_eq!(group_key("age_young"), "age");
        assert_eq!(group_key("loan_purpose_home"), "loan");
        assert_eq!(group_key("_hidden"), "");
        assert_eq!(group_key("tenure"), FALLBACK_GROUP);
    }

    #[test]
    fn empty_choice_clears_group() {
        let mut sel = Selections::none().with("age", "age_old");
        sel.choose("age", "");
        assert!(sel.is_empty());
    }

    #[test]
    fn decoded_empty_choices_mean_none() {
        let sel: Selections =
            serde_json::from_str(r#"{"age": "age_old", "income": ""}"#).unwrap();
        assert_eq!(sel, Selections::none().with("age", "age_old"));
    }

    #[test]
    fn placeholder_choice_means_none() {
        let mut sel = Selections::none().with("income", "income_high");
        sel.choose("income", PLACEHOLDER);
        assert_eq!(sel.get("income"), None);

        let sel: Selections =
            serde_json::from_str(r#"{"age": "age_old", "income": "Select..."}"#).unwrap();
        assert_eq!(sel, Selections::none().with("age", "age_old"));
    }

    #[test]
    fn later_choice_replaces_earlier() {
        let sel = Selections::none()
            .with("age", "age_old")
            .with("age", "age_young");
        assert_eq!(sel.get("age"), Some("age_young"));
    }

    #[test]
    fn split_columns_handles_small_inputs() {
        let group = |key: &str| FeatureGroup {
            key: key.to_string(),
            features: vec![],
        };
        let empty = FeatureGroups::default();
        let (left, right) = empty.split_columns();
        assert!(left.is_empty() && right.is_empty());

        let one = FeatureGroups::from_sorted(vec![group("a")]);
        let (left, right) = one.split_columns();
        assert_eq!((left.len(), right.len()), (1, 0));

        let five = FeatureGroups::from_sorted(["a", "b", "c", "d", "e"].map(group).to_vec());
        let (left, right) = five.split_columns();
        assert_eq!((left.len(), right.len()), (2, 3));
    }

    #[test]
    fn duplicate_detection() {
        assert_eq!(FeatureList::new(["a_x", "b_y"]).first_duplicate(), None);
        assert_eq!(
            FeatureList::new(["a_x", "b_y", "a_x"]).first_duplicate(),
            Some("a_x")
        );
    }
}
