//! Feature grouping and form-to-vector encoding.

use std::collections::BTreeMap;

use crate::common::error::{DashError, DashResult};

use super::domain::{group_key, FeatureGroup, FeatureGroups, FeatureList, InputVector, Selections};

/// Partition feature names into prefix groups.
///
/// Groups are ordered case-insensitively by key (ties broken by the exact key);
/// members are sorted lexicographically. Never fails; an empty list gives no groups.
pub fn group_features<'a, I>(names: I) -> FeatureGroups
where
    I: IntoIterator<Item = &'a str>,
{
    let mut buckets: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for name in names {
        buckets
            .entry(group_key(name))
            .or_default()
            .push(name.to_string());
    }

    let mut groups: Vec<FeatureGroup> = buckets
        .into_iter()
        .map(|(key, mut features)| {
            features.sort();
            FeatureGroup {
                key: key.to_string(),
                features,
            }
        })
        .collect();
    groups.sort_by(|a, b| {
        a.key
            .to_lowercase()
            .cmp(&b.key.to_lowercase())
            .then_with(|| a.key.cmp(&b.key))
    });

    FeatureGroups::from_sorted(groups)
}

/// Check every choice names an existing group and one of its members.
pub fn check_selections(groups: &FeatureGroups, selections: &Selections) -> DashResult<()> {
    for (key, feature) in selections.iter() {
        let group = groups
            .get(key)
            .ok_or_else(|| DashError::invalid(format!("unknown feature group `{key}`")))?;
        if !group.contains(feature) {
            return Err(DashError::invalid(format!(
                "`{feature}` is not a member of group `{key}`"
            )));
        }
    }
    Ok(())
}

/// Build the one-hot row for `selections`, keyed and ordered exactly like `features`.
///
/// A feature is 1 only when it is the choice recorded for its own group, so each
/// group carries at most one 1. No selection at all yields an all-zero row.
pub fn encode(
    features: &FeatureList,
    groups: &FeatureGroups,
    selections: &Selections,
) -> DashResult<InputVector> {
    check_selections(groups, selections)?;

    let values = features
        .iter()
        .map(|name| u8::from(selections.get(group_key(name)) == Some(name)))
        .collect();

    Ok(InputVector::new(features.names().to_vec(), values))
}

#[cfg(test)]
mod tests {
    use proptest::collection::vec;
    use proptest::prelude::*;

    use super::*;
    use crate::features::domain::FALLBACK_GROUP;

    fn sample() -> FeatureList {
        FeatureList::new(["age_young", "age_old", "income_high"])
    }

    #[test]
    fn groups_sample_list() {
        let groups = group_features(sample().iter());
        let keys: Vec<_> = groups.keys().collect();
        assert_eq!(keys, ["age", "income"]);
        assert_eq!(groups.get("age").unwrap().features, ["age_old", "age_young"]);
        assert_eq!(groups.get("income").unwrap().features, ["income_high"]);
    }

    #[test]
    fn empty_list_yields_no_groups() {
        assert!(group_features(FeatureList::default().iter()).is_empty());
    }

    #[test]
    fn names_without_underscore_fall_into_catch_all() {
        let groups = group_features(["tenure", "score", "zip_north"]);
        let other = groups.get(FALLBACK_GROUP).unwrap();
        assert_eq!(other.features, ["score", "tenure"]);
    }

    #[test]
    fn keys_sort_case_insensitively() {
        let groups = group_features(["beta_x", "Alpha_y", "alpha_z", "Gamma_w"]);
        let keys: Vec<_> = groups.keys().collect();
        assert_eq!(keys, ["Alpha", "alpha", "beta", "Gamma"]);
    }

    #[test]
    fn encodes_sample_selection() {
        let features = sample();
        let groups = group_features(features.iter());
        let sel = Selections::none().with("age", "age_old");

        let row = encode(&features, &groups, &sel).unwrap();
        let pairs: Vec<_> = row.iter().collect();
        assert_eq!(
            pairs,
            [("age_young", 0), ("age_old", 1), ("income_high", 0)]
        );
    }

    #[test]
    fn empty_selection_is_all_zero() {
        let features = sample();
        let groups = group_features(features.iter());
        let row = encode(&features, &groups, &Selections::none()).unwrap();
        assert_eq!(row.len(), features.len());
        assert!(row.values().iter().all(|&v| v == 0));
    }

    #[test]
    fn rejects_choice_outside_group() {
        let features = sample();
        let groups = group_features(features.iter());
        let sel = Selections::none().with("age", "income_high");
        let err = encode(&features, &groups, &sel).unwrap_err();
        assert!(matches!(err, DashError::InvalidInput(_)));
    }

    #[test]
    fn rejects_unknown_group() {
        let features = sample();
        let groups = group_features(features.iter());
        let sel = Selections::none().with("region", "region_east");
        assert!(encode(&features, &groups, &sel).is_err());
    }

    fn feature_names() -> impl Strategy<Value = Vec<String>> {
        vec("[a-cA-C]{0,2}(_[a-z]{1,3})?", 0..24).prop_map(|mut names| {
            let mut seen = std::collections::HashSet::new();
            names.retain(|n| seen.insert(n.clone()));
            names
        })
    }

    proptest! {
        #[test]
        fn every_name_lands_in_exactly_one_group(names in feature_names()) {
            let groups = group_features(names.iter().map(String::as_str));
            for name in &names {
                let hits = groups.iter().filter(|g| g.contains(name)).count();
                prop_assert_eq!(hits, 1);
            }
            let total: usize = groups.iter().map(|g| g.features.len()).sum();
            prop_assert_eq!(total, names.len());
        }

        #[test]
        fn groups_and_members_are_sorted(names in feature_names()) {
            let groups = group_features(names.iter().map(String::as_str));
            let keys: Vec<String> = groups.keys().map(str::to_lowercase).collect();
            prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
            for group in groups.iter() {
                prop_assert!(group.features.windows(2).all(|w| w[0] <= w[1]));
            }
        }

        #[test]
        fn encoding_preserves_columns_and_one_hot(
            names in feature_names(),
            picks in vec(any::<prop::sample::Index>(), 0..8),
        ) {
            let features = FeatureList::new(names.clone());
            let groups = group_features(features.iter());
            let mut sel = Selections::none();
            if !groups.is_empty() {
                for pick in picks {
                    let group = &groups.as_slice()[pick.index(groups.len())];
                    if !group.features.is_empty() {
                        let feature = &group.features[pick.index(group.features.len())];
                        sel.choose(group.key.clone(), feature.clone());
                    }
                }
            }

            let row = encode(&features, &groups, &sel).unwrap();
            prop_assert_eq!(row.columns(), features.names());
            for group in groups.iter() {
                let ones: u32 = group
                    .features
                    .iter()
                    .map(|f| u32::from(row.get(f).unwrap()))
                    .sum();
                prop_assert!(ones <= 1);
                prop_assert_eq!(ones == 1, sel.get(&group.key).is_some());
            }
        }
    }
}
