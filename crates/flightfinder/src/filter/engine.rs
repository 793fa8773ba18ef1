//! The derive step: dataset + filter state → ordered visible subset.

use tracing::debug;

use super::state::FilterState;
use crate::dataset::Dataset;
use crate::experience::ExperienceRecord;

/// Filter and sort the dataset.
///
/// Keeps every record that passes all of `filters`' predicates, then orders
/// them by the chosen sort key. The sort is stable, so records with equal
/// keys keep their dataset order. The result depends only on the two inputs.
#[must_use]
pub fn derive<'a>(dataset: &'a Dataset, filters: &FilterState) -> Vec<&'a ExperienceRecord> {
    let mut subset: Vec<&ExperienceRecord> = dataset
        .experiences()
        .iter()
        .filter(|record| filters.matches(record))
        .collect();

    subset.sort_by(|a, b| filters.sort.compare(a, b));

    debug!(
        total = dataset.len(),
        visible = subset.len(),
        sort = %filters.sort,
        "Derived visible experiences"
    );
    subset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures;
    use crate::experience::{AircraftType, DriveCategory, ExperienceId};
    use crate::filter::state::{AerobaticsFilter, DurationBucket, SortKey};

    fn ids(subset: &[&ExperienceRecord]) -> Vec<ExperienceId> {
        subset.iter().map(|record| record.id).collect()
    }

    /// A spread of states covering every value of every dimension.
    fn state_grid() -> Vec<FilterState> {
        let mut states = Vec::new();
        let types = [
            None,
            Some(AircraftType::LightAircraft),
            Some(AircraftType::Vintage),
            Some(AircraftType::Other("airship".to_string())),
        ];
        let drives = [
            None,
            Some(DriveCategory::Under30),
            Some(DriveCategory::Under2Hr),
            Some(DriveCategory::Under1Hr),
        ];
        let landmarks = [
            None,
            Some("coast".to_string()),
            Some("nowhere".to_string()),
            Some("south-downs".to_string()),
        ];

        for budget in [50, 150, 500] {
            for show_over_budget in [false, true] {
                for duration in [
                    DurationBucket::Any,
                    DurationBucket::Under30,
                    DurationBucket::From30To60,
                    DurationBucket::SixtyPlus,
                ] {
                    for aerobatics in [
                        AerobaticsFilter::Any,
                        AerobaticsFilter::Yes,
                        AerobaticsFilter::No,
                    ] {
                        for (i, aircraft_type) in types.iter().enumerate() {
                            states.push(FilterState {
                                budget,
                                show_over_budget,
                                duration,
                                aerobatics,
                                aircraft_type: aircraft_type.clone(),
                                drive: drives[i],
                                landmark: landmarks[(i + usize::from(show_over_budget)) % 4]
                                    .clone(),
                                sort: SortKey::ALL[i % SortKey::ALL.len()],
                            });
                        }
                    }
                }
            }
        }
        states
    }

    /// Each filter clause written out on its own, without `FilterState::matches`.
    fn passes_every_clause(state: &FilterState, record: &ExperienceRecord) -> bool {
        let budget = state.show_over_budget || record.price <= state.budget;
        let duration = match state.duration {
            DurationBucket::Any => true,
            DurationBucket::Under30 => record.duration < 30,
            DurationBucket::From30To60 => record.duration >= 30 && record.duration <= 60,
            DurationBucket::SixtyPlus => record.duration >= 60,
        };
        let aerobatics = match state.aerobatics {
            AerobaticsFilter::Any => true,
            AerobaticsFilter::Yes => record.has_aerobatics,
            AerobaticsFilter::No => !record.has_aerobatics,
        };
        let aircraft_type = match &state.aircraft_type {
            None => true,
            Some(kind) => record.aircraft_type == *kind,
        };
        let drive_order = [
            DriveCategory::Under30,
            DriveCategory::Under1Hr,
            DriveCategory::Under2Hr,
            DriveCategory::Under3Hr,
        ];
        let position = |category| drive_order.iter().position(|c| *c == category);
        let drive = match state.drive {
            None => true,
            Some(ceiling) => position(record.drive_category) <= position(ceiling),
        };
        let landmark = match &state.landmark {
            None => true,
            Some(tag) => record.landmarks.iter().any(|l| l == tag),
        };
        budget && duration && aerobatics && aircraft_type && drive && landmark
    }

    #[test]
    fn test_derive_is_sound_and_exhaustive() {
        let dataset = fixtures::catalog();
        for state in state_grid() {
            let subset = derive(&dataset, &state);
            let visible = ids(&subset);

            for record in dataset.experiences() {
                assert_eq!(
                    visible.contains(&record.id),
                    passes_every_clause(&state, record),
                    "record {} under {state:?}",
                    record.id
                );
            }
            assert_eq!(subset.len(), visible.len());
        }
    }

    #[test]
    fn test_aircraft_type_filter() {
        let dataset = fixtures::catalog();
        let mut state = FilterState {
            show_over_budget: true,
            aircraft_type: Some(AircraftType::LightAircraft),
            ..FilterState::default()
        };
        assert_eq!(ids(&derive(&dataset, &state)), vec![6, 1]);

        state.aircraft_type = Some(AircraftType::Helicopter);
        assert_eq!(ids(&derive(&dataset, &state)), vec![4]);

        state.aircraft_type = Some(AircraftType::Other("airship".to_string()));
        assert!(derive(&dataset, &state).is_empty());
    }

    #[test]
    fn test_drive_ceiling_includes_nearer_categories() {
        let dataset = fixtures::catalog();
        let state = FilterState {
            show_over_budget: true,
            drive: Some(DriveCategory::Under1Hr),
            ..FilterState::default()
        };
        assert_eq!(ids(&derive(&dataset, &state)), vec![2, 6, 1, 3]);
    }

    #[test]
    fn test_default_state_excludes_over_budget() {
        let dataset = fixtures::catalog();
        let subset = derive(&dataset, &FilterState::default());
        assert_eq!(ids(&subset), vec![2, 6, 1, 4, 3]);
    }

    #[test]
    fn test_sort_orders_are_stable() {
        let dataset = fixtures::catalog();
        let expected: [(SortKey, Vec<ExperienceId>); 7] = [
            (SortKey::PriceAsc, vec![2, 6, 1, 4, 3, 5]),
            (SortKey::PriceDesc, vec![5, 3, 1, 4, 2, 6]),
            (SortKey::CostPerMinAsc, vec![6, 4, 2, 1, 3, 5]),
            (SortKey::DurationAsc, vec![2, 1, 4, 3, 6, 5]),
            (SortKey::DurationDesc, vec![5, 3, 6, 4, 1, 2]),
            (SortKey::DriveAsc, vec![1, 3, 2, 6, 4, 5]),
            (SortKey::DriveDesc, vec![5, 4, 2, 6, 1, 3]),
        ];

        for (sort, order) in expected {
            let state = FilterState {
                show_over_budget: true,
                sort,
                ..FilterState::default()
            };
            assert_eq!(ids(&derive(&dataset, &state)), order, "sort {sort}");
        }
    }

    #[test]
    fn test_every_sort_key_orders_output() {
        let dataset = fixtures::catalog();
        for state in state_grid() {
            let subset = derive(&dataset, &state);
            for pair in subset.windows(2) {
                assert!(state.sort.compare(pair[0], pair[1]).is_le());
            }
        }
    }

    #[test]
    fn test_show_over_budget_includes_pricier_record() {
        let dataset = fixtures::catalog();
        let mut state = FilterState {
            budget: 100,
            ..FilterState::default()
        };
        assert!(!ids(&derive(&dataset, &state)).contains(&1));

        state.show_over_budget = true;
        assert!(ids(&derive(&dataset, &state)).contains(&1));
    }

    #[test]
    fn test_reset_reproduces_default_subset() {
        let dataset = fixtures::catalog();
        let baseline = ids(&derive(&dataset, &FilterState::default()));

        let mut state = FilterState {
            budget: 90,
            show_over_budget: true,
            duration: DurationBucket::SixtyPlus,
            aerobatics: AerobaticsFilter::Yes,
            aircraft_type: Some(AircraftType::Vintage),
            drive: Some(DriveCategory::Under3Hr),
            landmark: Some("castle".to_string()),
            sort: SortKey::DriveDesc,
        };
        assert_ne!(ids(&derive(&dataset, &state)), baseline);

        state.reset();
        assert_eq!(ids(&derive(&dataset, &state)), baseline);
    }

    #[test]
    fn test_landmark_filter() {
        let dataset = fixtures::catalog();
        let state = FilterState {
            landmark: Some("south-downs".to_string()),
            ..FilterState::default()
        };
        assert_eq!(ids(&derive(&dataset, &state)), vec![2, 6]);
    }

    #[test]
    fn test_no_matches_is_empty() {
        let dataset = fixtures::catalog();
        let state = FilterState {
            budget: 10,
            ..FilterState::default()
        };
        assert!(derive(&dataset, &state).is_empty());
    }
}
