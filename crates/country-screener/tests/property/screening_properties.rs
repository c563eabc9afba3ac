use country_screener::factbook::{
    CountryRecord, ExtractedIndicators, IndicatorExtractor, IndicatorSnapshot,
};
use country_screener::rating::{CreditStanding, FitchRating};
use country_screener::screening::{
    intersect_all, FilterEngine, Rankings, ScoringEngine, Thresholds,
};
use proptest::prelude::*;
use serde_json::json;
use std::collections::{BTreeSet, HashSet};

const RESOURCES: [&str; 6] = ["oil", "gas", "gold", "coal", "timber", "copper"];

fn standing() -> impl Strategy<Value = CreditStanding> {
    (0u8..=17).prop_map(|rank| {
        FitchRating::from_rank(rank)
            .map(CreditStanding::Rated)
            .unwrap_or(CreditStanding::BelowScale)
    })
}

fn resource_set() -> impl Strategy<Value = BTreeSet<String>> {
    proptest::sample::subsequence(RESOURCES.to_vec(), 0..=RESOURCES.len())
        .prop_map(|picked| {
            picked
                .into_iter()
                .map(String::from)
                .collect::<BTreeSet<String>>()
        })
}

fn indicators() -> impl Strategy<Value = ExtractedIndicators> {
    (
        proptest::option::of(0u64..3_000_000_000),
        proptest::option::of(-20.0f64..20.0),
        proptest::option::of(-20.0f64..20.0),
        standing(),
        resource_set(),
    )
        .prop_map(|(population, primary, secondary, credit_standing, natural_resources)| {
            ExtractedIndicators {
                population,
                gdp_growth_primary: primary,
                gdp_growth_secondary: secondary,
                credit_standing,
                natural_resources,
            }
        })
}

fn snapshots() -> impl Strategy<Value = Vec<IndicatorSnapshot>> {
    proptest::collection::vec(indicators(), 0..12).prop_map(|all| {
        all.into_iter()
            .enumerate()
            .map(|(index, indicators)| IndicatorSnapshot::new(format!("C{index:02}"), indicators))
            .collect()
    })
}

fn thresholds() -> impl Strategy<Value = Thresholds> {
    (
        -1_000i64..2_000_000_000,
        -10.0f64..10.0,
        -10.0f64..10.0,
        1u8..=17,
        resource_set(),
    )
        .prop_map(|(population, primary, secondary, rank, resources)| Thresholds {
            population,
            gdp_growth_primary: primary,
            gdp_growth_secondary: secondary,
            credit_rating: FitchRating::from_rank(rank).expect("rank within scale"),
            resources,
        })
}

fn rankings() -> impl Strategy<Value = Rankings> {
    Just(vec![1u8, 2, 3, 4, 5])
        .prop_shuffle()
        .prop_map(|ranks| {
            let ranks: [u8; 5] = ranks.try_into().expect("five ranks");
            Rankings::new(ranks).expect("shuffled permutation")
        })
}

fn id_sets() -> impl Strategy<Value = Vec<HashSet<String>>> {
    proptest::collection::vec(
        proptest::collection::hash_set("[a-e]", 0..5),
        1..5,
    )
}

proptest! {
    #[test]
    fn score_is_always_within_bounds(
        snapshots in snapshots(),
        thresholds in thresholds(),
        rankings in rankings(),
    ) {
        let engine = ScoringEngine::new(thresholds, rankings);
        for result in engine.rank(&snapshots) {
            prop_assert!(
                (0.0..=100.0).contains(&result.score),
                "score {} out of range for {}",
                result.score,
                result.country
            );
        }
    }

    #[test]
    fn ranking_keeps_every_country_in_descending_order(
        snapshots in snapshots(),
        thresholds in thresholds(),
        rankings in rankings(),
    ) {
        let ranked = ScoringEngine::new(thresholds, rankings).rank(&snapshots);
        prop_assert_eq!(ranked.len(), snapshots.len());
        prop_assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn filter_matches_are_a_subset_that_scores_positive_on_rating(
        snapshots in snapshots(),
        thresholds in thresholds(),
    ) {
        let outcome = FilterEngine::new(thresholds.clone()).run(&snapshots);
        let ids: HashSet<&str> = snapshots.iter().map(|s| s.country.as_str()).collect();
        for matched in &outcome.matches {
            prop_assert!(ids.contains(matched.country.as_str()));
            prop_assert!(matched.credit_rating > thresholds.credit_rating);
            prop_assert!(!matched.matched_resources.is_empty());
            prop_assert!(thresholds.population_exceeds(matched.population));
        }
        prop_assert_eq!(FilterEngine::new(thresholds).run(&snapshots), outcome);
    }

    #[test]
    fn intersection_is_order_independent(sets in id_sets()) {
        let borrowed: Vec<HashSet<&str>> = sets
            .iter()
            .map(|set| set.iter().map(String::as_str).collect())
            .collect();
        let mut reversed = borrowed.clone();
        reversed.reverse();
        let mut rotated = borrowed.clone();
        rotated.rotate_left(1);

        let forward = intersect_all(&borrowed);
        prop_assert_eq!(&forward, &intersect_all(&reversed));
        prop_assert_eq!(&forward, &intersect_all(&rotated));
    }

    #[test]
    fn extraction_never_panics_on_arbitrary_text(
        population in ".{0,24}",
        growth in ".{0,24}",
        rating in ".{0,24}",
        resources in ".{0,48}",
    ) {
        let record = CountryRecord::new(
            "Fuzz",
            json!({
                "People and Society": { "Population": { "total": { "text": population } } },
                "Economy": {
                    "Real GDP growth rate": { "Real GDP growth rate 2023": { "text": growth } },
                    "Credit ratings": { "Fitch rating": { "text": rating } }
                },
                "Geography": { "Natural resources": { "text": resources } }
            }),
        );
        let indicators = IndicatorExtractor::default().extract(&record);
        prop_assert!(indicators.gdp_growth_primary.map_or(true, f64::is_finite));
        prop_assert!(indicators
            .natural_resources
            .iter()
            .all(|resource| !resource.is_empty() && resource.trim() == resource));
    }
}
