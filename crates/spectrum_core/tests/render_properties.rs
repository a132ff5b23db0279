use proptest::prelude::*;
use spectrum_core::{Score, Shape, TraitEntry, TraitSet, label_offset, render, tick_label, trait_color};

fn trait_set_strategy() -> impl Strategy<Value = TraitSet> {
    prop::collection::vec(("[A-Za-z][A-Za-z ]{0,11}", -10i8..=10), 0..24).prop_map(|rows| {
        rows.into_iter()
            .filter_map(|(label, halves)| {
                TraitEntry::new(&label, Score::from_halves(halves).ok()?).ok()
            })
            .collect()
    })
}

#[test]
fn scenario_opposite_poles_cancel_out() {
    let set = TraitSet::from_pairs([("Nurturing", -4.5), ("Stoic", 4.5)]).unwrap();
    let scene = render(&set);

    assert_eq!(scene.mean_value(), 0.0);
    assert_eq!(scene.mean.from.x, 0.0);
    assert_eq!(scene.mean.label.text, "Mean: 0.0");
    let xs: Vec<f64> = scene.bubbles.iter().map(|b| b.center.x).collect();
    assert_eq!(xs, [-4.5, 4.5]);
}

#[test]
fn scenario_empty_input_still_draws_the_scale() {
    let scene = render(&TraitSet::new());

    assert_eq!(scene.mean_value(), 0.0);
    assert_eq!(scene.mean.label.text, "Mean: 0.0");
    assert!(scene.bubbles.is_empty());
    assert_eq!(scene.ticks.len(), 11);
    assert_eq!(scene.bands.len(), 11);
    assert_eq!(scene.spectrum_line.from.x, -5.0);
    assert_eq!(scene.spectrum_line.to.x, 5.0);

    let markers = scene
        .shapes()
        .iter()
        .filter(|s| matches!(s, Shape::Marker { size, .. } if *size > 4.0))
        .count();
    assert_eq!(markers, 0);
}

#[test]
fn scenario_mean_rounds_to_one_decimal() {
    let set =
        TraitSet::from_pairs([("Assertive", 4.0), ("Charismatic", 2.5), ("Ambitious", 3.5)])
            .unwrap();
    let scene = render(&set);

    assert!((scene.mean_value() - 10.0 / 3.0).abs() < 1e-12);
    assert_eq!(scene.mean.label.text, "Mean: 3.3");
}

#[test]
fn tick_labels_match_integer_positions() {
    let scene = render(&TraitSet::new());
    for tick in &scene.ticks {
        assert_eq!(tick.label.text, tick_label(tick.value));
        assert_eq!(tick.label.position.x, f64::from(tick.value));
    }
    assert_eq!(tick_label(-3), "3F");
    assert_eq!(tick_label(0), "0");
    assert_eq!(tick_label(2), "2M");
}

proptest! {
    #[test]
    fn mean_matches_arithmetic_mean(set in trait_set_strategy()) {
        let scene = render(&set);
        if set.is_empty() {
            prop_assert_eq!(scene.mean_value(), 0.0);
        } else {
            let sum: f64 = set.iter().map(|e| e.score().value()).sum();
            let expected = sum / set.len() as f64;
            prop_assert!((scene.mean_value() - expected).abs() < 1e-9);
        }
        prop_assert_eq!(scene.mean.from.x, scene.mean_value());
        prop_assert_eq!(scene.mean.label.text.clone(), format!("Mean: {:.1}", scene.mean_value()));
    }

    #[test]
    fn one_bubble_per_trait_at_its_score(set in trait_set_strategy()) {
        let scene = render(&set);
        prop_assert_eq!(scene.bubbles.len(), set.len());
        for (bubble, entry) in scene.bubbles.iter().zip(set.iter()) {
            prop_assert_eq!(bubble.center.x, entry.score().value());
            prop_assert_eq!(bubble.center.y, 0.4);
            prop_assert_eq!(bubble.label.text.as_str(), entry.label());
            prop_assert!(scene.viewport.contains(bubble.center));
        }
    }

    #[test]
    fn color_and_offset_depend_only_on_index(a in trait_set_strategy(), b in trait_set_strategy()) {
        let left = render(&a);
        let right = render(&b);
        for l in &left.bubbles {
            for r in &right.bubbles {
                if l.index % 10 == r.index % 10 {
                    prop_assert_eq!(l.label.color, r.label.color);
                }
                if l.index % 3 == r.index % 3 {
                    prop_assert_eq!(l.label.position.y, r.label.position.y);
                }
            }
            prop_assert_eq!(l.label.color, trait_color(l.index));
            prop_assert_eq!(l.label.position.y, label_offset(l.index));
        }
    }

    #[test]
    fn rendering_is_idempotent(set in trait_set_strategy()) {
        prop_assert_eq!(render(&set), render(&set));
    }
}
