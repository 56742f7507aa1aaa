//! Case selector: duplicate seeding and the tolerance-ladder variety picker.
//!
//! Every slot is matched against an anchor price (the target value divided by
//! the slots left to fill). The variety picker walks a ladder of widening
//! tolerances and picks at random among the few closest unused cases at the
//! first rung that has any, so selections stay near the target without
//! repeating the same handful of cases every spin.

use tracing::{debug, trace};

use crate::domain::{CatalogItem, Selection};
use crate::rng::RandomSource;

/// Widening price tolerances, as fractions of the anchor price.
pub const TOLERANCE_LADDER: [f64; 8] = [0.10, 0.20, 0.40, 0.60, 0.80, 1.00, 1.50, 2.00];

/// Closest candidates considered per slot by the variety picker.
pub const VARIETY_TOP_K: usize = 3;

/// Closest candidates considered when choosing the duplicate seed.
pub const SEED_TOP_K: usize = 5;

/// The duplicate seed must lie within this fraction of the anchor.
pub const SEED_TOLERANCE: f64 = 0.30;

/// Floor for anchor prices; zero or negative anchors are lifted to this.
pub const MIN_ANCHOR_PRICE: f64 = 0.01;

/// A case repeated across several slots.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateSeed {
    pub item: CatalogItem,
    pub copies: usize,
}

/// Lift degenerate anchors (zero, negative, NaN) to [`MIN_ANCHOR_PRICE`].
pub fn clamp_anchor(anchor: f64) -> f64 {
    // f64::max ignores a NaN operand.
    anchor.max(MIN_ANCHOR_PRICE)
}

/// Copy of `items` ordered by ascending distance to `anchor`.
///
/// The sort is stable: equally distant cases keep their relative order.
pub fn sort_by_distance(items: &[CatalogItem], anchor: f64) -> Vec<CatalogItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| a.distance_to(anchor).total_cmp(&b.distance_to(anchor)));
    sorted
}

/// Pick up to `count` distinct cases from `sorted`, matching each to `anchor`.
///
/// `sorted` is ordered by distance to some anchor price, usually `anchor`
/// itself; "closest" below means earliest in that order. Per slot:
///
/// 1. Walk [`TOLERANCE_LADDER`]; at tolerance `t` the candidates are unused
///    cases priced in `[anchor * (1 - t), anchor * (1 + t)]`.
/// 2. At the first rung with candidates, pick uniformly among the first
///    [`VARIETY_TOP_K`] of them.
/// 3. If no rung matches, take the first unused case.
///
/// Each position of `sorted` is used at most once, so the result is shorter
/// than `count` when `sorted` runs out.
pub fn select_varied_cases<R: RandomSource + ?Sized>(
    sorted: &[CatalogItem],
    count: usize,
    anchor: f64,
    rng: &mut R,
) -> Selection {
    let anchor = clamp_anchor(anchor);
    let mut used = vec![false; sorted.len()];
    let mut selected = Vec::with_capacity(count.min(sorted.len()));

    for slot in 0..count {
        let Some(index) = pick_slot(sorted, &used, anchor, rng) else {
            debug!(slot, count, "catalog exhausted before all slots were filled");
            break;
        };
        used[index] = true;
        selected.push(sorted[index].clone());
    }

    selected
}

fn pick_slot<R: RandomSource + ?Sized>(
    sorted: &[CatalogItem],
    used: &[bool],
    anchor: f64,
    rng: &mut R,
) -> Option<usize> {
    for &tolerance in &TOLERANCE_LADDER {
        let min = anchor * (1.0 - tolerance);
        let max = anchor * (1.0 + tolerance);

        let candidates: Vec<usize> = sorted
            .iter()
            .enumerate()
            .filter(|(i, item)| !used[*i] && item.priced_within(min, max))
            .map(|(i, _)| i)
            .take(VARIETY_TOP_K)
            .collect();

        if !candidates.is_empty() {
            let index = candidates[rng.next_index(candidates.len())];
            trace!(
                tolerance,
                anchor,
                case = %sorted[index].name,
                price = sorted[index].price,
                "slot matched"
            );
            return Some(index);
        }
    }

    // Nothing within 200% of the anchor: fall back to catalog order.
    let index = used.iter().position(|&u| !u)?;
    trace!(anchor, case = %sorted[index].name, "slot filled outside tolerance ladder");
    Some(index)
}

/// Choose the case to repeat when duplicate seeding is on.
///
/// Candidates are the cases of `sorted` within [`SEED_TOLERANCE`] of
/// `anchor`; the seed is drawn uniformly from the first [`SEED_TOP_K`]. It is
/// repeated `min(duplicate_count, target_count)` times. Returns `None` when no
/// case is close enough.
pub fn seed_duplicates<R: RandomSource + ?Sized>(
    sorted: &[CatalogItem],
    anchor: f64,
    duplicate_count: usize,
    target_count: usize,
    rng: &mut R,
) -> Option<DuplicateSeed> {
    let min = anchor * (1.0 - SEED_TOLERANCE);
    let max = anchor * (1.0 + SEED_TOLERANCE);

    let suitable: Vec<&CatalogItem> = sorted
        .iter()
        .filter(|item| item.priced_within(min, max))
        .take(SEED_TOP_K)
        .collect();

    if suitable.is_empty() {
        debug!(anchor, "no case close enough to seed duplicates");
        return None;
    }

    let item = suitable[rng.next_index(suitable.len())].clone();
    let copies = duplicate_count.min(target_count);
    debug!(case = %item.name, price = item.price, copies, "seeded duplicates");
    Some(DuplicateSeed { item, copies })
}

/// Select the cases for one battle.
///
/// `catalog` is normally the output of the price-range filter. The caller
/// guarantees `target_count >= 1` and `target_value > 0`
/// (`SelectionRequest::validate`).
///
/// Without duplicates (or when `duplicate_count <= 1`) every slot goes
/// through the variety picker at `target_value / target_count`. With
/// duplicates, a seed case fills its copies first and the remaining slots
/// are matched against the value still left to spend. If no seed qualifies
/// the whole battle falls back to the variety picker.
pub fn select_cases_for_battle<R: RandomSource + ?Sized>(
    catalog: &[CatalogItem],
    target_count: usize,
    target_value: f64,
    allow_duplicates: bool,
    duplicate_count: usize,
    rng: &mut R,
) -> Selection {
    let anchor = target_value / target_count as f64;
    let sorted = sort_by_distance(catalog, anchor);

    let seed = if allow_duplicates && duplicate_count > 1 {
        seed_duplicates(&sorted, anchor, duplicate_count, target_count, rng)
    } else {
        None
    };

    let mut selected = match seed {
        Some(DuplicateSeed { item, copies }) => {
            let remaining = target_count - copies;
            let remaining_value = target_value - item.price * copies as f64;
            let mut selected = vec![item; copies];

            if remaining > 0 {
                let remaining_anchor = clamp_anchor(remaining_value / remaining as f64);
                debug!(remaining, remaining_anchor, "filling slots after seed");
                // Candidates keep their order by distance to the original anchor.
                selected.extend(select_varied_cases(
                    &sorted,
                    remaining,
                    remaining_anchor,
                    rng,
                ));
            }
            selected
        }
        None => select_varied_cases(&sorted, target_count, anchor, rng),
    };

    selected.truncate(target_count);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn item(name: &str, price: f64) -> CatalogItem {
        CatalogItem::new(name, price, "")
    }

    fn names(selection: &[CatalogItem]) -> Vec<&str> {
        selection.iter().map(|c| c.name.as_str()).collect()
    }

    // ── Variety picker ───────────────────────────────────────────

    #[test]
    fn picks_closest_within_first_tolerance() {
        let sorted = sort_by_distance(
            &[item("A", 10.0), item("B", 50.0), item("C", 95.0), item("D", 110.0)],
            100.0,
        );
        let mut rng = ScriptedRandom::constant(0.0);
        let picked = select_varied_cases(&sorted, 2, 100.0, &mut rng);
        assert_eq!(names(&picked), vec!["C", "D"]);
    }

    #[test]
    fn random_draw_only_reaches_top_three() {
        let sorted = sort_by_distance(
            &[
                item("P1", 100.0),
                item("P2", 101.0),
                item("P3", 102.0),
                item("P4", 103.0),
            ],
            100.0,
        );
        // 0.99 maps to the last of at most three candidates.
        let mut rng = ScriptedRandom::constant(0.99);
        let picked = select_varied_cases(&sorted, 1, 100.0, &mut rng);
        assert_eq!(names(&picked), vec!["P3"]);
    }

    #[test]
    fn widens_tolerance_only_when_needed() {
        // Nothing within 10% or 20%; 150 is within 60%.
        let sorted = sort_by_distance(&[item("Far", 400.0), item("Near", 150.0)], 100.0);
        let mut rng = ScriptedRandom::constant(0.0);
        let picked = select_varied_cases(&sorted, 1, 100.0, &mut rng);
        assert_eq!(names(&picked), vec!["Near"]);
    }

    #[test]
    fn falls_back_to_first_unused_outside_ladder() {
        // 1000 is more than 200% above the anchor of 100.
        let sorted = sort_by_distance(&[item("Huge", 1000.0), item("Giant", 5000.0)], 100.0);
        let mut rng = ScriptedRandom::constant(0.0);
        let picked = select_varied_cases(&sorted, 2, 100.0, &mut rng);
        assert_eq!(names(&picked), vec!["Huge", "Giant"]);
    }

    #[test]
    fn never_reuses_a_position() {
        let sorted = sort_by_distance(&[item("Only", 100.0)], 100.0);
        let mut rng = ScriptedRandom::constant(0.0);
        let picked = select_varied_cases(&sorted, 5, 100.0, &mut rng);
        assert_eq!(names(&picked), vec!["Only"]);
    }

    #[test]
    fn equal_items_at_different_positions_can_both_be_used() {
        let sorted = sort_by_distance(&[item("Twin", 100.0), item("Twin", 100.0)], 100.0);
        let mut rng = ScriptedRandom::constant(0.5);
        let picked = select_varied_cases(&sorted, 3, 100.0, &mut rng);
        assert_eq!(names(&picked), vec!["Twin", "Twin"]);
    }

    #[test]
    fn empty_input_gives_empty_selection() {
        let mut rng = ScriptedRandom::constant(0.0);
        assert!(select_varied_cases(&[], 4, 100.0, &mut rng).is_empty());
    }

    #[test]
    fn degenerate_anchor_is_clamped() {
        assert_eq!(clamp_anchor(-40.0), MIN_ANCHOR_PRICE);
        assert_eq!(clamp_anchor(0.0), MIN_ANCHOR_PRICE);
        assert_eq!(clamp_anchor(f64::NAN), MIN_ANCHOR_PRICE);
        assert_eq!(clamp_anchor(12.5), 12.5);

        let sorted = sort_by_distance(&[item("Cheap", 1.0), item("Dear", 90.0)], 0.0);
        let mut rng = ScriptedRandom::constant(0.0);
        let picked = select_varied_cases(&sorted, 2, -25.0, &mut rng);
        assert_eq!(names(&picked), vec!["Cheap", "Dear"]);
    }

    // ── Duplicate seeding ────────────────────────────────────────

    #[test]
    fn seed_requires_thirty_percent_band() {
        let sorted = sort_by_distance(&[item("Low", 60.0), item("High", 140.0)], 100.0);
        let mut rng = ScriptedRandom::constant(0.0);
        assert!(seed_duplicates(&sorted, 100.0, 3, 5, &mut rng).is_none());
    }

    #[test]
    fn seed_copies_capped_by_target_count() {
        let sorted = sort_by_distance(&[item("Fit", 100.0)], 100.0);
        let mut rng = ScriptedRandom::constant(0.0);
        let seed = seed_duplicates(&sorted, 100.0, 8, 3, &mut rng).unwrap();
        assert_eq!(seed.copies, 3);
        assert_eq!(seed.item.name, "Fit");
    }

    #[test]
    fn seed_drawn_from_closest_five() {
        let items: Vec<CatalogItem> = (0..8)
            .map(|i| item(&format!("S{i}"), 100.0 + i as f64))
            .collect();
        let sorted = sort_by_distance(&items, 100.0);
        let mut rng = ScriptedRandom::constant(0.999);
        let seed = seed_duplicates(&sorted, 100.0, 2, 4, &mut rng).unwrap();
        assert_eq!(seed.item.name, "S4");
    }

    #[test]
    fn duplicates_then_varied_against_remaining_anchor() {
        // anchor 50; seed 40 → remaining anchor (250 - 120) / 2 = 65
        let catalog = vec![
            item("Seed", 40.0),
            item("X", 64.0),
            item("Y", 66.0),
            item("Z", 70.0),
            item("W", 10.0),
        ];
        let mut rng = ScriptedRandom::constant(0.0);
        let picked = select_cases_for_battle(&catalog, 5, 250.0, true, 3, &mut rng);
        assert_eq!(names(&picked), vec!["Seed", "Seed", "Seed", "X", "Y"]);
    }

    #[test]
    fn no_seed_falls_back_to_variety() {
        let catalog = vec![item("A", 10.0), item("B", 500.0)];
        let mut rng = ScriptedRandom::constant(0.0);
        let picked = select_cases_for_battle(&catalog, 2, 200.0, true, 2, &mut rng);
        assert_eq!(picked.len(), 2);
        assert_ne!(picked[0].name, picked[1].name);
    }

    #[test]
    fn duplicate_count_of_one_disables_seeding() {
        let catalog = vec![item("A", 100.0), item("B", 100.0)];
        let mut rng = ScriptedRandom::constant(0.0);
        let picked = select_cases_for_battle(&catalog, 2, 200.0, true, 1, &mut rng);
        assert_eq!(names(&picked), vec!["A", "B"]);
    }

    #[test]
    fn overshooting_seed_still_fills_remaining_slots() {
        // Seed at 128 x4 = 512 > 500; the last slot's anchor is negative, so
        // nothing is on the ladder and the first case by original distance wins.
        let catalog = vec![item("Big", 128.0), item("Tiny", 1.0), item("Small", 5.0)];
        let mut rng = ScriptedRandom::constant(0.0);
        let picked = select_cases_for_battle(&catalog, 5, 500.0, true, 4, &mut rng);
        assert_eq!(picked.len(), 5);
        assert_eq!(names(&picked), vec!["Big", "Big", "Big", "Big", "Big"]);
    }

    #[test]
    fn remaining_slots_keep_original_distance_order() {
        // anchor 50 orders the list P59, S, P60, P69.5, P70. S is seeded, the
        // remaining anchor is 65, and the top three at 10% are taken in that
        // original order: P59, P60, P69.5.
        let catalog = vec![
            item("P59", 59.0),
            item("S", 40.0),
            item("P60", 60.0),
            item("P69.5", 69.5),
            item("P70", 70.0),
        ];
        let mut rng = ScriptedRandom::new(vec![0.4, 0.99, 0.99]);
        let picked = select_cases_for_battle(&catalog, 5, 250.0, true, 3, &mut rng);
        assert_eq!(names(&picked), vec!["S", "S", "S", "P69.5", "P70"]);
    }

    #[test]
    fn seed_covers_every_slot() {
        let catalog = vec![item("Fit", 100.0), item("Other", 95.0)];
        let mut rng = ScriptedRandom::constant(0.0);
        let picked = select_cases_for_battle(&catalog, 2, 200.0, true, 5, &mut rng);
        assert_eq!(names(&picked), vec!["Fit", "Fit"]);
    }

    // ── Determinism ──────────────────────────────────────────────

    #[test]
    fn same_seed_same_selection() {
        let catalog: Vec<CatalogItem> = (1..=40)
            .map(|i| item(&format!("Case {i}"), i as f64 * 7.5))
            .collect();
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        let a = select_cases_for_battle(&catalog, 8, 600.0, true, 3, &mut rng1);
        let b = select_cases_for_battle(&catalog, 8, 600.0, true, 3, &mut rng2);
        assert_eq!(a, b);
    }
}
