//! Battle generation: validate, filter, select, then draw display attributes.

use tracing::{info, warn};

use crate::domain::{BattleMode, BattleResult, Catalog, GameMode, PlayerConfig, SelectionRequest};
use crate::error::SelectionError;
use crate::filter::filter_by_price_range;
use crate::rng::RandomSource;
use crate::selector::select_cases_for_battle;

/// Generate one battle from `catalog`.
///
/// Fails on an invalid request or an empty price band. A catalog too small
/// to fill every slot still yields a battle, flagged by
/// [`BattleResult::is_exhausted`].
///
/// Randomness is consumed in a fixed order (selection, game mode, player
/// configuration), so a seeded source reproduces the whole battle.
pub fn generate_battle<R: RandomSource + ?Sized>(
    catalog: &Catalog,
    request: &SelectionRequest,
    mode: BattleMode,
    rng: &mut R,
) -> Result<BattleResult, SelectionError> {
    request.validate()?;

    let filtered = filter_by_price_range(catalog, request.price_band)?;
    let cases = select_cases_for_battle(
        &filtered,
        request.target_count,
        request.target_value,
        request.allow_duplicates,
        request.duplicate_count,
        rng,
    );

    let game_mode = GameMode::ALL[rng.next_index(GameMode::ALL.len())];
    let player_config = match mode {
        BattleMode::Fixed(config) => config,
        BattleMode::Random => PlayerConfig::ALL[rng.next_index(PlayerConfig::ALL.len())],
    };

    let battle = BattleResult::new(cases, request.target_count, game_mode, player_config);

    if battle.is_exhausted() {
        warn!(
            requested = battle.requested_cases,
            selected = battle.total_cases,
            band = %request.price_band,
            "not enough cases in range to fill every slot"
        );
    }
    info!(
        cases = battle.total_cases,
        total_value = battle.total_value,
        target_value = request.target_value,
        game_mode = %battle.game_mode,
        players = %battle.player_config,
        "battle generated"
    );

    Ok(battle)
}
