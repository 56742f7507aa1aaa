//! Battle reports: plain text for the terminal and JSON for piping.

use casebattle_core::{BattleResult, CaseGroup, GameMode, PlayerConfig, SelectionRequest};
use serde::Serialize;

/// One numbered line of the report: a distinct case and its multiplier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub number: usize,
    pub name: String,
    pub image_url: String,
    pub unit_price: f64,
    pub count: usize,
    pub line_total: f64,
}

impl ReportLine {
    fn from_group(number: usize, group: &CaseGroup) -> Self {
        Self {
            number,
            name: group.item.name.clone(),
            image_url: group.item.image_url.clone(),
            unit_price: group.item.price,
            count: group.count,
            line_total: group.total_price(),
        }
    }
}

/// Display view of a generated battle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleReport {
    pub target_value: f64,
    /// Target value divided by the requested case count.
    pub per_case_target: f64,
    pub total_value: f64,
    pub total_cases: usize,
    pub requested_cases: usize,
    pub game_mode: GameMode,
    pub player_config: PlayerConfig,
    pub players: usize,
    pub lines: Vec<ReportLine>,
}

impl BattleReport {
    pub fn new(battle: &BattleResult, request: &SelectionRequest) -> Self {
        let lines = battle
            .groups()
            .iter()
            .enumerate()
            .map(|(i, group)| ReportLine::from_group(i + 1, group))
            .collect();
        Self {
            target_value: request.target_value,
            per_case_target: request.anchor_price(),
            total_value: battle.total_value,
            total_cases: battle.total_cases,
            requested_cases: battle.requested_cases,
            game_mode: battle.game_mode,
            player_config: battle.player_config,
            players: battle.player_config.player_count(),
            lines,
        }
    }

    /// Signed difference between the battle total and the target.
    pub fn deviation(&self) -> f64 {
        self.total_value - self.target_value
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let deviation = self.deviation();
        let mut out = format!(
            "Total value: {}\nTarget:      {} ({}{})\nPer case:    {}\nCases:       {}\n",
            format_currency(self.total_value),
            format_currency(self.target_value),
            if deviation < 0.0 { "-" } else { "+" },
            format_currency(deviation.abs()),
            format_currency(self.per_case_target),
            self.total_cases
        );
        if self.total_cases < self.requested_cases {
            out.push_str(&format!(
                "             (only {} of {} requested cases available)\n",
                self.total_cases, self.requested_cases
            ));
        }
        out.push_str(&format!("Game mode:   {}\n", self.game_mode));
        out.push_str(&format!(
            "Players:     {} ({} players)\n\n",
            self.player_config, self.players
        ));

        let name_width = self.lines.iter().map(|l| l.name.len()).max().unwrap_or(0);
        for line in &self.lines {
            let multiplier = if line.count > 1 {
                format!("{}x", line.count)
            } else {
                String::new()
            };
            out.push_str(&format!(
                "{:>2}. {:<width$}  {:>4}  {:>14}\n",
                line.number,
                line.name,
                multiplier,
                format_currency(line.line_total),
                width = name_width
            ));
        }
        out
    }
}

/// Format a dollar amount with thousands separators and two decimals.
///
/// `1234.5` becomes `$1,234.50`; negative amounts keep their sign in front.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}
