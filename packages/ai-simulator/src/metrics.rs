//! Metrics collection for simulation results.

use mighty_engine::domain::rules::PLAYERS;
use mighty_engine::domain::{Contract, Outcome, RedealReason, Seat};
use serde::Serialize;

use crate::simulator::{GameRecord, SeatStats};
use crate::types::AgentKind;

/// Complete per-game record for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_no: u32,
    pub seed: u64,
    pub timestamp: String,
    pub agents: [AgentKind; PLAYERS],
    pub result: GameResultMetrics,
    pub seats: Vec<SeatMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub dealer: Seat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract: Option<Contract>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner: Option<Seat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declarer_team_points: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub made: Option<bool>,
    pub run: bool,
    pub back_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redeal: Option<RedealReason>,
    pub payouts: [i32; PLAYERS],
    pub actions: usize,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatMetrics {
    pub seat: Seat,
    pub agent: AgentKind,
    pub payout: i32,
    pub decisions: u32,
    pub search_iterations: u64,
    pub fallbacks: u32,
}

/// Build metrics from a finished game.
pub fn build_game_metrics(
    record: &GameRecord,
    agents: [AgentKind; PLAYERS],
    duration_ms: f64,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let mut result = GameResultMetrics {
        dealer: record.dealer,
        contract: None,
        partner: None,
        declarer_team_points: None,
        made: None,
        run: false,
        back_run: false,
        redeal: None,
        payouts: record.payouts,
        actions: record.actions,
        duration_ms,
    };
    match record.outcome {
        Outcome::Scored(r) => {
            result.contract = Some(r.contract);
            result.partner = r.partner;
            result.declarer_team_points = Some(r.declarer_team_points);
            result.made = Some(r.made);
            result.run = r.run;
            result.back_run = r.back_run;
        }
        Outcome::Redeal(reason) => result.redeal = Some(reason),
    }

    let seats = record
        .seats
        .iter()
        .enumerate()
        .map(|(seat, stats)| seat_metrics(seat as Seat, agents[seat], record.payouts[seat], stats))
        .collect();

    GameMetrics {
        game_no: record.game_no,
        seed: record.dealing_seed,
        timestamp,
        agents,
        result,
        seats,
    }
}

fn seat_metrics(seat: Seat, agent: AgentKind, payout: i32, stats: &SeatStats) -> SeatMetrics {
    SeatMetrics {
        seat,
        agent,
        payout,
        decisions: stats.decisions,
        search_iterations: stats.search_iterations,
        fallbacks: stats.fallbacks,
    }
}

/// Running totals across a simulation.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub games: u32,
    pub errors: u32,
    pub redeals: u32,
    pub contracts: u32,
    pub contracts_made: u32,
    pub total_payouts: [i64; PLAYERS],
    /// Contracts played and made, per declarer seat.
    pub declared: [(u32, u32); PLAYERS],
    pub fallbacks: u32,
}

impl Summary {
    pub fn record(&mut self, record: &GameRecord) {
        self.games += 1;
        for (total, payout) in self.total_payouts.iter_mut().zip(record.payouts) {
            *total += payout as i64;
        }
        self.fallbacks += record.seats.iter().map(|s| s.fallbacks).sum::<u32>();
        match record.outcome {
            Outcome::Scored(r) => {
                self.contracts += 1;
                self.contracts_made += r.made as u32;
                let entry = &mut self.declared[r.contract.declarer as usize];
                entry.0 += 1;
                entry.1 += r.made as u32;
            }
            Outcome::Redeal(_) => self.redeals += 1,
        }
    }

    pub fn average_payout(&self, seat: usize) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_payouts[seat] as f64 / self.games as f64
    }

    /// Share of played-out contracts the declarer made, in percent.
    pub fn declarer_success_rate(&self) -> Option<f64> {
        (self.contracts > 0)
            .then(|| self.contracts_made as f64 / self.contracts as f64 * 100.0)
    }
}

/// CSV summary row for quick analysis.
#[derive(Debug, Serialize)]
pub struct CsvSummaryRow {
    pub game_no: u32,
    pub seed: u64,
    pub dealer: Seat,
    pub declarer: Option<Seat>,
    pub trump: Option<String>,
    pub target: Option<u8>,
    pub made: Option<bool>,
    pub seat0_payout: i32,
    pub seat1_payout: i32,
    pub seat2_payout: i32,
    pub seat3_payout: i32,
    pub seat4_payout: i32,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(metrics: &GameMetrics) -> Self {
        let contract = metrics.result.contract;
        let p = metrics.result.payouts;
        CsvSummaryRow {
            game_no: metrics.game_no,
            seed: metrics.seed,
            dealer: metrics.result.dealer,
            declarer: contract.map(|c| c.declarer),
            trump: contract.map(|c| c.trump.to_string()),
            target: contract.map(|c| c.target),
            made: metrics.result.made,
            seat0_payout: p[0],
            seat1_payout: p[1],
            seat2_payout: p[2],
            seat3_payout: p[3],
            seat4_payout: p[4],
        }
    }
}
