//! Reduction of a collection of simulation results into summary metrics and
//! the bucketed profit/loss distribution, plus the textual report rendering.

use crate::game::SimulationResult;
use crate::SimulatorConfig;
use serde::Serialize;
use std::fmt::Display;

const REPORT_WIDTH: usize = 60;

/// Labels of the fixed profit/loss histogram ranges, in display order.
pub const BUCKET_LABELS: [&str; 7] = [
    "< -$500",
    "-$500 to -$250",
    "-$250 to $0",
    "$0 (Break Even)",
    "$0 to $250",
    "$250 to $500",
    "> $500",
];

/// Index of the one histogram bucket a profit/loss amount falls into.
/// The ranges are, in order: (-inf,-500), [-500,-250), [-250,0), {0},
/// (0,250], (250,500], (500,+inf).
pub fn bucket_index(profit_loss: i64) -> usize {
    if profit_loss < -500 {
        0
    } else if profit_loss < -250 {
        1
    } else if profit_loss < 0 {
        2
    } else if profit_loss == 0 {
        3
    } else if profit_loss <= 250 {
        4
    } else if profit_loss <= 500 {
        5
    } else {
        6
    }
}

/// Read-only summary derived from a collection of simulation results. All
/// averages and percentages guard against an empty collection or a run that
/// never played a hand.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub starting_bankroll: u64,
    pub base_bet: u64,
    pub max_bet: u64,
    pub num_simulations: u32,
    pub total_hands: u64,
    pub total_wins: u64,
    pub total_losses: u64,
    pub total_pushes: u64,
    pub win_pct: f64,
    pub loss_pct: f64,
    pub push_pct: f64,
    pub avg_final_bankroll: f64,
    pub avg_profit_loss: f64,
    pub avg_hands: f64,
    pub went_broke: u32,
    pub went_broke_pct: f64,
    pub came_out_ahead: u32,
    pub came_out_ahead_pct: f64,
    pub best_outcome: i64,
    pub worst_outcome: i64,
    pub bucket_counts: [u32; 7],
}

impl AggregateReport {
    /// Associated function that reduces `results` into an `AggregateReport`.
    pub fn from_results(config: &SimulatorConfig, results: &[SimulationResult]) -> AggregateReport {
        let runs = results.len() as u32;
        let total_hands: u64 = results.iter().map(|r| r.hands_played as u64).sum();
        let total_wins: u64 = results.iter().map(|r| r.wins as u64).sum();
        let total_losses: u64 = results.iter().map(|r| r.losses as u64).sum();
        let total_pushes: u64 = results.iter().map(|r| r.pushes as u64).sum();

        let hand_pct = |count: u64| {
            if total_hands == 0 {
                0.0
            } else {
                count as f64 / total_hands as f64 * 100.0
            }
        };
        let run_pct = |count: u32| {
            if runs == 0 {
                0.0
            } else {
                count as f64 / runs as f64 * 100.0
            }
        };
        let run_mean = |sum: f64| if runs == 0 { 0.0 } else { sum / runs as f64 };

        let went_broke = results.iter().filter(|r| r.went_broke).count() as u32;
        let came_out_ahead = results.iter().filter(|r| r.profit_loss > 0).count() as u32;

        let mut bucket_counts = [0u32; 7];
        for result in results {
            bucket_counts[bucket_index(result.profit_loss)] += 1;
        }

        AggregateReport {
            starting_bankroll: config.starting_bankroll,
            base_bet: config.base_bet,
            max_bet: config.max_bet,
            num_simulations: runs,
            total_hands,
            total_wins,
            total_losses,
            total_pushes,
            win_pct: hand_pct(total_wins),
            loss_pct: hand_pct(total_losses),
            push_pct: hand_pct(total_pushes),
            avg_final_bankroll: run_mean(results.iter().map(|r| r.final_bankroll as f64).sum()),
            avg_profit_loss: run_mean(results.iter().map(|r| r.profit_loss as f64).sum()),
            avg_hands: run_mean(total_hands as f64),
            went_broke,
            went_broke_pct: run_pct(went_broke),
            came_out_ahead,
            came_out_ahead_pct: run_pct(came_out_ahead),
            best_outcome: results.iter().map(|r| r.profit_loss).max().unwrap_or(0),
            worst_outcome: results.iter().map(|r| r.profit_loss).min().unwrap_or(0),
            bucket_counts,
        }
    }
}

/// Formats an integer count with thousands separators.
fn grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl Display for AggregateReport {
    /// Renders the full textual report: parameters, overall statistics,
    /// financial outcomes, success metrics and the profit/loss distribution
    /// with proportional bars. Empty buckets are omitted but the bucket
    /// order is always preserved.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule = "-".repeat(REPORT_WIDTH);
        writeln!(f, "\n{}", "=".repeat(REPORT_WIDTH))?;
        writeln!(f, "BLACKJACK MARTINGALE SIMULATOR RESULTS")?;
        writeln!(f, "{}", "=".repeat(REPORT_WIDTH))?;
        writeln!(f, "\nSimulation Parameters:")?;
        writeln!(f, "  Starting Bankroll: ${}", self.starting_bankroll)?;
        writeln!(f, "  Base Bet: ${}", self.base_bet)?;
        writeln!(f, "  Maximum Bet: ${}", self.max_bet)?;
        writeln!(f, "  Number of Simulations: {}", self.num_simulations)?;

        writeln!(f, "\n{}", rule)?;
        writeln!(f, "OVERALL STATISTICS")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "  Total Hands Played: {}", grouped(self.total_hands))?;
        writeln!(f, "  Average Hands per Simulation: {:.1}", self.avg_hands)?;
        writeln!(
            f,
            "  Total Wins: {} ({:.1}%)",
            grouped(self.total_wins),
            self.win_pct
        )?;
        writeln!(
            f,
            "  Total Losses: {} ({:.1}%)",
            grouped(self.total_losses),
            self.loss_pct
        )?;
        writeln!(
            f,
            "  Total Pushes: {} ({:.1}%)",
            grouped(self.total_pushes),
            self.push_pct
        )?;

        writeln!(f, "\n{}", rule)?;
        writeln!(f, "FINANCIAL OUTCOMES")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "  Average Final Bankroll: ${:.2}", self.avg_final_bankroll)?;
        writeln!(f, "  Average Profit/Loss: ${:.2}", self.avg_profit_loss)?;
        writeln!(f, "  Best Outcome: ${:.2}", self.best_outcome as f64)?;
        writeln!(f, "  Worst Outcome: ${:.2}", self.worst_outcome as f64)?;

        writeln!(f, "\n{}", rule)?;
        writeln!(f, "SUCCESS METRICS")?;
        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "  Went Broke: {}/{} ({:.1}%)",
            self.went_broke, self.num_simulations, self.went_broke_pct
        )?;
        writeln!(
            f,
            "  Came Out Ahead: {}/{} ({:.1}%)",
            self.came_out_ahead, self.num_simulations, self.came_out_ahead_pct
        )?;
        let behind = self.num_simulations - self.came_out_ahead;
        let behind_pct = if self.num_simulations == 0 {
            0.0
        } else {
            behind as f64 / self.num_simulations as f64 * 100.0
        };
        writeln!(
            f,
            "  Broke Even or Lost: {}/{} ({:.1}%)",
            behind, self.num_simulations, behind_pct
        )?;

        writeln!(f, "\n{}", rule)?;
        writeln!(f, "PROFIT/LOSS DISTRIBUTION")?;
        writeln!(f, "{}", rule)?;
        for (label, &count) in BUCKET_LABELS.iter().zip(self.bucket_counts.iter()) {
            if count == 0 {
                continue;
            }
            let pct = if self.num_simulations == 0 {
                0.0
            } else {
                count as f64 / self.num_simulations as f64 * 100.0
            };
            let bar = "\u{2588}".repeat((pct / 2.0) as usize);
            writeln!(f, "  {:<20}: {:>3} ({:>5.1}%) {}", label, count, pct, bar)?;
        }
        writeln!(f, "{}\n", "=".repeat(REPORT_WIDTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimulatorConfig;

    fn result(profit_loss: i64, hands: u32, wins: u32, losses: u32, pushes: u32) -> SimulationResult {
        let final_bankroll = (1000 + profit_loss) as u64;
        SimulationResult {
            final_bankroll,
            hands_played: hands,
            wins,
            losses,
            pushes,
            max_bankroll: final_bankroll.max(1000),
            min_bankroll: final_bankroll.min(1000),
            profit_loss,
            went_broke: final_bankroll < 10,
        }
    }

    #[test]
    fn bucket_boundaries_follow_the_fixed_ranges() {
        assert_eq!(bucket_index(-501), 0);
        assert_eq!(bucket_index(-500), 1);
        assert_eq!(bucket_index(-251), 1);
        assert_eq!(bucket_index(-250), 2);
        assert_eq!(bucket_index(-1), 2);
        assert_eq!(bucket_index(0), 3);
        assert_eq!(bucket_index(1), 4);
        assert_eq!(bucket_index(250), 4);
        assert_eq!(bucket_index(251), 5);
        assert_eq!(bucket_index(500), 5);
        assert_eq!(bucket_index(501), 6);
    }

    #[test]
    fn bucket_counts_sum_to_the_number_of_runs() {
        let results = vec![
            result(-995, 120, 40, 70, 10),
            result(-300, 200, 80, 100, 20),
            result(0, 50, 20, 20, 10),
            result(120, 300, 130, 140, 30),
            result(700, 1000, 450, 460, 90),
        ];
        let report = AggregateReport::from_results(&SimulatorConfig::default(), &results);
        let bucketed: u32 = report.bucket_counts.iter().sum();
        assert_eq!(bucketed as usize, results.len());
        assert_eq!(report.bucket_counts, [1, 1, 0, 1, 1, 0, 1]);
    }

    #[test]
    fn outcome_percentages_cover_all_hands() {
        let results = vec![
            result(-100, 100, 42, 48, 10),
            result(50, 200, 90, 94, 16),
        ];
        let report = AggregateReport::from_results(&SimulatorConfig::default(), &results);
        assert_eq!(report.total_hands, 300);
        assert_eq!(
            report.total_wins + report.total_losses + report.total_pushes,
            report.total_hands
        );
        let pct_sum = report.win_pct + report.loss_pct + report.push_pct;
        assert!((pct_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn averages_best_and_worst_are_computed_over_runs() {
        let results = vec![
            result(-200, 100, 40, 50, 10),
            result(400, 100, 55, 40, 5),
        ];
        let report = AggregateReport::from_results(&SimulatorConfig::default(), &results);
        assert!((report.avg_profit_loss - 100.0).abs() < 1e-9);
        assert!((report.avg_final_bankroll - 1100.0).abs() < 1e-9);
        assert!((report.avg_hands - 100.0).abs() < 1e-9);
        assert_eq!(report.best_outcome, 400);
        assert_eq!(report.worst_outcome, -200);
        assert_eq!(report.came_out_ahead, 1);
    }

    #[test]
    fn empty_results_produce_a_degenerate_but_valid_report() {
        let report = AggregateReport::from_results(&SimulatorConfig::default(), &[]);
        assert_eq!(report.num_simulations, 0);
        assert_eq!(report.total_hands, 0);
        assert_eq!(report.win_pct, 0.0);
        assert_eq!(report.avg_final_bankroll, 0.0);
        assert_eq!(report.went_broke_pct, 0.0);
        assert_eq!(report.bucket_counts, [0; 7]);
        // Rendering must not panic either
        let rendered = format!("{}", report);
        assert!(rendered.contains("PROFIT/LOSS DISTRIBUTION"));
    }

    #[test]
    fn zero_hand_runs_do_not_break_hand_percentages() {
        let results = vec![result(0, 0, 0, 0, 0)];
        let report = AggregateReport::from_results(&SimulatorConfig::default(), &results);
        assert_eq!(report.total_hands, 0);
        assert_eq!(report.win_pct, 0.0);
        assert_eq!(report.avg_hands, 0.0);
    }

    #[test]
    fn report_rendering_omits_empty_buckets_and_keeps_order() {
        let results = vec![result(-995, 10, 1, 9, 0), result(600, 10, 6, 4, 0)];
        let report = AggregateReport::from_results(&SimulatorConfig::default(), &results);
        let rendered = format!("{}", report);
        assert!(rendered.contains("< -$500"));
        assert!(rendered.contains("> $500"));
        assert!(!rendered.contains("$0 (Break Even)"));
        let first = rendered.find("< -$500").unwrap();
        let last = rendered.find("> $500").unwrap();
        assert!(first < last);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(grouped(0), "0");
        assert_eq!(grouped(999), "999");
        assert_eq!(grouped(1000), "1,000");
        assert_eq!(grouped(1234567), "1,234,567");
    }
}
