//! Per-bot tick statistics for debugging

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct TickStats {
    pub total_ticks: u64,
    pub empty_batches: u64,
    pub total_actions: u64,
    pub over_budget: u64,
    pub avg_decision_micros: f64,
    pub last_tick: Option<u64>,
}

impl TickStats {
    pub fn record(
        &mut self,
        tick: u64,
        action_count: usize,
        decision_micros: u64,
        over_budget: bool,
    ) {
        self.total_ticks += 1;
        self.total_actions += action_count as u64;
        self.last_tick = Some(tick);
        if action_count == 0 {
            self.empty_batches += 1;
        }
        if over_budget {
            self.over_budget += 1;
        }

        // Running average
        let n = self.total_ticks as f64;
        self.avg_decision_micros =
            self.avg_decision_micros * ((n - 1.0) / n) + (decision_micros as f64 / n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_average_and_counters() {
        let mut stats = TickStats::default();
        stats.record(1, 3, 10, false);
        stats.record(2, 0, 30, true);

        assert_eq!(stats.total_ticks, 2);
        assert_eq!(stats.total_actions, 3);
        assert_eq!(stats.empty_batches, 1);
        assert_eq!(stats.over_budget, 1);
        assert_eq!(stats.last_tick, Some(2));
        assert!((stats.avg_decision_micros - 20.0).abs() < 1e-9);
    }
}
