//! Human-readable rendering of statistics.

use crate::events::EventSize;
use crate::types::{SimulationStats, TxStats};

/// Format a number with thousands separators.
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

fn format_optional(n: Option<u64>) -> String {
    n.map(format_number).unwrap_or_else(|| "n/a".to_string())
}

fn push_events(out: &mut String, events: &[EventSize]) {
    if events.is_empty() {
        return;
    }
    out.push_str("  Contract events:\n");
    for event in events {
        let contract = event.contract.as_deref().unwrap_or("(no contract)");
        out.push_str(&format!(
            "    {}  {} bytes\n",
            contract,
            format_number(event.bytes)
        ));
    }
}

/// Format reconciled transaction statistics.
pub fn format_tx_stats(stats: &TxStats, events: &[EventSize]) -> String {
    let mut out = String::from("Transaction resources\n");
    out.push_str(&format!(
        "  CPU:                {} instructions\n",
        format_number(stats.cpu_insns)
    ));
    out.push_str(&format!(
        "  Memory:             {} bytes\n",
        format_number(stats.mem_bytes)
    ));
    out.push_str(&format!(
        "  Entry reads:        {}\n",
        format_number(stats.entry_reads)
    ));
    out.push_str(&format!(
        "  Entry writes:       {}\n",
        format_number(stats.entry_writes)
    ));
    out.push_str(&format!(
        "  Read bytes:         {}\n",
        format_number(stats.read_bytes)
    ));
    out.push_str(&format!(
        "  Write bytes:        {}\n",
        format_number(stats.write_bytes)
    ));
    out.push_str(&format!(
        "  Events + return:    {} bytes\n",
        format_number(stats.events_and_return_bytes)
    ));
    out.push_str(&format!(
        "  Min tx size:        {}\n",
        format_optional(stats.min_txn_bytes)
    ));
    out.push_str(&format!(
        "  Max entry size:     {}\n",
        format_optional(stats.max_entry_bytes)
    ));
    out.push_str(&format!(
        "  Max key size:       {}\n",
        format_optional(stats.max_key_bytes)
    ));
    push_events(&mut out, events);
    out
}

/// Format simulation-only statistics.
pub fn format_simulation_stats(stats: &SimulationStats, events: &[EventSize]) -> String {
    let mut out = String::from("Simulated resources\n");
    out.push_str(&format!(
        "  CPU:                {} instructions\n",
        format_number(stats.cpu_instructions)
    ));
    out.push_str(&format!(
        "  RAM:                {} bytes\n",
        format_number(stats.ram)
    ));
    out.push_str(&format!(
        "  Entry reads:        {}\n",
        format_number(stats.ledger_entry_reads)
    ));
    out.push_str(&format!(
        "  Entry writes:       {}\n",
        format_number(stats.ledger_entry_writes)
    ));
    out.push_str(&format!(
        "  Write bytes:        {}\n",
        format_number(stats.ledger_write_bytes)
    ));
    out.push_str(&format!(
        "  Read bytes:         {}\n",
        format_number(stats.ledger_read_bytes)
    ));
    out.push_str(&format!(
        "  Events + return:    {} bytes\n",
        format_number(stats.events_and_return_value_size)
    ));
    push_events(&mut out, events);
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_with_separators() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn tx_stats_unavailable_fields() {
        let stats = TxStats {
            cpu_insns: 45231,
            ..TxStats::default()
        };
        let text = format_tx_stats(&stats, &[]);
        assert!(text.contains("45,231 instructions"), "text: {}", text);
        assert!(text.contains("Min tx size:        n/a"), "text: {}", text);
        assert!(!text.contains("Contract events"), "text: {}", text);
    }

    #[test]
    fn tx_stats_zero_is_not_unavailable() {
        let stats = TxStats {
            max_entry_bytes: Some(0),
            ..TxStats::default()
        };
        let text = format_tx_stats(&stats, &[]);
        assert!(text.contains("Max entry size:     0"), "text: {}", text);
    }

    #[test]
    fn simulation_stats_with_events() {
        let stats = SimulationStats {
            ram: 2_000_000,
            ..SimulationStats::default()
        };
        let events = vec![EventSize {
            contract: Some("CABC".to_string()),
            bytes: 1200,
        }];
        let text = format_simulation_stats(&stats, &events);
        assert!(text.contains("2,000,000 bytes"), "text: {}", text);
        assert!(text.contains("CABC  1,200 bytes"), "text: {}", text);
    }
}
