//! Console statistics block printed by the analyzer

use crate::analysis::{display_label, Statistics};
use std::io::{self, Write};

const RULE_WIDTH: usize = 50;

/// Write the text statistics for one scan
pub fn write_statistics<W: Write>(out: &mut W, stats: &Statistics, top: usize) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "  HONEYPOT ATTACK STATISTICS")?;
    writeln!(out, "{}", rule)?;
    writeln!(out)?;

    writeln!(out, "Total login attempts: {}", stats.total_attempts)?;
    writeln!(out, "Unique attacker IPs: {}", stats.unique_ips())?;
    writeln!(out, "Unique usernames tried: {}", stats.unique_usernames())?;
    writeln!(out, "Unique passwords tried: {}", stats.unique_passwords())?;

    writeln!(out)?;
    writeln!(out, " Top {} Passwords:", top)?;
    for entry in stats.passwords.top(top) {
        writeln!(out, "   {:2} - {}", entry.count, display_label(&entry.value))?;
    }

    writeln!(out)?;
    writeln!(out, " Top {} Usernames:", top)?;
    for entry in stats.usernames.top(top) {
        writeln!(out, "   {:2} - {}", entry.count, entry.value)?;
    }

    writeln!(out)?;
    writeln!(out, "Attacker IPs:")?;
    for ip in stats.attacker_ips() {
        writeln!(out, "   • {}", ip)?;
    }
    writeln!(out)?;
    Ok(())
}
