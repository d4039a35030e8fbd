//! Plain-text member summary.

use std::fmt::Write;

use memberclaims_client::CoverageLimits;

use super::claims_table::ClaimsTable;
use super::format::format_amount;

/// Render a member's claims table and coverage limits as plain text.
pub fn render_member_report(
    user_id: &str,
    claims: &ClaimsTable,
    coverage: Option<&CoverageLimits>,
    currency: &str,
) -> String {
    let mut out = String::new();
    let p = &claims.pagination;
    let _ = writeln!(out, "Claims for {}", user_id);
    let _ = writeln!(
        out,
        "page {} of {} ({} total)",
        p.page, p.total_pages, p.total
    );

    match claims.empty_message() {
        Some(message) => {
            let _ = writeln!(out, "  {}", message);
        }
        None => {
            for row in claims.rows() {
                let _ = writeln!(
                    out,
                    "  {:<14} {:<11} {:<10} {:<30} {:>16} {:>16}",
                    row.id,
                    row.service_date,
                    row.claim_type,
                    row.provider,
                    row.amount_claimed,
                    row.amount_approved.as_deref().unwrap_or("-"),
                );
                let _ = writeln!(out, "  {:<14} {}", "", row.status_label);
            }
        }
    }

    if let Some(limits) = coverage {
        let _ = writeln!(out);
        let _ = writeln!(out, "Coverage limits");
        for (claim_type, limit) in limits.categories() {
            let _ = writeln!(
                out,
                "  {:<10} {:>16} of {:>16} remaining ({}% used)",
                claim_type.label(),
                format_amount(limit.remaining, currency),
                format_amount(limit.total, currency),
                limit.percent_used(),
            );
        }
    }
    out
}
