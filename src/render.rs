use std::io::Write;

use anyhow::Result;

use crate::stats::{PrList, StatsAggregator};

/// Write the month-ordered report: counts and contents of each category per month.
pub fn render_report(out: &mut dyn Write, stats: &StatsAggregator) -> Result<()> {
  for month in stats.iter() {
    writeln!(out, "month: {}", month.month)?;
    write_list(out, "own merged", &month.own_merged)?;
    write_list(out, "merged/approved", &month.merged_or_approved)?;
    write_list(out, "reviewed", &month.reviewed)?;
  }
  Ok(())
}

fn write_list(out: &mut dyn Write, label: &str, list: &PrList) -> Result<()> {
  writeln!(out, "  {}: {}", label, list.len())?;
  for pr in list.iter() {
    writeln!(out, "    {}", pr)?;
  }
  Ok(())
}
