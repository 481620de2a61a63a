//! CSV persistence of per-tick statistics.

use outbreak_core::StatisticsRecord;
use std::io::{self, Write};

pub fn write_csv<W: Write>(writer: &mut W, history: &[StatisticsRecord]) -> io::Result<()> {
    writeln!(writer, "{}", StatisticsRecord::CSV_HEADER)?;
    for record in history {
        writeln!(writer, "{}", record.to_csv_row())?;
    }
    writer.flush()
}
