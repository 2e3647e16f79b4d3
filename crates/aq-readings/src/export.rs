//! TSV export of stored readings.

use crate::store::Reading;

/// Render readings as tab-separated values with a header row, newest
/// first.
pub fn to_tsv(readings: &[Reading]) -> String {
    let mut rows: Vec<&Reading> = readings.iter().collect();
    rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut out = String::from("sensor_id\tvoltage\ttimestamp");
    for r in rows {
        out.push('\n');
        out.push_str(&format!(
            "{}\t{}\t{}",
            r.sensor_id,
            r.voltage,
            r.timestamp.to_rfc3339()
        ));
    }
    out
}
