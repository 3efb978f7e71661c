use std::io::Write;

use crate::errors::GenerationError;
use crate::model::VehicleRecord;
use crate::output::CountingWriter;

/// Write one JSON object per line.
pub fn write_records_jsonl<W: Write>(
    writer: W,
    records: &[VehicleRecord],
) -> Result<u64, GenerationError> {
    let mut writer = CountingWriter::new(writer);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(writer.bytes_written())
}
