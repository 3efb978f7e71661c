use std::io::Write;

use crate::model::VehicleRecord;
use crate::output::CountingWriter;

pub const CSV_HEADER: [&str; 4] = ["license_plate", "region", "vin", "engine_number"];

/// Write records as CSV with a fixed column order.
pub fn write_records_csv<W: Write>(
    writer: W,
    records: &[VehicleRecord],
) -> Result<u64, csv::Error> {
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(counting);

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record([
            record.license_plate.to_string().as_str(),
            record.region.as_str(),
            record.vin.as_str(),
            record.engine_number.as_str(),
        ])?;
    }

    writer.flush()?;
    let counting = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(counting.bytes_written())
}
