/// Indonesian provinces and special regions with their registration prefixes,
/// grouped roughly west to east.
pub(crate) const INDONESIA: &[(&str, &[&str])] = &[
    ("Aceh", &["BL"]),
    ("North Sumatra", &["BB", "BK"]),
    ("West Sumatra", &["BA"]),
    ("Riau", &["BM"]),
    ("Riau Islands", &["BP"]),
    ("Jambi", &["BH"]),
    ("Bengkulu", &["BD"]),
    ("South Sumatra", &["BG"]),
    ("Bangka Belitung Islands", &["BN"]),
    ("Lampung", &["BE"]),
    ("DKI Jakarta", &["B"]),
    ("Banten", &["A"]),
    ("West Java", &["D", "E", "F", "T", "Z"]),
    ("Central Java", &["G", "H", "K", "R", "AA", "AD"]),
    ("DI Yogyakarta", &["AB"]),
    ("East Java", &["L", "M", "N", "P", "S", "W", "AE", "AG"]),
    ("Bali", &["DK"]),
    ("West Nusa Tenggara", &["DR", "EA"]),
    ("East Nusa Tenggara", &["DH", "EB", "ED"]),
    ("West Kalimantan", &["KB"]),
    ("Central Kalimantan", &["KH"]),
    ("South Kalimantan", &["DA"]),
    ("East Kalimantan", &["KT"]),
    ("North Kalimantan", &["KU"]),
    ("North Sulawesi", &["DB", "DL"]),
    ("Gorontalo", &["DM"]),
    ("Central Sulawesi", &["DN"]),
    ("West Sulawesi", &["DC"]),
    ("South Sulawesi", &["DD", "DP", "DW"]),
    ("Southeast Sulawesi", &["DT"]),
    ("Maluku", &["DE"]),
    ("North Maluku", &["DG"]),
    ("West Papua", &["PB"]),
    ("Papua", &["PA"]),
];
