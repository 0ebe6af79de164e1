//! Column names used throughout the pipeline, both the Lithuanian names the
//! data portal publishes and the semantic names the cleaned table uses.

// Semantic (cleaned) names
pub const VDA_ID: &str = "vda_id";
pub const OBSERVATION_DATE: &str = "observation_date";
pub const PLANT_NAME: &str = "plant_name";
pub const DISEASE_PEST_NAME: &str = "disease_pest_name";
pub const DISEASE_PEST_NAME_LOT: &str = "disease_pest_name_lot";
pub const HARM_VALUE: &str = "harm_value";
pub const VIOLATION_LEVEL: &str = "violation_level";
pub const MUNICIPALITY: &str = "municipality";

// Derived view columns
pub const TOTAL_HARM: &str = "total_harm";
pub const YEAR: &str = "year";

/// Source column → semantic column.
pub const SOURCE_COLUMN_RENAMES: [(&str, &str); 8] = [
    ("_id", VDA_ID),
    ("stebejimo_data", OBSERVATION_DATE),
    ("augalo_pavadinimas", PLANT_NAME),
    ("ligos_kenkejo_pavadinimas", DISEASE_PEST_NAME),
    ("ligos_kenkejo_pavadinimas_lot", DISEASE_PEST_NAME_LOT),
    ("zalingumo_ivertis", HARM_VALUE),
    ("pazeidimo_lygis", VIOLATION_LEVEL),
    ("savivaldybe", MUNICIPALITY),
];
