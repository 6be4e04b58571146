/// Standard temperature (K).
pub const STP_TEMPERATURE: f64 = 273.15;

/// Normal temperature (K), the default for predefined and condensed materials.
pub const NTP_TEMPERATURE: f64 = 293.15;

/// Standard atmosphere (bar), the reference pressure for gas densities.
pub const STP_PRESSURE: f64 = 1.01325;

/// g/cm³ to kg/m³
pub const G_PER_CM3_TO_KG_PER_M3: f64 = 1000.0;

/// Significant digits for numbers embedded in generated material names.
pub const NAME_PRECISION: usize = 4;

/// Significant digits for attribute values in the XML output.
pub const VALUE_PRECISION: usize = 6;

/// Tolerance for mass fractions summing to one.
pub const FRACTION_TOLERANCE: f64 = 1e-9;

/// Prefix of the elemental materials in the predefined catalog.
pub const ELEMENTAL_MATERIAL_PREFIX: &str = "G4_";

/// Default output file.
pub const DEFAULT_OUTPUT: &str = "materials.xml";
