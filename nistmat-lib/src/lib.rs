pub mod builder;
pub mod catalog;
pub mod chemparser;
pub mod constants;
pub mod error;
pub mod format;
pub mod parsers;
pub mod serializer;
pub mod substance;
pub mod user_materials;
pub mod xml;

use std::path::Path;

pub use builder::{
    Constituent, MaterialBuilder, fractions_sum_to_one, gas_mixture_name, generate_mixture_name,
    scintillator_name,
};
pub use catalog::Catalog;
pub use error::{NistMatError, Result};
pub use serializer::{ExportSummary, build_document, merged_material_names, write_materials_xml};
pub use substance::{Component, Conditions, Element, Fraction, Isotope, Material, State};
pub use user_materials::build_user_materials;
pub use xml::XmlNode;
pub use nistmat_data;

/// Build the user materials on top of a fresh catalog and write the
/// full document to `path`.
pub fn export_materials(path: &Path) -> Result<ExportSummary> {
    let mut catalog = Catalog::new();
    let derived = build_user_materials(&mut catalog)?;
    write_materials_xml(&mut catalog, &derived, path)
}
