//! Catalog export to the `materials` XML document.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::constants::{G_PER_CM3_TO_KG_PER_M3, VALUE_PRECISION};
use crate::error::{NistMatError, Result};
use crate::format::format_general;
use crate::substance::{Element, Material};
use crate::xml::XmlNode;

/// Record counts of an exported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportSummary {
    pub isotopes: usize,
    pub elements: usize,
    pub materials: usize,
}

fn value(v: f64) -> String {
    format_general(v, VALUE_PRECISION)
}

/// Predefined material names followed by the derived ones.
///
/// Fails on the first name that appears twice, and when a material
/// registered in the catalog is not among `derived`.
pub fn merged_material_names(catalog: &Catalog, derived: &[Arc<Material>]) -> Result<Vec<String>> {
    let predefined = catalog.predefined_material_names();
    let mut names = Vec::with_capacity(predefined.len() + derived.len());
    let mut seen = HashSet::with_capacity(names.capacity());

    let candidates = predefined
        .iter()
        .map(String::as_str)
        .chain(derived.iter().map(|m| m.name()));
    for name in candidates {
        if !seen.insert(name) {
            return Err(NistMatError::DuplicateMaterialName(name.to_string()));
        }
        names.push(name.to_string());
    }
    if let Some(missing) = catalog
        .registered_material_names()
        .iter()
        .find(|name| !seen.contains(name.as_str()))
    {
        return Err(NistMatError::UnexportedMaterial(missing.clone()));
    }
    Ok(names)
}

pub fn isotope_nodes(element: &Element) -> impl Iterator<Item = XmlNode> + '_ {
    element.isotopes.iter().map(|isotope| {
        let mut node = XmlNode::new("isotope")
            .with_attr("N", isotope.n.to_string())
            .with_attr("Z", isotope.z.to_string())
            .with_attr("name", isotope.name.as_str());
        node.add_child(
            XmlNode::new("atom")
                .with_attr("unit", "g/mole")
                .with_attr("value", value(isotope.molar_mass)),
        );
        node
    })
}

pub fn element_node(element: &Element) -> XmlNode {
    let mut node = XmlNode::new("element").with_attr("name", element.symbol.as_str());
    for (isotope, abundance) in element.isotopes.iter().zip(&element.abundances) {
        node.add_child(
            XmlNode::new("fraction")
                .with_attr("n", value(*abundance))
                .with_attr("ref", isotope.name.as_str()),
        );
    }
    node
}

/// Density is written in g/cm3, except for gases which use kg/m3 and carry
/// an extra pressure entry in bar.
pub fn material_node(material: &Material) -> XmlNode {
    let mut node = XmlNode::new("material")
        .with_attr("name", material.name())
        .with_attr("state", material.state().as_str());

    node.add_child(
        XmlNode::new("T")
            .with_attr("unit", "K")
            .with_attr("value", value(material.temperature())),
    );
    node.add_child(
        XmlNode::new("MEE")
            .with_attr("unit", "eV")
            .with_attr("value", value(material.mean_excitation_energy())),
    );
    if material.is_gas() {
        node.add_child(
            XmlNode::new("D")
                .with_attr("unit", "kg/m3")
                .with_attr("value", value(material.density() * G_PER_CM3_TO_KG_PER_M3)),
        );
        node.add_child(
            XmlNode::new("P")
                .with_attr("unit", "bar")
                .with_attr("value", value(material.pressure())),
        );
    } else {
        node.add_child(
            XmlNode::new("D")
                .with_attr("unit", "g/cm3")
                .with_attr("value", value(material.density())),
        );
    }

    for (element, fraction) in material.element_fractions() {
        node.add_child(
            XmlNode::new("fraction")
                .with_attr("n", value(*fraction))
                .with_attr("ref", element.symbol.as_str()),
        );
    }
    node
}

/// Build the whole document in memory.
///
/// Name collisions are checked before any record is produced. Elements
/// are enumerated in increasing Z and enumeration stops at the first
/// element without isotope data.
pub fn build_document(
    catalog: &mut Catalog,
    derived: &[Arc<Material>],
) -> Result<(XmlNode, ExportSummary)> {
    let names = merged_material_names(catalog, derived)?;

    let mut root = XmlNode::new("materials");
    let mut summary = ExportSummary::default();

    let symbols: Vec<String> = catalog.element_names().into_iter().map(String::from).collect();
    for symbol in &symbols {
        if !catalog.has_isotope_data(symbol) {
            debug!(element = %symbol, "isotope data ends here, stopping element enumeration");
            break;
        }
        let element = catalog.find_or_build_element(symbol)?;
        for isotope in isotope_nodes(&element) {
            root.add_child(isotope);
            summary.isotopes += 1;
        }
        root.add_child(element_node(&element));
        summary.elements += 1;
    }

    for name in &names {
        let material = catalog.find_or_build_material(name)?;
        root.add_child(material_node(&material));
        summary.materials += 1;
    }

    Ok((root, summary))
}

/// Build the document and write it to `path`. Nothing is written when
/// building fails.
pub fn write_materials_xml(
    catalog: &mut Catalog,
    derived: &[Arc<Material>],
    path: &Path,
) -> Result<ExportSummary> {
    let (document, summary) = build_document(catalog, derived)?;
    document.save(path)?;
    info!(
        path = %path.display(),
        isotopes = summary.isotopes,
        elements = summary.elements,
        materials = summary.materials,
        "wrote materials document"
    );
    Ok(summary)
}
