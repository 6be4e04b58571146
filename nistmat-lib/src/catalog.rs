use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use nistmat_data::{CatalogData, CompositionKind, ElementRecord, MaterialRecord};
use tracing::debug;

use crate::constants::{ELEMENTAL_MATERIAL_PREFIX, NTP_TEMPERATURE, STP_PRESSURE};
use crate::error::{NistMatError, Result};
use crate::parsers::parse_catalog;
use crate::substance::{Component, Conditions, Element, Fraction, Material};

const ELEMENTS_DAT: &str = include_str!("../data/elements.dat");
const MATERIALS_DAT: &str = include_str!("../data/materials.dat");

static BASE_CATALOG: OnceLock<Catalog> = OnceLock::new();

fn base_catalog() -> &'static Catalog {
    BASE_CATALOG.get_or_init(|| {
        let data =
            parse_catalog(ELEMENTS_DAT, MATERIALS_DAT).expect("embedded catalog tables are malformed");
        Catalog::from_data(data).expect("embedded catalog tables are inconsistent")
    })
}

#[derive(Debug, Clone)]
enum Definition {
    /// `G4_<symbol>`, index into `elements`.
    Elemental(usize),
    /// Index into `records`.
    Record(usize),
}

/// Registry of elements and materials.
///
/// Predefined materials are materialised lazily on first lookup. Derived
/// materials enter through [`Catalog::register`] and are visible to every
/// later lookup. Names are unique across both sets.
#[derive(Debug, Clone)]
pub struct Catalog {
    elements: Vec<ElementRecord>,
    element_index: HashMap<String, usize>,
    built_elements: HashMap<usize, Arc<Element>>,
    records: Vec<MaterialRecord>,
    definitions: HashMap<String, Definition>,
    predefined_names: Vec<String>,
    registered_names: Vec<String>,
    materials: HashMap<String, Arc<Material>>,
}

impl Catalog {
    /// A fresh catalog over the embedded element and material tables.
    ///
    /// Cheap after the first call: the tables are parsed once per process
    /// and each catalog gets its own copy to register into.
    pub fn new() -> Self {
        base_catalog().clone()
    }

    /// Build a catalog from explicit records.
    ///
    /// Elements are ordered by atomic number. Every element with isotope
    /// data and a density gets an elemental material `G4_<symbol>`; these
    /// come first, followed by `data.materials` in order.
    pub fn from_data(data: CatalogData) -> Result<Self> {
        let mut elements = data.elements;
        elements.sort_by_key(|e| e.atomic_number);

        let mut element_index = HashMap::new();
        for (idx, elem) in elements.iter().enumerate() {
            for key in [
                elem.symbol.clone(),
                elem.name.to_lowercase(),
                elem.atomic_number.to_string(),
            ] {
                if element_index.insert(key.clone(), idx).is_some() {
                    return Err(NistMatError::DataError(format!(
                        "element key '{key}' is ambiguous"
                    )));
                }
            }
        }

        let mut catalog = Catalog {
            elements,
            element_index,
            built_elements: HashMap::new(),
            records: Vec::new(),
            definitions: HashMap::new(),
            predefined_names: Vec::new(),
            registered_names: Vec::new(),
            materials: HashMap::new(),
        };

        for idx in 0..catalog.elements.len() {
            let elem = &catalog.elements[idx];
            if elem.isotopes.is_empty() || elem.density.is_none() {
                continue;
            }
            let name = format!("{ELEMENTAL_MATERIAL_PREFIX}{}", elem.symbol);
            catalog.define(name, Definition::Elemental(idx))?;
        }
        for record in data.materials {
            let idx = catalog.records.len();
            let name = record.name.clone();
            catalog.records.push(record);
            catalog.define(name, Definition::Record(idx))?;
        }
        Ok(catalog)
    }

    fn define(&mut self, name: String, definition: Definition) -> Result<()> {
        if self.definitions.contains_key(&name) {
            return Err(NistMatError::DuplicateMaterialName(name));
        }
        self.definitions.insert(name.clone(), definition);
        self.predefined_names.push(name);
        Ok(())
    }

    fn resolve_element(&self, element: &str) -> Result<usize> {
        self.element_index
            .get(element)
            .or_else(|| self.element_index.get(&element.to_lowercase()))
            .copied()
            .ok_or_else(|| NistMatError::UnknownElement(element.to_string()))
    }

    /// Element symbols in increasing atomic number, including elements
    /// without isotope data.
    pub fn element_names(&self) -> Vec<&str> {
        self.elements.iter().map(|e| e.symbol.as_str()).collect()
    }

    /// Whether `element` (symbol, name or Z) is known and carries isotope data.
    pub fn has_isotope_data(&self, element: &str) -> bool {
        self.resolve_element(element)
            .is_ok_and(|idx| !self.elements[idx].isotopes.is_empty())
    }

    pub fn find_or_build_element(&mut self, element: &str) -> Result<Arc<Element>> {
        let idx = self.resolve_element(element)?;
        if let Some(built) = self.built_elements.get(&idx) {
            return Ok(Arc::clone(built));
        }
        let built = Arc::new(Element::from_record(&self.elements[idx])?);
        self.built_elements.insert(idx, Arc::clone(&built));
        Ok(built)
    }

    /// Predefined names followed by registered names, each in their
    /// original order.
    pub fn material_names(&self) -> Vec<&str> {
        self.predefined_names
            .iter()
            .chain(&self.registered_names)
            .map(String::as_str)
            .collect()
    }

    pub fn predefined_material_names(&self) -> &[String] {
        &self.predefined_names
    }

    pub fn registered_material_names(&self) -> &[String] {
        &self.registered_names
    }

    pub fn contains_material(&self, name: &str) -> bool {
        self.definitions.contains_key(name) || self.materials.contains_key(name)
    }

    /// Look up a material, building a predefined one on first use.
    pub fn find_or_build_material(&mut self, name: &str) -> Result<Arc<Material>> {
        if let Some(material) = self.materials.get(name) {
            return Ok(Arc::clone(material));
        }
        let definition = self
            .definitions
            .get(name)
            .cloned()
            .ok_or_else(|| NistMatError::MissingBaseSubstance(name.to_string()))?;

        let material = match definition {
            Definition::Elemental(idx) => self.build_elemental(idx)?,
            Definition::Record(idx) => self.build_record(idx)?,
        };
        debug!(material = name, "materialised predefined material");

        let material = Arc::new(material);
        self.materials.insert(name.to_string(), Arc::clone(&material));
        Ok(material)
    }

    fn build_elemental(&mut self, idx: usize) -> Result<Material> {
        let symbol = self.elements[idx].symbol.clone();
        let element = self.find_or_build_element(&symbol)?;
        let record = &self.elements[idx];
        let conditions = Conditions {
            state: record.state,
            density: record.density.unwrap_or_default(),
            temperature: NTP_TEMPERATURE,
            pressure: STP_PRESSURE,
        };
        let energy = element.mean_excitation_energy;
        Material::new(
            format!("{ELEMENTAL_MATERIAL_PREFIX}{symbol}"),
            conditions,
            vec![(Component::Element(element), Fraction::AtomCount(1.0))],
        )
        .map(|m| m.with_mean_excitation_energy(energy))
    }

    fn build_record(&mut self, idx: usize) -> Result<Material> {
        let record = self.records[idx].clone();
        let mut components = Vec::with_capacity(record.components.len());
        for component in &record.components {
            let element = self.find_or_build_element(&component.element)?;
            let fraction = match component.kind {
                CompositionKind::AtomCount => Fraction::AtomCount(component.weight),
                CompositionKind::MassFraction => Fraction::Mass(component.weight),
            };
            components.push((Component::Element(element), fraction));
        }
        let conditions = Conditions {
            state: record.state,
            density: record.density,
            temperature: record.temperature.unwrap_or(NTP_TEMPERATURE),
            pressure: record.pressure.unwrap_or(STP_PRESSURE),
        };
        let material = Material::new(record.name, conditions, components)?;
        Ok(match record.mean_excitation_energy {
            Some(energy) => material.with_mean_excitation_energy(energy),
            None => material,
        })
    }

    /// Add a derived material. Its name must not be known yet, whether
    /// predefined or registered earlier.
    pub fn register(&mut self, material: Material) -> Result<Arc<Material>> {
        if self.contains_material(material.name()) {
            return Err(NistMatError::DuplicateMaterialName(
                material.name().to_string(),
            ));
        }
        let name = material.name().to_string();
        let material = Arc::new(material);
        self.materials.insert(name.clone(), Arc::clone(&material));
        debug!(material = %name, "registered material");
        self.registered_names.push(name);
        Ok(material)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
