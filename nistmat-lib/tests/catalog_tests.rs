use approx::assert_relative_eq;
use nistmat::nistmat_data::{CatalogData, ComponentRecord, CompositionKind, MaterialRecord};
use nistmat::{Catalog, Component, Conditions, Fraction, Material, NistMatError, State};

#[test]
fn test_element_names_in_z_order() {
    let catalog = Catalog::new();
    let names = catalog.element_names();
    assert_eq!(names[0], "H");
    assert_eq!(names[1], "He");
    assert_eq!(names[25], "Fe");
    assert_eq!(names[97], "Cf");
    assert_eq!(names[98], "Es");
}

#[test]
fn test_find_element_by_symbol_name_and_z() {
    let mut catalog = Catalog::new();
    let by_symbol = catalog.find_or_build_element("Fe").unwrap();
    let by_name = catalog.find_or_build_element("iron").unwrap();
    let by_z = catalog.find_or_build_element("26").unwrap();
    assert_eq!(by_symbol.z, 26);
    assert_eq!(by_symbol, by_name);
    assert_eq!(by_symbol, by_z);
    assert_eq!(by_symbol.name, "Iron");
}

#[test]
fn test_unknown_element() {
    let mut catalog = Catalog::new();
    assert!(matches!(
        catalog.find_or_build_element("Xx"),
        Err(NistMatError::UnknownElement(_))
    ));
    assert!(!catalog.has_isotope_data("Xx"));
}

#[test]
fn test_isotope_data_boundary() {
    let mut catalog = Catalog::new();
    assert!(catalog.has_isotope_data("Cf"));
    assert!(catalog.has_isotope_data("U"));
    assert!(!catalog.has_isotope_data("Es"));
    assert!(!catalog.has_isotope_data("Lr"));
    assert!(matches!(
        catalog.find_or_build_element("Es"),
        Err(NistMatError::IsotopeDataUnavailable(_))
    ));
}

#[test]
fn test_isotopes_and_abundances() {
    let mut catalog = Catalog::new();
    let uranium = catalog.find_or_build_element("U").unwrap();
    let names: Vec<&str> = uranium.isotopes.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["U234", "U235", "U238"]);
    assert!(uranium.isotopes.iter().all(|i| i.z == 92));
    assert_eq!(uranium.isotopes[1].n, 235);
    assert_relative_eq!(uranium.molar_mass(), 238.029, epsilon = 0.01);
}

#[test]
fn test_abundances_sum_to_one() {
    let mut catalog = Catalog::new();
    let symbols: Vec<String> = catalog
        .element_names()
        .into_iter()
        .map(String::from)
        .collect();
    for symbol in symbols {
        if !catalog.has_isotope_data(&symbol) {
            continue;
        }
        let element = catalog.find_or_build_element(&symbol).unwrap();
        let total: f64 = element.abundances.iter().sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-3);
        assert_eq!(element.isotopes.len(), element.abundances.len());
    }
}

#[test]
fn test_molar_masses() {
    let mut catalog = Catalog::new();
    let h = catalog.find_or_build_element("H").unwrap();
    let o = catalog.find_or_build_element("O").unwrap();
    let pb = catalog.find_or_build_element("Pb").unwrap();
    assert_relative_eq!(h.molar_mass(), 1.00794, epsilon = 1e-4);
    assert_relative_eq!(o.molar_mass(), 15.9994, epsilon = 1e-3);
    assert_relative_eq!(pb.molar_mass(), 207.2, epsilon = 0.05);
}

#[test]
fn test_material_names_order() {
    let catalog = Catalog::new();
    let names = catalog.material_names();
    assert_eq!(names[0], "G4_H");
    assert_eq!(names[97], "G4_Cf");
    assert_eq!(names[98], "G4_Galactic");
    assert!(names.contains(&"G4_WATER"));
    assert!(!names.contains(&"G4_Es"));
    assert!(catalog.registered_material_names().is_empty());
}

#[test]
fn test_water_composition() {
    let mut catalog = Catalog::new();
    let water = catalog.find_or_build_material("G4_WATER").unwrap();
    assert_eq!(water.state(), State::Liquid);
    assert_relative_eq!(water.density(), 1.0);
    assert_relative_eq!(water.mean_excitation_energy(), 78.0);
    assert_relative_eq!(water.temperature(), 293.15);

    let fractions = water.element_fractions();
    assert_eq!(fractions.len(), 2);
    assert_eq!(fractions[0].0.symbol, "H");
    assert_eq!(fractions[1].0.symbol, "O");
    assert_relative_eq!(fractions[0].1, 0.111898, epsilon = 1e-4);
    assert_relative_eq!(fractions[0].1 + fractions[1].1, 1.0, epsilon = 1e-12);
}

#[test]
fn test_mass_fraction_material() {
    let mut catalog = Catalog::new();
    let air = catalog.find_or_build_material("G4_AIR").unwrap();
    assert!(air.is_gas());
    let symbols: Vec<&str> = air
        .element_fractions()
        .iter()
        .map(|(e, _)| e.symbol.as_str())
        .collect();
    assert_eq!(symbols, ["C", "N", "O", "Ar"]);
    assert_relative_eq!(air.element_fractions()[1].1, 0.755268);
    assert_relative_eq!(air.pressure(), 1.01325);
}

#[test]
fn test_explicit_conditions() {
    let mut catalog = Catalog::new();
    let galactic = catalog.find_or_build_material("G4_Galactic").unwrap();
    assert_relative_eq!(galactic.temperature(), 2.73);
    assert_relative_eq!(galactic.pressure(), 3.0e-23);
}

#[test]
fn test_elemental_material() {
    let mut catalog = Catalog::new();
    let lead = catalog.find_or_build_material("G4_Pb").unwrap();
    assert_eq!(lead.state(), State::Solid);
    assert_relative_eq!(lead.density(), 11.35);
    assert_relative_eq!(lead.mean_excitation_energy(), 823.0);
    assert_eq!(lead.element_fractions().len(), 1);
    assert_relative_eq!(lead.element_fractions()[0].1, 1.0);

    let argon = catalog.find_or_build_material("G4_Ar").unwrap();
    assert!(argon.is_gas());
}

#[test]
fn test_bragg_mean_excitation_energy() {
    let mut catalog = Catalog::new();
    let steel = catalog.find_or_build_material("G4_STAINLESS-STEEL").unwrap();
    // Between the Cr and Ni values, close to Fe
    let energy = steel.mean_excitation_energy();
    assert!(energy > 257.0 && energy < 311.0, "I = {energy}");
}

#[test]
fn test_materialised_once() {
    let mut catalog = Catalog::new();
    let first = catalog.find_or_build_material("G4_WATER").unwrap();
    let second = catalog.find_or_build_material("G4_WATER").unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
}

#[test]
fn test_unknown_material() {
    let mut catalog = Catalog::new();
    assert!(matches!(
        catalog.find_or_build_material("G4_UNOBTAINIUM"),
        Err(NistMatError::MissingBaseSubstance(_))
    ));
}

fn hydrogen_gas(catalog: &mut Catalog, name: &str) -> Material {
    let h = catalog.find_or_build_element("H").unwrap();
    Material::new(
        name,
        Conditions {
            state: State::Gas,
            density: 1.0e-4,
            temperature: 293.15,
            pressure: 1.0,
        },
        vec![(Component::Element(h), Fraction::AtomCount(2.0))],
    )
    .unwrap()
}

#[test]
fn test_register_makes_material_visible() {
    let mut catalog = Catalog::new();
    let material = hydrogen_gas(&mut catalog, "H2Gas");
    catalog.register(material).unwrap();

    assert!(catalog.contains_material("H2Gas"));
    assert_eq!(catalog.registered_material_names(), ["H2Gas".to_string()]);
    assert_eq!(catalog.material_names().last(), Some(&"H2Gas"));
    let found = catalog.find_or_build_material("H2Gas").unwrap();
    assert_eq!(found.name(), "H2Gas");
}

#[test]
fn test_register_rejects_duplicates() {
    let mut catalog = Catalog::new();
    let clash = hydrogen_gas(&mut catalog, "G4_WATER");
    assert!(matches!(
        catalog.register(clash),
        Err(NistMatError::DuplicateMaterialName(name)) if name == "G4_WATER"
    ));

    let first = hydrogen_gas(&mut catalog, "H2Gas");
    let second = hydrogen_gas(&mut catalog, "H2Gas");
    catalog.register(first).unwrap();
    assert!(matches!(
        catalog.register(second),
        Err(NistMatError::DuplicateMaterialName(_))
    ));
}

#[test]
fn test_catalogs_are_independent() {
    let mut first = Catalog::new();
    let material = hydrogen_gas(&mut first, "H2Gas");
    first.register(material).unwrap();

    let second = Catalog::new();
    assert!(!second.contains_material("H2Gas"));
}

#[test]
fn test_from_data_rejects_duplicate_records() {
    let record = MaterialRecord {
        name: "G4_WATER".to_string(),
        state: State::Liquid,
        density: 1.0,
        mean_excitation_energy: Some(78.0),
        temperature: None,
        pressure: None,
        components: vec![ComponentRecord {
            element: "H".to_string(),
            kind: CompositionKind::AtomCount,
            weight: 2.0,
        }],
    };
    let data = CatalogData {
        elements: Vec::new(),
        materials: vec![record.clone(), record],
    };
    assert!(matches!(
        Catalog::from_data(data),
        Err(NistMatError::DuplicateMaterialName(_))
    ));
}

#[test]
fn test_invalid_compositions() {
    let mut catalog = Catalog::new();
    let h = catalog.find_or_build_element("H").unwrap();
    let water = catalog.find_or_build_material("G4_WATER").unwrap();
    let conditions = water.conditions();

    let empty = Material::new("Empty", conditions, Vec::new());
    assert!(matches!(empty, Err(NistMatError::InvalidComposition { .. })));

    let mixed = Material::new(
        "Mixed",
        conditions,
        vec![
            (Component::Element(h.clone()), Fraction::AtomCount(2.0)),
            (Component::Material(water.clone()), Fraction::Mass(0.5)),
        ],
    );
    assert!(matches!(mixed, Err(NistMatError::InvalidComposition { .. })));

    let atoms_of_material = Material::new(
        "AtomsOfWater",
        conditions,
        vec![(Component::Material(water), Fraction::AtomCount(1.0))],
    );
    assert!(matches!(
        atoms_of_material,
        Err(NistMatError::InvalidComposition { .. })
    ));

    let negative = Material::new(
        "Negative",
        conditions,
        vec![(Component::Element(h), Fraction::Mass(-0.1))],
    );
    assert!(matches!(negative, Err(NistMatError::InvalidComposition { .. })));
}
