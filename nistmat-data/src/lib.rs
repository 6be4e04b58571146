#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

/// The complete base catalog, parsed from the embedded tables.
#[derive(Debug, Clone, Default)]
pub struct CatalogData {
    pub elements: Vec<ElementRecord>,
    pub materials: Vec<MaterialRecord>,
}

/// Physical state of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    Solid,
    Liquid,
    Gas,
    #[default]
    Undefined,
}

impl State {
    /// Tag used in the XML output.
    pub fn as_str(self) -> &'static str {
        match self {
            State::Solid => "solid",
            State::Liquid => "liquid",
            State::Gas => "gas",
            State::Undefined => "undefined",
        }
    }

    /// Unrecognized tags map to `Undefined`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "solid" => State::Solid,
            "liquid" => State::Liquid,
            "gas" => State::Gas,
            _ => State::Undefined,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementRecord {
    pub atomic_number: u16,
    pub symbol: String,
    pub name: String,
    /// Mean excitation energy in eV.
    pub mean_excitation_energy: Option<f64>,
    pub state: State,
    /// Density of the elemental material in g/cm³.
    pub density: Option<f64>,
    /// Empty when no isotope data is available for the element.
    pub isotopes: Vec<IsotopeRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IsotopeRecord {
    pub nucleons: u16,
    /// Relative atomic mass in g/mole.
    pub molar_mass: f64,
    /// Relative natural abundance (0..=1).
    pub abundance: f64,
}

/// How the weight of a composition entry is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionKind {
    AtomCount,
    MassFraction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentRecord {
    pub element: String,
    pub kind: CompositionKind,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialRecord {
    pub name: String,
    pub state: State,
    /// Density in g/cm³.
    pub density: f64,
    /// Mean excitation energy in eV; `None` means Bragg additivity.
    pub mean_excitation_energy: Option<f64>,
    /// Temperature in K.
    pub temperature: Option<f64>,
    /// Pressure in bar.
    pub pressure: Option<f64>,
    pub components: Vec<ComponentRecord>,
}
