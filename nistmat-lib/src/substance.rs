use std::sync::Arc;

use nistmat_data::{CompositionKind, ElementRecord};
pub use nistmat_data::State;

use crate::error::{NistMatError, Result};

/// A single nuclide of an element.
#[derive(Debug, Clone, PartialEq)]
pub struct Isotope {
    /// `<symbol><N>`, e.g. `U235`.
    pub name: String,
    pub z: u16,
    pub n: u16,
    /// Relative atomic mass in g/mole.
    pub molar_mass: f64,
}

/// A chemical element with its natural isotope composition.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub symbol: String,
    pub name: String,
    pub z: u16,
    pub isotopes: Vec<Isotope>,
    /// Relative natural abundance per isotope, same order as `isotopes`.
    pub abundances: Vec<f64>,
    /// Mean excitation energy in eV.
    pub mean_excitation_energy: f64,
}

impl Element {
    pub(crate) fn from_record(record: &ElementRecord) -> Result<Self> {
        if record.isotopes.is_empty() {
            return Err(NistMatError::IsotopeDataUnavailable(record.symbol.clone()));
        }
        let mean_excitation_energy = record.mean_excitation_energy.ok_or_else(|| {
            NistMatError::DataError(format!(
                "element {} has isotopes but no mean excitation energy",
                record.symbol
            ))
        })?;

        let isotopes = record
            .isotopes
            .iter()
            .map(|iso| Isotope {
                name: format!("{}{}", record.symbol, iso.nucleons),
                z: record.atomic_number,
                n: iso.nucleons,
                molar_mass: iso.molar_mass,
            })
            .collect();
        let abundances = record.isotopes.iter().map(|iso| iso.abundance).collect();

        Ok(Element {
            symbol: record.symbol.clone(),
            name: record.name.clone(),
            z: record.atomic_number,
            isotopes,
            abundances,
            mean_excitation_energy,
        })
    }

    /// Abundance-weighted molar mass in g/mole.
    pub fn molar_mass(&self) -> f64 {
        let total: f64 = self.abundances.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        self.isotopes
            .iter()
            .zip(&self.abundances)
            .map(|(iso, ab)| iso.molar_mass * ab)
            .sum::<f64>()
            / total
    }
}

/// Weight of one composition entry. The mode decides how the weight is
/// turned into a mass fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fraction {
    AtomCount(f64),
    Mass(f64),
}

impl Fraction {
    pub fn value(self) -> f64 {
        match self {
            Fraction::AtomCount(v) | Fraction::Mass(v) => v,
        }
    }

    pub fn kind(self) -> CompositionKind {
        match self {
            Fraction::AtomCount(_) => CompositionKind::AtomCount,
            Fraction::Mass(_) => CompositionKind::MassFraction,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Component {
    Element(Arc<Element>),
    Material(Arc<Material>),
}

impl Component {
    pub fn name(&self) -> &str {
        match self {
            Component::Element(e) => &e.symbol,
            Component::Material(m) => &m.name,
        }
    }
}

/// Physical conditions a material is defined at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditions {
    pub state: State,
    /// g/cm³
    pub density: f64,
    /// K
    pub temperature: f64,
    /// bar
    pub pressure: f64,
}

/// A material: predefined, elemental or derived from other substances.
///
/// Immutable once constructed; the flattened element mass fractions and
/// the mean excitation energy are computed up front.
#[derive(Debug, Clone)]
pub struct Material {
    name: String,
    conditions: Conditions,
    components: Vec<(Component, Fraction)>,
    element_fractions: Vec<(Arc<Element>, f64)>,
    mean_excitation_energy: f64,
}

impl Material {
    /// Build a material from its composition.
    ///
    /// All entries must use the same fraction mode. Atom counts may only
    /// reference elements. Mass fractions are taken as given, so callers
    /// are responsible for them summing to one.
    pub fn new(
        name: impl Into<String>,
        conditions: Conditions,
        components: Vec<(Component, Fraction)>,
    ) -> Result<Self> {
        let name = name.into();
        let element_fractions = flatten_composition(&name, &components)?;
        let mean_excitation_energy = bragg_mean_excitation_energy(&element_fractions);
        Ok(Material {
            name,
            conditions,
            components,
            element_fractions,
            mean_excitation_energy,
        })
    }

    /// Override the Bragg-additivity estimate with a tabulated value (eV).
    pub fn with_mean_excitation_energy(mut self, energy: f64) -> Self {
        self.mean_excitation_energy = energy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> State {
        self.conditions.state
    }

    pub fn is_gas(&self) -> bool {
        self.conditions.state == State::Gas
    }

    /// g/cm³
    pub fn density(&self) -> f64 {
        self.conditions.density
    }

    /// K
    pub fn temperature(&self) -> f64 {
        self.conditions.temperature
    }

    /// bar
    pub fn pressure(&self) -> f64 {
        self.conditions.pressure
    }

    pub fn conditions(&self) -> Conditions {
        self.conditions
    }

    /// eV
    pub fn mean_excitation_energy(&self) -> f64 {
        self.mean_excitation_energy
    }

    pub fn components(&self) -> &[(Component, Fraction)] {
        &self.components
    }

    /// Mass fraction per constituent element, in order of first appearance.
    pub fn element_fractions(&self) -> &[(Arc<Element>, f64)] {
        &self.element_fractions
    }
}

fn flatten_composition(
    name: &str,
    components: &[(Component, Fraction)],
) -> Result<Vec<(Arc<Element>, f64)>> {
    let invalid = |reason: String| NistMatError::InvalidComposition {
        material: name.to_string(),
        reason,
    };

    let Some((_, first)) = components.first() else {
        return Err(invalid("composition is empty".to_string()));
    };
    let kind = first.kind();

    let mut masses: Vec<(Arc<Element>, f64)> = Vec::new();
    for (component, fraction) in components {
        if fraction.kind() != kind {
            return Err(invalid(
                "atom counts and mass fractions cannot be mixed".to_string(),
            ));
        }
        let weight = fraction.value();
        if !weight.is_finite() || weight < 0.0 {
            return Err(invalid(format!(
                "weight {weight} for '{}' is not a non-negative number",
                component.name()
            )));
        }
        match (component, fraction) {
            (Component::Element(e), Fraction::AtomCount(n)) => {
                add_mass(&mut masses, e, n * e.molar_mass());
            }
            (Component::Element(e), Fraction::Mass(w)) => add_mass(&mut masses, e, *w),
            (Component::Material(m), Fraction::Mass(w)) => {
                for (e, f) in m.element_fractions() {
                    add_mass(&mut masses, e, w * f);
                }
            }
            (Component::Material(m), Fraction::AtomCount(_)) => {
                return Err(invalid(format!(
                    "atom counts must reference elements, got material '{}'",
                    m.name()
                )));
            }
        }
    }

    if kind == CompositionKind::AtomCount {
        let total: f64 = masses.iter().map(|(_, m)| m).sum();
        if total <= 0.0 {
            return Err(invalid("total mass is zero".to_string()));
        }
        for (_, m) in &mut masses {
            *m /= total;
        }
    }
    Ok(masses)
}

fn add_mass(masses: &mut Vec<(Arc<Element>, f64)>, element: &Arc<Element>, mass: f64) {
    match masses.iter_mut().find(|(e, _)| e.z == element.z) {
        Some((_, m)) => *m += mass,
        None => masses.push((Arc::clone(element), mass)),
    }
}

/// ln I = Σ wᵢ (Zᵢ/Aᵢ) ln Iᵢ / Σ wᵢ (Zᵢ/Aᵢ)
pub fn bragg_mean_excitation_energy(fractions: &[(Arc<Element>, f64)]) -> f64 {
    let mut weighted_log = 0.0;
    let mut electrons = 0.0;
    for (element, w) in fractions {
        let a = element.molar_mass();
        if *w <= 0.0 || a <= 0.0 || element.mean_excitation_energy <= 0.0 {
            continue;
        }
        let z_over_a = w * f64::from(element.z) / a;
        weighted_log += z_over_a * element.mean_excitation_energy.ln();
        electrons += z_over_a;
    }
    if electrons > 0.0 {
        (weighted_log / electrons).exp()
    } else {
        0.0
    }
}
