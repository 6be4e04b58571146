//! The fixed set of user materials added on top of the predefined catalog.

use std::sync::Arc;

use crate::builder::{Constituent, MaterialBuilder};
use crate::catalog::Catalog;
use crate::error::Result;
use crate::substance::{Material, State};

pub struct CompoundDefinition {
    pub name: &'static str,
    /// g/cm³
    pub density: f64,
    pub state: State,
    pub atoms: &'static [(&'static str, f64)],
}

pub const COMPOUNDS: &[CompoundDefinition] = &[
    CompoundDefinition {
        name: "Isobutane",
        density: 2.51e-3,
        state: State::Gas,
        atoms: &[("C", 4.0), ("H", 10.0)],
    },
    CompoundDefinition {
        name: "Tetrafluoromethane",
        density: 3.72e-3,
        state: State::Gas,
        atoms: &[("C", 1.0), ("F", 4.0)],
    },
    CompoundDefinition {
        name: "BC408",
        density: 1.023,
        state: State::Solid,
        atoms: &[("C", 9.0), ("H", 10.0)],
    },
    CompoundDefinition {
        name: "LAB",
        density: 0.86,
        state: State::Liquid,
        atoms: &[("C", 18.0), ("H", 30.0)],
    },
];

pub const ARGON: Constituent<'static> = Constituent::new("G4_Ar", "Argon");
pub const XENON: Constituent<'static> = Constituent::new("G4_Xe", "Xenon");
pub const NEON: Constituent<'static> = Constituent::new("G4_Ne", "Neon");
pub const ISOBUTANE: Constituent<'static> = Constituent::new("Isobutane", "Isobutane");
pub const CARBON_DIOXIDE: Constituent<'static> = Constituent::new("G4_CARBON_DIOXIDE", "CO2");
pub const TETRAFLUOROMETHANE: Constituent<'static> =
    Constituent::new("Tetrafluoromethane", "Tetrafluoromethane");

/// bar
pub const GAS_MIXTURE_PRESSURE: f64 = 1.4;

pub struct GasMixtureDefinition {
    pub target: Constituent<'static>,
    /// Quenchers with their share in percent.
    pub quenchers: &'static [(Constituent<'static>, f64)],
}

pub const GAS_MIXTURES: &[GasMixtureDefinition] = &[
    GasMixtureDefinition { target: ARGON, quenchers: &[(ISOBUTANE, 1.0)] },
    GasMixtureDefinition { target: ARGON, quenchers: &[(ISOBUTANE, 2.0)] },
    GasMixtureDefinition { target: ARGON, quenchers: &[(ISOBUTANE, 3.0)] },
    GasMixtureDefinition { target: ARGON, quenchers: &[(ISOBUTANE, 5.0)] },
    GasMixtureDefinition { target: ARGON, quenchers: &[(ISOBUTANE, 10.0)] },
    GasMixtureDefinition { target: XENON, quenchers: &[(ISOBUTANE, 2.0)] },
    GasMixtureDefinition { target: XENON, quenchers: &[(ISOBUTANE, 5.0)] },
    GasMixtureDefinition { target: NEON, quenchers: &[(CARBON_DIOXIDE, 10.0)] },
    GasMixtureDefinition {
        target: ARGON,
        quenchers: &[(ISOBUTANE, 1.0), (TETRAFLUOROMETHANE, 3.0)],
    },
];

pub const SCINTILLATOR_BASE: &str = "LAB";
pub const LEAD: Constituent<'static> = Constituent::new("G4_Pb", "Lead");
pub const CADMIUM: Constituent<'static> = Constituent::new("G4_Cd", "Cadmium");
pub const LEAD_FRACTIONS: &[f64] = &[0.0, 0.01, 0.05, 0.10, 0.20, 0.50];
pub const CADMIUM_FRACTION: f64 = 0.001;

/// Build and register every user material, returning them in build order.
pub fn build_user_materials(catalog: &mut Catalog) -> Result<Vec<Arc<Material>>> {
    let mut builder = MaterialBuilder::new(catalog);

    for compound in COMPOUNDS {
        builder.build_compound(compound.name, compound.density, compound.state, compound.atoms)?;
    }
    for mixture in GAS_MIXTURES {
        builder.build_gas_mixture(mixture.target, mixture.quenchers, GAS_MIXTURE_PRESSURE)?;
    }
    builder.build_scintillator_series(
        SCINTILLATOR_BASE,
        LEAD,
        CADMIUM,
        LEAD_FRACTIONS,
        CADMIUM_FRACTION,
    )?;

    Ok(builder.into_derived())
}
