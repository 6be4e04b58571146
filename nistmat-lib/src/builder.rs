//! Construction of derived materials from catalog substances.
//!
//! Every material built here is registered into the catalog right away, so
//! later builds can use it as a base and the serializer resolves it
//! through the same lookup as predefined materials.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::constants::{
    FRACTION_TOLERANCE, NAME_PRECISION, NTP_TEMPERATURE, STP_PRESSURE, STP_TEMPERATURE,
};
use crate::error::{NistMatError, Result};
use crate::format::{format_general, format_percent};
use crate::substance::{Component, Conditions, Fraction, Material, State};

/// A catalog material together with the label used for it in generated
/// names, e.g. `G4_Ar` labelled `Argon`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constituent<'a> {
    pub material: &'a str,
    pub label: &'a str,
}

impl<'a> Constituent<'a> {
    pub const fn new(material: &'a str, label: &'a str) -> Self {
        Constituent { material, label }
    }
}

/// `GasMixture-<target><percent>%<quencher><pressure>Bar`
pub fn generate_mixture_name(
    target: &str,
    quencher: &str,
    quencher_percent: f64,
    pressure_bar: f64,
) -> String {
    gas_mixture_name(target, &[(quencher, quencher_percent)], pressure_bar)
}

/// Name of a mixture with any number of quenchers, each written as
/// `<percent>%<label>` after the target.
pub fn gas_mixture_name(target: &str, quenchers: &[(&str, f64)], pressure_bar: f64) -> String {
    let mut name = format!("GasMixture-{target}");
    for (label, percent) in quenchers {
        name.push_str(&format_general(*percent, NAME_PRECISION));
        name.push('%');
        name.push_str(label);
    }
    name.push_str(&format_general(pressure_bar, NAME_PRECISION));
    name.push_str("Bar");
    name
}

/// `<base>-<primary><p>%` or `<base>-<primary><p>%<secondary><s>%`, with
/// fractions given in `[0, 1]`.
pub fn scintillator_name(
    base: &str,
    primary: &str,
    primary_fraction: f64,
    secondary: Option<(&str, f64)>,
) -> String {
    let mut name = format!(
        "{base}-{primary}{}%",
        format_percent(primary_fraction, NAME_PRECISION)
    );
    if let Some((label, fraction)) = secondary {
        name.push_str(label);
        name.push_str(&format_percent(fraction, NAME_PRECISION));
        name.push('%');
    }
    name
}

/// Mass fractions passed to [`MaterialBuilder::build_mixture_by_fraction`]
/// must satisfy this; the builder itself does not renormalize.
pub fn fractions_sum_to_one(fractions: impl IntoIterator<Item = f64>) -> bool {
    let total: f64 = fractions.into_iter().sum();
    (total - 1.0).abs() <= FRACTION_TOLERANCE
}

/// Builds derived materials into a catalog and remembers their order.
pub struct MaterialBuilder<'c> {
    catalog: &'c mut Catalog,
    derived: Vec<Arc<Material>>,
}

impl<'c> MaterialBuilder<'c> {
    pub fn new(catalog: &'c mut Catalog) -> Self {
        MaterialBuilder {
            catalog,
            derived: Vec::new(),
        }
    }

    /// Compound defined by relative atom counts of elements.
    ///
    /// Density and state cannot be derived from the constituents and are
    /// given by the caller.
    pub fn build_compound(
        &mut self,
        name: &str,
        density: f64,
        state: State,
        components: &[(&str, f64)],
    ) -> Result<Arc<Material>> {
        let mut resolved = Vec::with_capacity(components.len());
        for (element, count) in components {
            let element = self
                .catalog
                .find_or_build_element(element)
                .map_err(|err| match err {
                    NistMatError::UnknownElement(_) => {
                        NistMatError::MissingBaseSubstance(element.to_string())
                    }
                    other => other,
                })?;
            resolved.push((Component::Element(element), Fraction::AtomCount(*count)));
        }
        let conditions = Conditions {
            state,
            density,
            temperature: NTP_TEMPERATURE,
            pressure: STP_PRESSURE,
        };
        self.register(Material::new(name, conditions, resolved)?)
    }

    /// Blend of catalog materials by mass fraction.
    ///
    /// The density is the fraction-weighted sum of the constituent
    /// densities; for gases it is further scaled by `pressure` over the
    /// standard atmosphere.
    pub fn build_mixture_by_fraction(
        &mut self,
        name: &str,
        components: &[(&str, f64)],
        state: State,
        temperature: f64,
        pressure: f64,
    ) -> Result<Arc<Material>> {
        let mut resolved = Vec::with_capacity(components.len());
        for (material, fraction) in components {
            resolved.push((self.catalog.find_or_build_material(material)?, *fraction));
        }

        let mut density: f64 = resolved.iter().map(|(m, w)| m.density() * w).sum();
        if state == State::Gas {
            density *= pressure / STP_PRESSURE;
        }

        let conditions = Conditions {
            state,
            density,
            temperature,
            pressure,
        };
        let components = resolved
            .into_iter()
            .map(|(m, w)| (Component::Material(m), Fraction::Mass(w)))
            .collect();
        self.register(Material::new(name, conditions, components)?)
    }

    /// Target gas plus quenchers given in percent by mass, at `pressure`
    /// bar and standard temperature. The target makes up the remainder.
    pub fn build_gas_mixture(
        &mut self,
        target: Constituent<'_>,
        quenchers: &[(Constituent<'_>, f64)],
        pressure: f64,
    ) -> Result<Arc<Material>> {
        let labels: Vec<(&str, f64)> = quenchers.iter().map(|(q, p)| (q.label, *p)).collect();
        let name = gas_mixture_name(target.label, &labels, pressure);

        let quencher_total: f64 = quenchers.iter().map(|(_, p)| p / 100.0).sum();
        let mut components = vec![(target.material, 1.0 - quencher_total)];
        components.extend(quenchers.iter().map(|(q, p)| (q.material, p / 100.0)));

        self.build_mixture_by_fraction(
            &name,
            &components,
            State::Gas,
            STP_TEMPERATURE,
            pressure,
        )
    }

    /// Two materials per primary fraction `p`: base + primary absorber,
    /// and base + primary + secondary absorber at `secondary_fraction`.
    ///
    /// The blends inherit the base material's state, temperature and
    /// pressure. All constituents are resolved before anything is built.
    pub fn build_scintillator_series(
        &mut self,
        base: &str,
        primary: Constituent<'_>,
        secondary: Constituent<'_>,
        primary_fractions: &[f64],
        secondary_fraction: f64,
    ) -> Result<Vec<Arc<Material>>> {
        let base_material = self.catalog.find_or_build_material(base)?;
        self.catalog.find_or_build_material(primary.material)?;
        self.catalog.find_or_build_material(secondary.material)?;

        let state = base_material.state();
        let temperature = base_material.temperature();
        let pressure = base_material.pressure();

        let mut built = Vec::with_capacity(primary_fractions.len() * 2);
        for &p in primary_fractions {
            let name = scintillator_name(base, primary.label, p, None);
            built.push(self.build_mixture_by_fraction(
                &name,
                &[(base, 1.0 - p), (primary.material, p)],
                state,
                temperature,
                pressure,
            )?);

            let name = scintillator_name(
                base,
                primary.label,
                p,
                Some((secondary.label, secondary_fraction)),
            );
            built.push(self.build_mixture_by_fraction(
                &name,
                &[
                    (base, 1.0 - p - secondary_fraction),
                    (primary.material, p),
                    (secondary.material, secondary_fraction),
                ],
                state,
                temperature,
                pressure,
            )?);
        }
        Ok(built)
    }

    /// Derived materials in build order.
    pub fn derived(&self) -> &[Arc<Material>] {
        &self.derived
    }

    pub fn into_derived(self) -> Vec<Arc<Material>> {
        self.derived
    }

    fn register(&mut self, material: Material) -> Result<Arc<Material>> {
        let material = self.catalog.register(material)?;
        self.derived.push(Arc::clone(&material));
        Ok(material)
    }
}
