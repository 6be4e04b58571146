//! Parsers for the embedded catalog tables (`data/elements.dat`,
//! `data/materials.dat`).

use nistmat_data::{
    CatalogData, ComponentRecord, CompositionKind, ElementRecord, IsotopeRecord, MaterialRecord,
    State,
};
use tracing::warn;

use crate::chemparser::chemparse;
use crate::constants::FRACTION_TOLERANCE;
use crate::error::{NistMatError, Result};

pub fn parse_catalog(elements: &str, materials: &str) -> Result<CatalogData> {
    Ok(CatalogData {
        elements: parse_elements(elements)?,
        materials: parse_materials(materials)?,
    })
}

pub fn parse_elements(content: &str) -> Result<Vec<ElementRecord>> {
    let mut records: Vec<ElementRecord> = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.starts_with('#') || line.is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        let err = |msg: &str| data_error(lineno, msg, line);
        match parts[0] {
            "element" => {
                if parts.len() != 7 {
                    return Err(err("expected 6 fields after 'element'"));
                }
                records.push(ElementRecord {
                    atomic_number: parse_field(parts[1], lineno, line)?,
                    symbol: parts[2].to_string(),
                    name: parts[3].to_string(),
                    mean_excitation_energy: parse_optional(parts[4], lineno, line)?,
                    state: State::from_tag(parts[5]),
                    density: parse_optional(parts[6], lineno, line)?,
                    isotopes: Vec::new(),
                });
            }
            "isotope" => {
                if parts.len() != 4 {
                    return Err(err("expected 3 fields after 'isotope'"));
                }
                let isotope = IsotopeRecord {
                    nucleons: parse_field(parts[1], lineno, line)?,
                    molar_mass: parse_field(parts[2], lineno, line)?,
                    abundance: parse_field(parts[3], lineno, line)?,
                };
                let Some(element) = records.last_mut() else {
                    return Err(err("isotope line before any element"));
                };
                element.isotopes.push(isotope);
            }
            _ => return Err(err("unknown record type")),
        }
    }
    Ok(records)
}

pub fn parse_materials(content: &str) -> Result<Vec<MaterialRecord>> {
    let mut records = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.starts_with('#') || line.is_empty() {
            continue;
        }
        let Some((header, composition)) = line.split_once('|') else {
            return Err(data_error(lineno, "missing '|' before composition", line));
        };

        let fields: Vec<&str> = header.split_whitespace().collect();
        if fields.len() != 4 && fields.len() != 6 {
            return Err(data_error(
                lineno,
                "expected <name> <state> <density> <I> [<T> <P>]",
                line,
            ));
        }
        let (temperature, pressure) = if fields.len() == 6 {
            (
                Some(parse_field(fields[4], lineno, line)?),
                Some(parse_field(fields[5], lineno, line)?),
            )
        } else {
            (None, None)
        };

        let name = fields[0].to_string();
        let components = parse_composition(composition.trim(), lineno, line)?;
        if components
            .first()
            .is_some_and(|c| c.kind == CompositionKind::MassFraction)
        {
            let total: f64 = components.iter().map(|c| c.weight).sum();
            if (total - 1.0).abs() > FRACTION_TOLERANCE {
                warn!(material = %name, total, "mass fractions do not sum to one");
            }
        }

        records.push(MaterialRecord {
            name,
            state: State::from_tag(fields[1]),
            density: parse_field(fields[2], lineno, line)?,
            mean_excitation_energy: parse_optional(fields[3], lineno, line)?,
            temperature,
            pressure,
            components,
        });
    }
    Ok(records)
}

fn parse_composition(composition: &str, lineno: usize, line: &str) -> Result<Vec<ComponentRecord>> {
    let (kind, rest) = composition
        .split_once(char::is_whitespace)
        .ok_or_else(|| data_error(lineno, "empty composition", line))?;

    match kind {
        "atoms" => Ok(chemparse(rest.trim())?
            .into_iter()
            .map(|(element, weight)| ComponentRecord {
                element,
                kind: CompositionKind::AtomCount,
                weight,
            })
            .collect()),
        "mass" => rest
            .split_whitespace()
            .map(|pair| -> Result<ComponentRecord> {
                let (element, weight) = pair
                    .split_once(':')
                    .ok_or_else(|| data_error(lineno, "expected <El>:<w>", line))?;
                Ok(ComponentRecord {
                    element: element.to_string(),
                    kind: CompositionKind::MassFraction,
                    weight: parse_field(weight, lineno, line)?,
                })
            })
            .collect(),
        _ => Err(data_error(lineno, "composition must start with 'atoms' or 'mass'", line)),
    }
}

fn parse_field<T: std::str::FromStr>(field: &str, lineno: usize, line: &str) -> Result<T> {
    field
        .parse()
        .map_err(|_| data_error(lineno, &format!("invalid value '{field}'"), line))
}

fn parse_optional(field: &str, lineno: usize, line: &str) -> Result<Option<f64>> {
    if field == "-" {
        Ok(None)
    } else {
        parse_field(field, lineno, line).map(Some)
    }
}

fn data_error(lineno: usize, msg: &str, line: &str) -> NistMatError {
    NistMatError::DataError(format!("line {}: {msg}: '{line}'", lineno + 1))
}
