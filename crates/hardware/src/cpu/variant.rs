//! CPU variant definitions and configured CPUs.
//!
//! A variant is a static rule table: a name, the parameters it declares, and an
//! optional base variant it specializes. Lookups walk the chain from the variant to
//! its root and stop at the first declaration, so a specialization inherits every
//! parameter (and every render override) it does not redeclare, at any depth.
//!
//! [`Cpu`] pairs a variant with the values supplied for it. It is built once from raw
//! input and is immutable afterwards.

use std::fmt;
use std::iter;

use serde::Serialize;
use tracing::debug;

use super::param::{ParamSpec, ParamValue, ParameterSet, RawValue};
use crate::common::ConfigError;

/// Static description of a CPU core family.
#[derive(Debug)]
pub struct VariantDef {
    /// Core name as used by configuration files and templates.
    pub name: &'static str,
    /// Variant this one specializes, if any.
    pub base: Option<&'static Self>,
    /// Parameters declared (or redeclared) at this level.
    pub params: &'static [ParamSpec],
}

impl VariantDef {
    /// Iterates over this variant and then each base, nearest first.
    pub fn lineage(&'static self) -> impl Iterator<Item = &'static Self> {
        iter::successors(Some(self), |def| def.base)
    }

    /// Finds the nearest declaration of `param` along the lineage.
    ///
    /// # Returns
    ///
    /// The declaring variant together with its declaration, or `None` when no level
    /// of the hierarchy knows the parameter.
    pub fn lookup(&'static self, param: &str) -> Option<(&'static Self, &'static ParamSpec)> {
        self.lineage().find_map(|def| {
            def.params
                .iter()
                .find(|spec| spec.name == param)
                .map(|spec| (def, spec))
        })
    }

    /// Returns whether this variant is `other` or specializes it.
    pub fn derives_from(&'static self, other: &'static Self) -> bool {
        self.lineage().any(|def| std::ptr::eq(def, other))
    }

    /// Lists every parameter visible on this variant.
    ///
    /// Own declarations come first, followed by inherited ones that were not redeclared.
    pub fn param_names(&'static self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for def in self.lineage() {
            for spec in def.params {
                if !names.contains(&spec.name) {
                    names.push(spec.name);
                }
            }
        }
        names
    }
}

/// A configured CPU: a variant plus its checked parameter values.
#[derive(Clone, Serialize)]
pub struct Cpu {
    #[serde(rename = "name", serialize_with = "serialize_def_name")]
    def: &'static VariantDef,
    params: ParameterSet,
}

fn serialize_def_name<S: serde::Serializer>(
    def: &&'static VariantDef,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(def.name)
}

impl Cpu {
    /// Builds a CPU from raw parameter input.
    ///
    /// Every entry is validated and coerced immediately; the first bad entry fails
    /// the whole construction. `None` values leave the parameter undefined.
    ///
    /// # Arguments
    ///
    /// * `def` - Variant to instantiate.
    /// * `raw` - Parameter name and raw value pairs.
    ///
    /// # Errors
    ///
    /// `UnknownParameter` for a name the variant does not declare, and
    /// `InvalidParameterValue` for an input that does not coerce.
    pub fn new<I, K, V>(def: &'static VariantDef, raw: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Option<RawValue>>,
    {
        let mut params = ParameterSet::new();
        for (name, value) in raw {
            let name = name.as_ref();
            let (_, spec) = def.lookup(name).ok_or_else(|| ConfigError::UnknownParameter {
                cpu: def.name.to_owned(),
                param: name.to_owned(),
            })?;
            params.set(spec, value.into().as_ref())?;
        }
        debug!(cpu = def.name, defined = params.len(), "configured CPU");
        Ok(Self { def, params })
    }

    /// Builds a CPU with every parameter undefined.
    pub fn bare(def: &'static VariantDef) -> Self {
        Self {
            def,
            params: ParameterSet::new(),
        }
    }

    /// Builds a CPU of the built-in variant called `name`.
    ///
    /// # Errors
    ///
    /// `UnknownCpu` for an unrecognized name, otherwise as [`Cpu::new`].
    pub fn from_name<I, K, V>(name: &str, raw: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Option<RawValue>>,
    {
        Self::new(super::variant_by_name(name)?, raw)
    }

    /// Core name.
    pub fn name(&self) -> &'static str {
        self.def.name
    }

    /// Variant definition.
    pub fn variant(&self) -> &'static VariantDef {
        self.def
    }

    /// Defined parameter values.
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Returns whether `param` holds a value.
    pub fn is_defined(&self, param: &str) -> bool {
        self.params.is_defined(param)
    }

    /// Returns the value of `param`, if defined.
    pub fn get(&self, param: &str) -> Option<&ParamValue> {
        self.params.get(param)
    }

    /// Textual form of `param` for the template layer.
    ///
    /// Uses the render rule of the nearest variant declaring the parameter. Undefined
    /// parameters, and parameters no level of the hierarchy declares, render as `""`.
    pub fn render(&self, param: &str) -> String {
        match (self.def.lookup(param), self.params.get(param)) {
            (Some((_, spec)), Some(value)) => spec.render_value(value),
            _ => String::new(),
        }
    }

    /// Renders every parameter visible on this variant, in declaration order.
    pub fn rendered_params(&self) -> Vec<(&'static str, String)> {
        self.def
            .param_names()
            .into_iter()
            .map(|name| (name, self.render(name)))
            .collect()
    }
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cpu")
            .field("name", &self.def.name)
            .field("params", &self.params)
            .finish()
    }
}
