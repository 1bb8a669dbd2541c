//! The declarative configuration document: the element table plus the rule
//! tables for each transformation pass, the aggregates, and the rendering
//! templates. Everything is checked here, before any document is read.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use tinytemplate::TinyTemplate;
use tracing::debug;

use crate::aggregating::Aggregate;
use crate::language::Element;
use crate::matching::Matchers;
use crate::parsing::{self, Elements};
use crate::transforming::{
    Composite, CompositeRule, Grouping, Pass, Pipeline, Sequence, Sticky, StickyRule,
};

mod error;

pub use error::ConfigError;

/// Pass names in the order they run when the configuration doesn't say.
pub const DEFAULT_PASSES: [&str; 4] = ["group", "sticky", "sequence", "composite"];

fn default_passes() -> Vec<String> {
    DEFAULT_PASSES
        .iter()
        .map(|name| name.to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub elements: Vec<Element>,

    /// Element name to group name.
    #[serde(default)]
    pub groups: HashMap<String, String>,

    #[serde(default)]
    pub stickies: Vec<StickyRule>,

    /// Ranked element name to the lowest rank that gets numbered.
    #[serde(default)]
    pub numbered: HashMap<String, u32>,

    #[serde(default)]
    pub composites: Vec<CompositeRule>,

    #[serde(default)]
    pub aggregates: Vec<Aggregate>,

    /// Template name to template text.
    #[serde(default)]
    pub templates: HashMap<String, String>,

    #[serde(default = "default_passes")]
    pub passes: Vec<String>,
}

impl Config {
    pub fn load(filename: &Path) -> Result<Config, ConfigError> {
        let content = parsing::load(filename)?;
        let config: Config = serde_json::from_slice(&content)?;
        debug!(
            "Loaded configuration with {} element{}",
            config
                .elements
                .len(),
            if config
                .elements
                .len()
                == 1
            {
                ""
            } else {
                "s"
            }
        );
        Ok(config)
    }

    pub fn from_str(content: &str) -> Result<Config, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Check the whole configuration and build the element table from it.
    pub fn validate(&self, matchers: &Matchers) -> Result<Elements, ConfigError> {
        let elements = Elements::new(
            self.elements
                .clone(),
            matchers,
        )?;

        self.check_templates()?;
        self.check_rules(&elements)?;
        self.pipeline()?;

        Ok(elements)
    }

    fn check_templates(&self) -> Result<(), ConfigError> {
        for element in &self.elements {
            if let Some(template) = &element.template {
                if !self
                    .templates
                    .contains_key(template)
                {
                    return Err(ConfigError::UndefinedTemplate {
                        element: element
                            .name
                            .clone(),
                        template: template.clone(),
                    });
                }
            }
        }

        for (name, text) in &self.templates {
            let mut tt = TinyTemplate::new();
            tt.add_template(name, text)
                .map_err(|error| ConfigError::InvalidTemplate {
                    name: name.clone(),
                    details: error.to_string(),
                })?;
        }

        Ok(())
    }

    /// Every name a rule refers to must be a configured element, or the name
    /// of a container another rule produces.
    fn check_rules(&self, elements: &Elements) -> Result<(), ConfigError> {
        let mut known: HashSet<&str> = elements
            .iter()
            .map(|element| {
                element
                    .name
                    .as_str()
            })
            .collect();
        known.extend(
            self.groups
                .values()
                .map(String::as_str),
        );
        known.extend(
            self.stickies
                .iter()
                .map(|rule| rule.name.as_str()),
        );
        known.extend(
            self.composites
                .iter()
                .map(|rule| rule.name.as_str()),
        );

        let check = |rule: &str, name: &str| -> Result<(), ConfigError> {
            if known.contains(name) {
                Ok(())
            } else {
                Err(ConfigError::UnknownElement {
                    rule: rule.to_string(),
                    name: name.to_string(),
                })
            }
        };

        for name in self
            .groups
            .keys()
        {
            check("group", name)?;
        }
        for rule in &self.stickies {
            check("sticky", &rule.element)?;
            if let Some(target) = &rule.target {
                check("sticky", target)?;
            }
        }
        for name in self
            .numbered
            .keys()
        {
            check("numbered", name)?;
        }
        for rule in &self.composites {
            check("composite", &rule.primary)?;
            check("composite", &rule.secondary)?;
        }
        for aggregate in &self.aggregates {
            for name in &aggregate.elements {
                check("aggregate", name)?;
            }
        }

        Ok(())
    }

    /// The transformation passes, in the configured order.
    pub fn pipeline(&self) -> Result<Pipeline, ConfigError> {
        let mut pipeline = Pipeline::new();

        for name in &self.passes {
            let pass: Box<dyn Pass> = match name.as_str() {
                "group" => Box::new(Grouping::new(
                    self.groups
                        .clone(),
                )),
                "sticky" => Box::new(Sticky::new(
                    self.stickies
                        .clone(),
                )),
                "sequence" => Box::new(Sequence::new(
                    self.numbered
                        .clone(),
                )),
                "composite" => Box::new(Composite::new(
                    self.composites
                        .clone(),
                )),
                _ => return Err(ConfigError::UnknownPass(name.clone())),
            };
            pipeline.push(pass);
        }

        Ok(pipeline)
    }
}
