use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use toolgate_core::traits::DataSources;
use toolgate_core::{ArgumentBag, Error, ToolDescriptor};

use crate::resolvers;

/// Business logic of a tool: arguments in, text result out.
pub type ToolHandler = Box<dyn Fn(&ArgumentBag) -> Result<String, Error> + Send + Sync>;

/// Definition of an MCP tool as returned by `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl From<&ToolDescriptor> for ToolDefinition {
    fn from(descriptor: &ToolDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            description: descriptor.description.clone(),
            input_schema: input_schema(descriptor),
        }
    }
}

/// Render a descriptor's parameters as a JSON-schema object.
#[must_use]
pub fn input_schema(descriptor: &ToolDescriptor) -> Value {
    let properties: Map<String, Value> = descriptor
        .parameters
        .iter()
        .map(|p| {
            (
                p.name.clone(),
                serde_json::json!({
                    "type": p.kind.as_str(),
                    "description": p.description,
                }),
            )
        })
        .collect();

    let required: Vec<&str> = descriptor
        .parameters
        .iter()
        .filter(|p| p.required)
        .map(|p| p.name.as_str())
        .collect();

    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: ToolHandler,
}

/// Closed set of tools, populated once at startup.
///
/// Tools are listed in registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the four built-in tools, reading from `sources`.
    ///
    /// # Errors
    ///
    /// Fails only if a built-in descriptor is inconsistent (duplicate tool or
    /// parameter name).
    pub fn with_default_tools(sources: &DataSources) -> Result<Self, Error> {
        let mut registry = Self::new();

        registry.register(
            resolvers::greeting::descriptor(),
            Box::new(resolvers::greeting::resolve),
        )?;

        let weather = sources.weather.clone();
        registry.register(
            resolvers::weather::descriptor(),
            Box::new(move |args: &ArgumentBag| {
                resolvers::weather::resolve(weather.as_ref(), args)
            }),
        )?;

        let catalog = sources.catalog.clone();
        registry.register(
            resolvers::products::descriptor(),
            Box::new(move |args: &ArgumentBag| {
                resolvers::products::resolve(catalog.as_ref(), args)
            }),
        )?;

        let orders = sources.orders.clone();
        registry.register(
            resolvers::orders::descriptor(),
            Box::new(move |args: &ArgumentBag| {
                resolvers::orders::resolve(orders.as_ref(), args)
            }),
        )?;

        Ok(registry)
    }

    /// Add a tool.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateTool`] if the name is taken, or
    /// [`Error::DuplicateParameter`] if the descriptor repeats a parameter.
    pub fn register(
        &mut self,
        descriptor: ToolDescriptor,
        handler: ToolHandler,
    ) -> Result<(), Error> {
        if self.by_name.contains_key(&descriptor.name) {
            return Err(Error::DuplicateTool(descriptor.name));
        }
        if let Some(parameter) = descriptor.duplicate_parameter() {
            return Err(Error::DuplicateParameter {
                tool: descriptor.name.clone(),
                parameter: parameter.to_string(),
            });
        }

        tracing::debug!(tool = %descriptor.name, "registered tool");
        self.by_name.insert(descriptor.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool {
            descriptor,
            handler,
        });
        Ok(())
    }

    /// Descriptors of all tools, in registration order.
    pub fn list(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter().map(|t| &t.descriptor)
    }

    /// Look up a tool's handler by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolNotFound`] if no tool has this name.
    pub fn resolve(&self, name: &str) -> Result<&ToolHandler, Error> {
        self.by_name
            .get(name)
            .map(|&i| &self.tools[i].handler)
            .ok_or_else(|| Error::ToolNotFound(name.to_string()))
    }

    /// Return the list of tool definitions for the MCP `tools/list` method.
    #[must_use]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.list().map(ToolDefinition::from).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
