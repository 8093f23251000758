use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ICON_DIR;

const EMBEDDED_CATALOG: &str = include_str!("../../assets/tools.json");

/// One tool shown in the swarm. Identity is its position in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    /// File name under `assets/logos`.
    pub icon: String,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
        }
    }

    /// Asset path handed to the `AssetServer`.
    pub fn icon_path(&self) -> String {
        format!("{ICON_DIR}/{}", self.icon)
    }

    /// Text shown in place of an icon that failed to load.
    pub fn fallback_glyph(&self) -> String {
        self.name.chars().next().map(String::from).unwrap_or_default()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed tool catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tool #{index} has an empty name")]
    EmptyName { index: usize },
}

/// Ordered, immutable list of tools, loaded once at startup.
#[derive(Resource, Clone, Debug, Default)]
pub struct ToolCatalog(pub Vec<ToolDescriptor>);

impl ToolCatalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let tools: Vec<ToolDescriptor> = serde_json::from_str(json)?;
        if let Some(index) = tools.iter().position(|t| t.name.trim().is_empty()) {
            return Err(CatalogError::EmptyName { index });
        }
        Ok(Self(tools))
    }

    /// The catalog compiled in from `assets/tools.json`.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_keeps_order() {
        let catalog = ToolCatalog::embedded().unwrap();
        let names: Vec<_> = catalog.tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            ["Python", "SQL", "Power BI", "Tableau", "OpenCV", "Excel", "Scikit-learn"]
        );
        assert_eq!(catalog.tools()[2].icon_path(), "logos/power bi.png");
    }

    #[test]
    fn rejects_malformed_json() {
        let err = ToolCatalog::from_json(r#"[{ "name": "Rust" }]"#).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn rejects_blank_names() {
        let json = r#"[{ "name": "Rust", "icon": "rust.png" }, { "name": " ", "icon": "x.png" }]"#;
        let err = ToolCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyName { index: 1 }));
    }

    #[test]
    fn fallback_is_first_character() {
        assert_eq!(ToolDescriptor::new("Scikit-learn", "scikit.png").fallback_glyph(), "S");
        assert_eq!(ToolDescriptor::new("Ølstat", "o.png").fallback_glyph(), "Ø");
        assert_eq!(ToolDescriptor::new("", "o.png").fallback_glyph(), "");
    }
}
