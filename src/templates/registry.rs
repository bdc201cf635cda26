use std::collections::HashMap;

use crate::composition::Color;

/// A named preset mapping to a background color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Lookup key, e.g. `promotional-sale`
    pub slug: String,

    /// Display name
    pub label: String,

    pub background: Color,
}

impl Template {
    pub fn new<S: Into<String>, L: Into<String>>(slug: S, label: L, background: Color) -> Self {
        Self {
            slug: slug.into(),
            label: label.into(),
            background,
        }
    }
}

/// Registry of available templates
///
/// Templates are registered by slug. The four built-in presets are always
/// present; callers may add their own.
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new registry with all built-in templates
    pub fn new() -> Self {
        let mut registry = Self {
            templates: HashMap::new(),
        };

        registry.register_builtin_templates();
        registry
    }

    fn register_builtin_templates(&mut self) {
        self.register(Template::new("promotional-sale", "Promotional Sale", Color::rgb(0xFF, 0xEB, 0xEE)));
        self.register(Template::new("new-product", "New Product", Color::rgb(0xE3, 0xF2, 0xFD)));
        self.register(Template::new("seasonal-offer", "Seasonal Offer", Color::rgb(0xE8, 0xF5, 0xE9)));
        self.register(Template::new("clubcard-exclusive", "Clubcard Exclusive", Color::rgb(0xFF, 0xF3, 0xE0)));
    }

    /// Register a template, replacing any existing one with the same slug
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.slug.clone(), template);
    }

    /// Get a template by slug
    pub fn get_template(&self, slug: &str) -> Option<&Template> {
        self.templates.get(slug)
    }

    /// All templates, sorted by slug
    pub fn templates(&self) -> Vec<&Template> {
        let mut templates: Vec<&Template> = self.templates.values().collect();
        templates.sort_by(|a, b| a.slug.cmp(&b.slug));
        templates
    }

    /// Get all available template slugs
    pub fn available_templates(&self) -> Vec<String> {
        self.templates().into_iter().map(|t| t.slug.clone()).collect()
    }

    pub fn has_template(&self, slug: &str) -> bool {
        self.templates.contains_key(slug)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}
