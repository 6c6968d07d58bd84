//! Route-registration module generator.
//!
//! Renders a React Router module that lazily imports every registered page
//! not yet wired into the router and returns their `<Route>` elements.
//! Output is a pure function of its inputs so the file can be regenerated and
//! diffed on every run.

use std::{collections::HashSet, fmt::Write};

use crate::{
    config::Config,
    core::{ExistingRouteSet, RouteEntry, RouteRegistry},
    utils::plural,
};

/// Names spliced into the generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteModuleOptions {
    pub page_import_prefix: String,
    pub boundary: String,
    pub boundary_import: String,
    pub function_name: String,
}

impl RouteModuleOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            page_import_prefix: config.page_import_prefix.clone(),
            boundary: config.lazy_boundary.clone(),
            boundary_import: config.lazy_boundary_import.clone(),
            function_name: config.route_module.function_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteModule {
    /// Routes declared by the module, sorted by path.
    pub routes: Vec<RouteEntry>,
    pub source: String,
}

/// Registry entries whose path the router does not declare yet, by path.
pub fn new_routes(registry: &RouteRegistry, existing: &ExistingRouteSet) -> Vec<RouteEntry> {
    let mut routes: Vec<RouteEntry> = registry
        .iter()
        .filter(|entry| !existing.contains(&entry.path))
        .cloned()
        .collect();
    routes.sort_by(|a, b| a.path.cmp(&b.path));
    routes
}

pub fn render_route_module(
    registry: &RouteRegistry,
    existing: &ExistingRouteSet,
    options: &RouteModuleOptions,
) -> RouteModule {
    let routes = new_routes(registry, existing);
    let source = render_source(&routes, options);
    RouteModule { routes, source }
}

fn render_source(routes: &[RouteEntry], options: &RouteModuleOptions) -> String {
    let mut out = String::new();
    let boundary = &options.boundary;

    // Writing into a String cannot fail
    let _ = writeln!(out, "import {{ lazy }} from 'react';");
    let _ = writeln!(out, "import {{ Route }} from 'react-router-dom';");
    let _ = writeln!(
        out,
        "import {{ {} }} from '{}';",
        boundary, options.boundary_import
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "// Auto-generated by routegen - do not edit manually");
    let _ = writeln!(out, "// {}", plural(routes.len(), "route", "routes"));
    let _ = writeln!(out);

    let bindings = component_bindings(routes, options);
    for (route, binding) in routes.iter().zip(&bindings) {
        let _ = writeln!(
            out,
            "const {} = lazy(() => import('{}'));",
            binding,
            escape_single_quoted(&format!("{}{}", options.page_import_prefix, route.identifier))
        );
    }
    if !routes.is_empty() {
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "/**");
    let _ = writeln!(out, " * Returns the generated page routes as JSX elements.");
    let _ = writeln!(out, " * Usage in AppRouter: {{{}()}}", options.function_name);
    let _ = writeln!(out, " */");
    let _ = writeln!(out, "export function {}() {{", options.function_name);
    let _ = writeln!(out, "  return (");
    let _ = writeln!(out, "    <>");
    for (route, binding) in routes.iter().zip(&bindings) {
        let _ = writeln!(out, "      <Route");
        let _ = writeln!(out, "        path={}", jsx_attribute_value(&route.path));
        let _ = writeln!(out, "        element={{");
        let _ = writeln!(out, "          <{}>", boundary);
        let _ = writeln!(out, "            <{} />", binding);
        let _ = writeln!(out, "          </{}>", boundary);
        let _ = writeln!(out, "        }}");
        let _ = writeln!(out, "      />");
    }
    let _ = writeln!(out, "    </>");
    let _ = writeln!(out, "  );");
    let _ = writeln!(out, "}}");

    out
}

/// A component binding per route, derived from its page identifier.
///
/// File stems such as `cable-size` or `Foo.page` are not valid JavaScript
/// bindings, and JSX treats lowercase tags as intrinsic elements, so each
/// identifier is PascalCased. Clashes with each other or with the module's
/// own imports get a numeric suffix.
fn component_bindings(routes: &[RouteEntry], options: &RouteModuleOptions) -> Vec<String> {
    let mut taken: HashSet<String> = ["lazy", "Route", options.boundary.as_str()]
        .into_iter()
        .map(String::from)
        .collect();

    routes
        .iter()
        .map(|route| {
            let base = pascal_case_binding(&route.identifier);
            let mut binding = base.clone();
            let mut suffix = 2;
            while !taken.insert(binding.clone()) {
                binding = format!("{}{}", base, suffix);
                suffix += 1;
            }
            binding
        })
        .collect()
}

fn pascal_case_binding(identifier: &str) -> String {
    let mut binding: String = identifier
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
                .unwrap_or_default()
        })
        .collect();

    if !binding.starts_with(|c: char| c.is_ascii_uppercase()) {
        binding.insert_str(0, "Page");
    }
    binding
}

fn escape_single_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

/// `"value"`, or a `{"..."}` expression when the value holds a double quote,
/// which JSX string attributes cannot escape.
fn jsx_attribute_value(value: &str) -> String {
    if value.contains('"') {
        format!("{{{}}}", serde_json::Value::from(value))
    } else {
        format!("\"{}\"", value)
    }
}
