//! TOML model manifests.
//!
//! A manifest describes component types, their subcomponent instances and
//! connectors, and optionally expanded instance trees:
//!
//! ```toml
//! [[component]]
//! name = "Inner"
//! in = ["x"]
//! out = ["y"]
//!
//! [[component]]
//! name = "Outer"
//! in = ["a"]
//! out = ["b"]
//!
//!   [[component.instance]]
//!   name = "s"
//!   type = "Inner"
//!
//!     [[component.instance.connect]]
//!     source = "y"
//!     target = "b"
//!
//!   [[component.connect]]
//!   source = "a"
//!   target = "s.x"
//!
//! [[expansion]]
//! name = "outer"
//! type = "Outer"
//!
//!   [[expansion.instance]]
//!   name = "s"
//!   type = "Inner"
//! ```
//!
//! A connector declares exactly one of `source` and `constant`. Every name
//! keeps its byte range in the manifest so findings point back into it.

use std::{fmt, ops::Range};

use log::{debug, info};
use serde::Deserialize;
use toml::Spanned;

use arcwire_check::error::{CheckError, Diagnostic, DiagnosticCollector};
use arcwire_core::{
    model::{Component, Connector, ExpandedInstance, Instance, Model, ModelError, Port},
    qualified::SEPARATOR,
    span::Span,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default, rename = "component")]
    components: Vec<ComponentDecl>,
    #[serde(default, rename = "expansion")]
    expansions: Vec<ExpansionDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ComponentDecl {
    name: Spanned<String>,
    #[serde(default, rename = "in")]
    incoming: Vec<Spanned<String>>,
    #[serde(default, rename = "out")]
    outgoing: Vec<Spanned<String>>,
    #[serde(default, rename = "instance")]
    instances: Vec<InstanceDecl>,
    #[serde(default, rename = "connect")]
    connectors: Vec<ConnectDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InstanceDecl {
    name: Spanned<String>,
    #[serde(rename = "type")]
    type_name: Spanned<String>,
    #[serde(default, rename = "connect")]
    connectors: Vec<ConnectDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExpansionDecl {
    name: Spanned<String>,
    #[serde(rename = "type")]
    type_name: Spanned<String>,
    #[serde(default, rename = "instance")]
    children: Vec<ExpansionDecl>,
    #[serde(default, rename = "connect")]
    connectors: Vec<ConnectDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConnectDecl {
    source: Option<Spanned<String>>,
    constant: Option<Spanned<Literal>>,
    target: Spanned<String>,
}

/// The value of a constant connector as written in the manifest.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Literal {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Boolean(value) => write!(f, "{value}"),
            Literal::Integer(value) => write!(f, "{value}"),
            Literal::Float(value) => write!(f, "{value:?}"),
            Literal::Text(value) => write!(f, "{value}"),
        }
    }
}

/// Parse a manifest and build the model it describes.
///
/// # Errors
///
/// Returns a [`CheckError`] for TOML syntax errors, manifest shape errors
/// (all of them, not just the first) and structural model defects such as
/// duplicate declarations.
pub fn load(source: &str) -> Result<Model, CheckError> {
    info!(bytes = source.len(); "Loading manifest");

    let manifest: Manifest = toml::from_str(source).map_err(syntax_error)?;
    debug!(
        components = manifest.components.len(),
        expansions = manifest.expansions.len();
        "Manifest parsed"
    );

    let mut lowering = Lowering::default();
    let mut builder = Model::builder();
    for decl in manifest.components {
        builder = builder.component(lowering.component(decl));
    }
    for decl in manifest.expansions {
        builder = builder.expansion(lowering.expansion(decl));
    }
    lowering.diagnostics.finish()?;

    builder.build().map_err(|err| model_error(&err).into())
}

/// Turns manifest declarations into model values, collecting shape errors.
#[derive(Debug, Default)]
struct Lowering {
    diagnostics: DiagnosticCollector,
}

impl Lowering {
    fn component(&mut self, decl: ComponentDecl) -> Component {
        let mut component =
            Component::new(self.name(&decl.name, "component")).with_span(span(decl.name.span()));

        for port in &decl.incoming {
            component = component
                .with_port(Port::incoming(self.name(port, "port")).with_span(span(port.span())));
        }
        for port in &decl.outgoing {
            component = component
                .with_port(Port::outgoing(self.name(port, "port")).with_span(span(port.span())));
        }
        for instance in decl.instances {
            component = component.with_instance(self.instance(instance));
        }
        for connector in decl.connectors {
            if let Some(connector) = self.connector(connector) {
                component = component.with_connector(connector);
            }
        }

        component
    }

    fn instance(&mut self, decl: InstanceDecl) -> Instance {
        let location = span(decl.name.span()).union(span(decl.type_name.span()));
        let mut instance = Instance::new(
            self.name(&decl.name, "instance"),
            self.name(&decl.type_name, "component type"),
        )
        .with_span(location);

        for connector in decl.connectors {
            if let Some(connector) = self.connector(connector) {
                instance = instance.with_connector(connector);
            }
        }
        instance
    }

    fn expansion(&mut self, decl: ExpansionDecl) -> ExpandedInstance {
        let location = span(decl.name.span()).union(span(decl.type_name.span()));
        let mut expanded = ExpandedInstance::new(
            self.name(&decl.name, "expanded instance"),
            self.name(&decl.type_name, "component type"),
        )
        .with_span(location);

        for child in decl.children {
            expanded = expanded.with_child(self.expansion(child));
        }
        for connector in decl.connectors {
            if let Some(connector) = self.connector(connector) {
                expanded = expanded.with_connector(connector);
            }
        }
        expanded
    }

    fn connector(&mut self, decl: ConnectDecl) -> Option<Connector> {
        let target_span = span(decl.target.span());
        let target = decl.target.into_inner();

        match (decl.source, decl.constant) {
            (Some(source), None) => {
                let location = span(source.span()).union(target_span);
                Some(Connector::new(source.into_inner(), target).with_span(location))
            }
            (None, Some(constant)) => {
                let location = span(constant.span()).union(target_span);
                Some(
                    Connector::constant(constant.into_inner().to_string(), target)
                        .with_span(location),
                )
            }
            (Some(source), Some(constant)) => {
                self.diagnostics.emit(
                    Diagnostic::error(format!(
                        "connector to `{target}` declares both a source and a constant"
                    ))
                    .with_label(span(source.span()), "source declared here")
                    .with_secondary_label(span(constant.span()), "constant declared here")
                    .with_help("remove one of `source` and `constant`"),
                );
                None
            }
            (None, None) => {
                self.diagnostics.emit(
                    Diagnostic::error(format!("connector to `{target}` has no source"))
                        .with_label(target_span, "connector declared here")
                        .with_help("add a `source` port reference or a `constant` value"),
                );
                None
            }
        }
    }

    /// A declared name, checked to be a single non-empty segment.
    fn name<'d>(&mut self, name: &'d Spanned<String>, what: &str) -> &'d str {
        let value = name.get_ref();
        if value.is_empty() {
            self.diagnostics.emit(
                Diagnostic::error(format!("{what} name is empty"))
                    .with_label(span(name.span()), "empty name"),
            );
        } else if value.contains(SEPARATOR) {
            self.diagnostics.emit(
                Diagnostic::error(format!("{what} name `{value}` contains `{SEPARATOR}`"))
                    .with_label(span(name.span()), "declared here")
                    .with_help("`.` separates an instance from a port in connector endpoints"),
            );
        }
        value
    }
}

fn span(range: Range<usize>) -> Span {
    Span::new(range)
}

fn syntax_error(err: toml::de::Error) -> CheckError {
    let diagnostic = Diagnostic::error(format!("invalid manifest: {}", err.message().trim()));
    match err.span() {
        Some(range) => diagnostic.with_label(span(range), "here").into(),
        None => diagnostic.into(),
    }
}

fn model_error(err: &ModelError) -> Diagnostic {
    let diagnostic = Diagnostic::error(err.to_string());
    match err.first_span() {
        Some(first) => diagnostic
            .with_label(err.span(), "declared again here")
            .with_secondary_label(first, "first declared here"),
        None => diagnostic.with_label(err.span(), "declared here"),
    }
}

#[cfg(test)]
mod tests {
    use arcwire_core::{identifier::Id, model::Direction};

    use super::*;

    const MANIFEST: &str = r#"
[[component]]
name = "Inner"
in = ["x"]
out = ["y"]

[[component]]
name = "Outer"
in = ["a"]
out = ["b"]

  [[component.instance]]
  name = "s"
  type = "Inner"

    [[component.instance.connect]]
    source = "y"
    target = "b"

  [[component.connect]]
  source = "a"
  target = "s.x"

  [[component.connect]]
  constant = 3
  target = "s.x"

[[expansion]]
name = "outer"
type = "Outer"

  [[expansion.instance]]
  name = "s"
  type = "Inner"
"#;

    #[test]
    fn test_load_components() {
        let model = load(MANIFEST).unwrap();

        let outer = model.component(model.component_named(Id::new("Outer")).unwrap()).unwrap();
        assert_eq!(outer.instances().len(), 1);
        assert_eq!(outer.connectors().len(), 2);
        assert_eq!(outer.instances()[0].simple_connectors().len(), 1);

        let a = outer.port(Id::new("a")).unwrap();
        assert_eq!(a.direction(), Direction::In);
        let declared = &MANIFEST[a.span().start()..a.span().end()];
        assert_eq!(declared.trim_matches('"'), "a");
    }

    #[test]
    fn test_load_constant_connector() {
        let model = load(MANIFEST).unwrap();
        let outer = model.component(model.component_named(Id::new("Outer")).unwrap()).unwrap();

        let constant = &outer.connectors()[1];
        assert!(constant.is_constant());
        assert_eq!(constant.constant_value(), Some("3"));
        assert_eq!(constant.source(), "CONSTANTPORT1");
    }

    #[test]
    fn test_float_constant_keeps_its_written_form() {
        let source = r#"
[[component]]
name = "Inner"
in = ["x"]

[[component]]
name = "Outer"

  [[component.instance]]
  name = "s"
  type = "Inner"

  [[component.connect]]
  constant = 1.0
  target = "s.x"
"#;
        let model = load(source).unwrap();
        let outer = model.component(model.component_named(Id::new("Outer")).unwrap()).unwrap();

        assert_eq!(outer.connectors()[0].constant_value(), Some("1.0"));
    }

    #[test]
    fn test_load_expansion() {
        let model = load(MANIFEST).unwrap();

        let names: Vec<String> = model
            .expanded_instances()
            .map(|(_, instance)| instance.name().to_string())
            .collect();
        assert_eq!(names, ["outer", "s"]);
    }

    #[test]
    fn test_syntax_error_is_a_diagnostic() {
        let err = load("[[component]\nname = ").unwrap_err();

        assert_eq!(err.diagnostics().len(), 1);
        assert!(err.diagnostics()[0].message().starts_with("invalid manifest"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = load("[[component]]\nname = \"A\"\nports = []\n").unwrap_err();

        assert!(err.diagnostics()[0].message().contains("ports"));
    }

    #[test]
    fn test_connector_shape_errors_are_all_reported() {
        let source = r#"
[[component]]
name = "A"

  [[component.connect]]
  source = "x"
  constant = 1
  target = "y"

  [[component.connect]]
  target = "z"
"#;
        let err = load(source).unwrap_err();

        let messages: Vec<&str> = err.diagnostics().iter().map(|d| d.message()).collect();
        assert_eq!(
            messages,
            [
                "connector to `y` declares both a source and a constant",
                "connector to `z` has no source",
            ]
        );
    }

    #[test]
    fn test_qualified_declaration_name_is_rejected() {
        let err = load("[[component]]\nname = \"A\"\nin = [\"p.q\"]\n").unwrap_err();

        assert_eq!(err.diagnostics()[0].message(), "port name `p.q` contains `.`");
    }

    #[test]
    fn test_model_error_keeps_both_spans() {
        let source = "[[component]]\nname = \"A\"\n\n[[component]]\nname = \"A\"\n";
        let err = load(source).unwrap_err();

        let diagnostic = &err.diagnostics()[0];
        assert_eq!(diagnostic.message(), "component `A` is declared more than once");
        assert_eq!(diagnostic.labels().len(), 2);
        assert!(diagnostic.labels()[0].span().start() > diagnostic.labels()[1].span().start());
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::Boolean(true).to_string(), "true");
        assert_eq!(Literal::Float(0.5).to_string(), "0.5");
        assert_eq!(Literal::Float(1.0).to_string(), "1.0");
        assert_eq!(Literal::Text("on".to_string()).to_string(), "on");
    }
}
