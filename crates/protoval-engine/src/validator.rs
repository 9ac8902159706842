//! # Protocol Validator
//!
//! The entry point of a validation pass. A pass checks the main sections
//! first: a missing `head` or `deck` ends the pass with only those errors,
//! since nothing else can be resolved without them. Otherwise the deck,
//! head, ingredients and instruction validators run independently and
//! their findings are concatenated in that order.
//!
//! ## Design
//!
//! [`validate_protocol`] is a pure function over two read-only documents.
//! [`ProtocolValidator`] wraps it with document loading: it owns the
//! protocol, shares the containers catalog through an [`Arc`], and carries
//! any load failures into the next report as structural errors.

use std::sync::Arc;

use protoval_core::{
    ContainersCatalog, DocumentSource, Findings, Issue, LoadError, Protocol, ProtovalError,
    Salient, Section, ValidationReport,
};
use serde_json::Value;

use crate::scope::Scope;
use crate::{deck, head, ingredients, instructions};

/// Check that the main sections are present.
///
/// A missing required section is a fatal error; any other missing section
/// is a warning.
pub fn ensure_main_sections(protocol: &Protocol) -> Findings {
    let mut findings = Findings::new();
    for section in Section::ALL.into_iter().filter(|s| !protocol.has_section(*s)) {
        if section.is_required() {
            findings.push_error(Issue::structural(format!(
                "protocol must define a \"{section}\" section"
            )));
        } else {
            findings.push_warning(Issue::structural(format!(
                "protocol does not define a \"{section}\" section"
            )));
        }
    }
    findings
}

/// Run a full validation pass of `protocol` against `containers`.
pub fn validate_protocol(protocol: &Protocol, containers: &ContainersCatalog) -> ValidationReport {
    run(protocol, containers, Findings::new())
}

/// `preamble` findings come first in the report, ahead of the main-section checks.
fn run(protocol: &Protocol, containers: &ContainersCatalog, preamble: Findings) -> ValidationReport {
    let main_sections = ensure_main_sections(protocol);
    let fatal = main_sections.has_errors();
    let mut findings = preamble.merge(traced("main-sections", main_sections));

    if fatal {
        tracing::debug!("main sections missing, skipping section validation");
    } else {
        let scope = Scope::new(protocol, containers);
        findings.absorb(traced(
            "deck",
            deck::validate_deck(protocol.section(Section::Deck), containers),
        ));
        findings.absorb(traced(
            "head",
            head::validate_head(protocol.section(Section::Head), scope.deck),
        ));
        findings.absorb(traced(
            "ingredients",
            ingredients::validate_ingredients(protocol.ingredients()),
        ));
        findings.absorb(traced(
            "instructions",
            instructions::validate_instructions(protocol.section(Section::Instructions), &scope),
        ));
    }

    let info = protocol
        .info()
        .cloned()
        .unwrap_or_else(|| Value::Object(Default::default()));
    let salient = Salient {
        container_count: protocol.deck().len(),
        tool_count: protocol.head().len(),
        instruction_count: protocol.instruction_count(),
    };
    let report = ValidationReport::new(info, salient, findings);

    tracing::info!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        containers = salient.container_count,
        tools = salient.tool_count,
        instructions = salient.instruction_count,
        "protocol validated"
    );
    report
}

fn traced(section: &str, findings: Findings) -> Findings {
    tracing::debug!(
        section,
        errors = findings.errors().len(),
        warnings = findings.warnings().len(),
        "section checked"
    );
    findings
}

/// A protocol paired with the containers catalog it is validated against.
///
/// # Example
///
/// ```
/// use protoval_core::DocumentSource;
/// use protoval_engine::ProtocolValidator;
/// use serde_json::json;
///
/// let validator = ProtocolValidator::from_sources(
///     DocumentSource::Inline(json!({ "head": {}, "deck": {} })),
///     DocumentSource::Inline(json!({ "containers": {} })),
/// );
/// let report = validator.validate();
/// assert!(report.is_valid());
/// assert_eq!(report.warnings.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ProtocolValidator {
    protocol: Protocol,
    containers: Arc<ContainersCatalog>,
    load_failures: Vec<Issue>,
}

impl ProtocolValidator {
    /// Pair already-loaded documents.
    pub fn new(protocol: Protocol, containers: Arc<ContainersCatalog>) -> Self {
        Self {
            protocol,
            containers,
            load_failures: Vec::new(),
        }
    }

    /// Load both documents, never failing.
    ///
    /// A document that cannot be loaded is replaced by an empty one and
    /// the failure is reported as the first error of every report.
    pub fn from_sources(protocol: DocumentSource, containers: DocumentSource) -> Self {
        let mut load_failures = Vec::new();

        let protocol = match protocol.load() {
            Ok(document) => Protocol::from_value(document),
            Err(e) => {
                tracing::warn!(error = %e, "protocol document could not be loaded");
                load_failures.push(load_failure("protocol", &e));
                Protocol::empty()
            }
        };
        let containers = match containers.load() {
            Ok(document) => ContainersCatalog::from_value(document),
            Err(e) => {
                tracing::warn!(error = %e, "containers document could not be loaded");
                load_failures.push(load_failure("containers", &e));
                ContainersCatalog::empty()
            }
        };

        Self {
            protocol,
            containers: Arc::new(containers),
            load_failures,
        }
    }

    /// Load both documents, failing on the first that cannot be loaded.
    ///
    /// # Errors
    ///
    /// Returns [`ProtovalError::Load`] naming the source that failed.
    pub fn try_from_sources(
        protocol: DocumentSource,
        containers: DocumentSource,
    ) -> Result<Self, ProtovalError> {
        let protocol = Protocol::from_value(protocol.load()?);
        let containers = ContainersCatalog::from_value(containers.load()?);
        Ok(Self::new(protocol, Arc::new(containers)))
    }

    /// Load a protocol and pair it with an already-shared catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ProtovalError::Load`] if the protocol cannot be loaded.
    pub fn with_catalog(
        protocol: DocumentSource,
        containers: Arc<ContainersCatalog>,
    ) -> Result<Self, ProtovalError> {
        Ok(Self::new(Protocol::from_value(protocol.load()?), containers))
    }

    /// The protocol under validation.
    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    /// The shared containers catalog.
    pub fn containers(&self) -> &Arc<ContainersCatalog> {
        &self.containers
    }

    /// Failures recorded while loading documents.
    pub fn load_failures(&self) -> &[Issue] {
        &self.load_failures
    }

    /// See [`ensure_main_sections`].
    pub fn ensure_main_sections(&self) -> Findings {
        ensure_main_sections(&self.protocol)
    }

    /// Validate only the `deck` section.
    pub fn validate_deck(&self) -> Findings {
        deck::validate_deck(self.protocol.section(Section::Deck), &self.containers)
    }

    /// Validate only the `head` section.
    pub fn validate_head(&self) -> Findings {
        head::validate_head(self.protocol.section(Section::Head), self.protocol.deck())
    }

    /// Validate only the `ingredients` section.
    pub fn validate_ingredients(&self) -> Findings {
        ingredients::validate_ingredients(self.protocol.ingredients())
    }

    /// Validate only the `instructions` section.
    pub fn validate_instructions(&self) -> Findings {
        let scope = Scope::new(&self.protocol, &self.containers);
        instructions::validate_instructions(self.protocol.section(Section::Instructions), &scope)
    }

    /// Run a full pass. Repeated calls return identical reports.
    pub fn validate(&self) -> ValidationReport {
        let preamble = self
            .load_failures
            .iter()
            .cloned()
            .map(Findings::error)
            .collect();
        run(&self.protocol, &self.containers, preamble)
    }
}

fn load_failure(document: &str, error: &LoadError) -> Issue {
    Issue::structural(format!("{document} document could not be loaded: {error}"))
}
