//! Incrementally edited diagrams.
//!
//! Each `diagramId` owns an insertion-ordered set of visual elements. After
//! every mutation the diagram must be closed under references: edges point at
//! elements that exist and containers only contain elements that exist.
//! Deleting an element cascades to the edges that touch it and detaches it
//! from any container.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{EngineResult, InvariantError};
use crate::session::SessionStore;
use crate::validation::{validate, Record, Validate, WireEnum};
use crate::wire_enum;

wire_enum! {
    pub enum ElementType {
        Node => "node",
        Edge => "edge",
        Container => "container",
        Annotation => "annotation",
    }
}

wire_enum! {
    pub enum DiagramOperationKind {
        Create => "create",
        Update => "update",
        Delete => "delete",
        Transform => "transform",
        Observe => "observe",
    }
}

wire_enum! {
    pub enum DiagramType {
        Graph => "graph",
        Flowchart => "flowchart",
        StateDiagram => "stateDiagram",
        ConceptMap => "conceptMap",
        TreeDiagram => "treeDiagram",
        Custom => "custom",
    }
}

wire_enum! {
    pub enum TransformationType {
        Rotate => "rotate",
        Move => "move",
        Resize => "resize",
        Recolor => "recolor",
        Regroup => "regroup",
    }
}

/// A diagram element. `properties` is an open map with no assumed shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualElement {
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains: Option<Vec<String>>,
}

impl Validate for VisualElement {
    fn read(r: &Record<'_>) -> Self {
        Self {
            id: r.required_str("id"),
            element_type: r.enumeration("type"),
            label: r.optional_str("label"),
            properties: r.open_map("properties"),
            source: r.optional_str("source"),
            target: r.optional_str("target"),
            contains: r.maybe_string_list("contains"),
        }
    }
}

/// One operation against a diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramOperation {
    pub operation: DiagramOperationKind,
    #[serde(default)]
    pub elements: Vec<VisualElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformation_type: Option<TransformationType>,
    pub diagram_id: String,
    pub diagram_type: DiagramType,
    pub iteration: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hypothesis: Option<String>,
    pub next_operation_needed: bool,
}

impl Validate for DiagramOperation {
    fn read(r: &Record<'_>) -> Self {
        let operation = r.try_enumeration::<DiagramOperationKind>("operation");
        let elements: Option<Vec<VisualElement>> = r.optional_list("elements");

        if let Some(op) = operation {
            if op != DiagramOperationKind::Observe
                && elements.as_ref().map_or(true, Vec::is_empty)
            {
                r.reject("elements", format!("is required for {} operations", op));
            }
            if matches!(op, DiagramOperationKind::Create | DiagramOperationKind::Update) {
                for (i, element) in elements.iter().flatten().enumerate() {
                    if element.element_type != ElementType::Edge {
                        continue;
                    }
                    if element.source.is_none() {
                        r.reject(&format!("elements[{}].source", i), "is required for edges");
                    }
                    if element.target.is_none() {
                        r.reject(&format!("elements[{}].target", i), "is required for edges");
                    }
                }
            }
        }

        Self {
            operation: operation.unwrap_or_else(DiagramOperationKind::fallback),
            elements: elements.unwrap_or_default(),
            transformation_type: r.optional_enum("transformationType"),
            diagram_id: r.required_str("diagramId"),
            diagram_type: r.enumeration("diagramType"),
            iteration: r.non_negative_int("iteration"),
            observation: r.optional_str("observation"),
            insight: r.optional_str("insight"),
            hypothesis: r.optional_str("hypothesis"),
            next_operation_needed: r.required_bool("nextOperationNeeded"),
        }
    }
}

/// Side effects of a delete beyond the requested ids.
#[derive(Debug, Clone, Default, PartialEq)]
struct Cascade {
    removed_edges: Vec<String>,
    detached_from: Vec<String>,
}

/// Accumulated state of one diagram.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    diagram_type: Option<DiagramType>,
    elements: Vec<VisualElement>,
    iteration: Option<u64>,
    closed: bool,
}

impl Diagram {
    pub fn elements(&self) -> &[VisualElement] {
        &self.elements
    }

    pub fn get(&self, id: &str) -> Option<&VisualElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn position(&self, id: &str) -> Result<usize, InvariantError> {
        self.elements
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| InvariantError::UnknownElement { id: id.to_string() })
    }

    fn count(&self, element_type: ElementType) -> usize {
        self.elements
            .iter()
            .filter(|e| e.element_type == element_type)
            .count()
    }

    fn apply(&mut self, op: &DiagramOperation) -> Result<Cascade, InvariantError> {
        if let Some(current) = self.diagram_type {
            if current != op.diagram_type {
                return Err(InvariantError::DiagramTypeMismatch {
                    diagram_id: op.diagram_id.clone(),
                    expected: current.to_string(),
                    requested: op.diagram_type.to_string(),
                });
            }
        }
        if let Some(current) = self.iteration {
            if op.iteration < current {
                return Err(InvariantError::IterationRegression {
                    current,
                    requested: op.iteration,
                });
            }
        }
        if self.closed && op.operation != DiagramOperationKind::Observe {
            return Err(InvariantError::DiagramClosed {
                diagram_id: op.diagram_id.clone(),
            });
        }

        let mut cascade = Cascade::default();
        match op.operation {
            DiagramOperationKind::Create => self.create(&op.elements)?,
            DiagramOperationKind::Update => {
                for element in &op.elements {
                    let i = self.position(&element.id)?;
                    self.elements[i] = element.clone();
                }
            }
            DiagramOperationKind::Delete => cascade = self.delete(&op.elements)?,
            DiagramOperationKind::Transform => {
                if op.transformation_type.is_none() {
                    return Err(InvariantError::MissingTransformation);
                }
                for element in &op.elements {
                    let i = self.position(&element.id)?;
                    merge(&mut self.elements[i], element);
                }
            }
            DiagramOperationKind::Observe => {}
        }

        if op.operation != DiagramOperationKind::Observe {
            self.check_references()?;
        }

        self.diagram_type = Some(op.diagram_type);
        self.iteration = Some(op.iteration);
        self.closed |= !op.next_operation_needed;
        Ok(cascade)
    }

    fn create(&mut self, elements: &[VisualElement]) -> Result<(), InvariantError> {
        for element in elements {
            if self.get(&element.id).is_some() {
                return Err(InvariantError::DuplicateId {
                    field: "elements".to_string(),
                    id: element.id.clone(),
                });
            }
            self.elements.push(element.clone());
        }
        Ok(())
    }

    fn delete(&mut self, elements: &[VisualElement]) -> Result<Cascade, InvariantError> {
        let mut doomed = HashSet::new();
        for element in elements {
            self.position(&element.id)?;
            doomed.insert(element.id.clone());
        }

        let touches = |e: &VisualElement| {
            [&e.source, &e.target]
                .into_iter()
                .flatten()
                .any(|endpoint| doomed.contains(endpoint))
        };

        let mut cascade = Cascade::default();
        for e in &self.elements {
            if e.element_type == ElementType::Edge && !doomed.contains(&e.id) && touches(e) {
                cascade.removed_edges.push(e.id.clone());
            }
        }

        self.elements
            .retain(|e| !doomed.contains(&e.id) && !cascade.removed_edges.contains(&e.id));

        let gone = |id: &String| doomed.contains(id) || cascade.removed_edges.contains(id);
        let mut detached_from = Vec::new();
        for e in &mut self.elements {
            let mut detached = false;
            if let Some(contains) = &mut e.contains {
                let before = contains.len();
                contains.retain(|id| !gone(id));
                detached |= contains.len() != before;
            }
            // Surviving non-edges lose endpoints that pointed at deleted elements.
            for endpoint in [&mut e.source, &mut e.target] {
                if endpoint.as_ref().is_some_and(|id| gone(id)) {
                    *endpoint = None;
                    detached = true;
                }
            }
            if detached {
                detached_from.push(e.id.clone());
            }
        }
        cascade.detached_from = detached_from;

        debug!(
            deleted = doomed.len(),
            cascaded = cascade.removed_edges.len(),
            detached = cascade.detached_from.len(),
            "Deleted diagram elements"
        );
        Ok(cascade)
    }

    fn check_references(&self) -> Result<(), InvariantError> {
        let ids: HashSet<&str> = self.elements.iter().map(|e| e.id.as_str()).collect();
        for element in &self.elements {
            let endpoints = [("source", &element.source), ("target", &element.target)];
            let contained = element
                .contains
                .iter()
                .flatten()
                .map(|id| ("contains", id));
            let references = endpoints
                .into_iter()
                .filter_map(|(field, id)| id.as_ref().map(|id| (field, id)))
                .chain(contained);

            for (field, id) in references {
                if !ids.contains(id.as_str()) {
                    return Err(InvariantError::DanglingReference {
                        field: format!("{}.{}", element.id, field),
                        id: id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Apply the supplied parts of `patch` to `element`.
fn merge(element: &mut VisualElement, patch: &VisualElement) {
    element
        .properties
        .extend(patch.properties.iter().map(|(k, v)| (k.clone(), v.clone())));
    if let Some(label) = &patch.label {
        element.label = Some(label.clone());
    }
    if let Some(contains) = &patch.contains {
        element.contains = Some(contains.clone());
    }
    if let Some(source) = &patch.source {
        element.source = Some(source.clone());
    }
    if let Some(target) = &patch.target {
        element.target = Some(target.clone());
    }
}

/// Projection returned by the map tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapResult {
    pub diagram_id: String,
    pub diagram_type: DiagramType,
    pub operation: DiagramOperationKind,
    pub iteration: u64,
    pub element_count: usize,
    pub node_count: usize,
    pub edge_count: usize,
    pub container_count: usize,
    pub annotation_count: usize,
    pub cascaded_edges: Vec<String>,
    pub detached_from: Vec<String>,
    pub next_operation_needed: bool,
}

/// Visual reasoning tool handler.
pub struct MapTool {
    sessions: SessionStore<Diagram>,
}

impl MapTool {
    pub fn new() -> Self {
        Self {
            sessions: SessionStore::new("map"),
        }
    }

    pub async fn process(&self, arguments: &Value) -> EngineResult<MapResult> {
        let op: DiagramOperation = validate(arguments)?;

        let result = self
            .sessions
            .update(&op.diagram_id, |diagram| {
                let cascade = diagram.apply(&op)?;
                Ok::<_, InvariantError>(MapResult {
                    diagram_id: op.diagram_id.clone(),
                    diagram_type: op.diagram_type,
                    operation: op.operation,
                    iteration: op.iteration,
                    element_count: diagram.elements.len(),
                    node_count: diagram.count(ElementType::Node),
                    edge_count: diagram.count(ElementType::Edge),
                    container_count: diagram.count(ElementType::Container),
                    annotation_count: diagram.count(ElementType::Annotation),
                    cascaded_edges: cascade.removed_edges,
                    detached_from: cascade.detached_from,
                    next_operation_needed: op.next_operation_needed,
                })
            })
            .await?;

        info!(
            diagram_id = %result.diagram_id,
            operation = %result.operation,
            elements = result.element_count,
            "Diagram operation applied"
        );

        Ok(result)
    }

    pub async fn diagram(&self, diagram_id: &str) -> Option<Diagram> {
        self.sessions.get(diagram_id).await
    }
}

impl Default for MapTool {
    fn default() -> Self {
        Self::new()
    }
}
