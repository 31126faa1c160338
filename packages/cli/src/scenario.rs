//! # Scenario Files
//!
//! A scenario declares elements with their `fxHide` / `fxShow` bindings and
//! a list of steps replayed against an in-process monitor:
//!
//! ```json
//! {
//!   "elements": [
//!     { "id": 1, "display": "block", "layout": "row",
//!       "bindings": { "fxHide": "", "fxShow.sm": true } }
//!   ],
//!   "steps": [
//!     { "activate": "sm" },
//!     { "set": { "element": 1, "binding": "fxHide.md", "value": false } },
//!     { "layout": { "element": 1, "direction": "column" } },
//!     { "deactivate": "sm" },
//!     { "destroy": 1 }
//!   ]
//! }
//! ```

use anyhow::{anyhow, Context, Result};
use fxlayout_core::{BreakpointKey, Config, InputValue, StyleMap};
use fxlayout_visibility::{
    AppliedStyle, Connector, DirectiveContext, ElementId, ElementRef, LayoutCollaborator,
    LayoutContainer, MediaMonitor, Polarity, StyleRecorder, VisibilityDirective,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub elements: Vec<ElementSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElementSpec {
    pub id: u64,

    /// Inline display before any directive runs
    #[serde(default)]
    pub display: Option<String>,

    /// Layout direction when the element is also a layout container
    #[serde(default)]
    pub layout: Option<String>,

    /// Binding name → raw value, e.g. `"fxHide.gt-sm": "false"`
    #[serde(default)]
    pub bindings: BTreeMap<String, InputValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    Activate(BreakpointKey),
    Deactivate(BreakpointKey),
    Set {
        element: u64,
        binding: String,
        value: InputValue,
    },
    Layout {
        element: u64,
        direction: String,
    },
    Destroy(u64),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Activate(key) => write!(f, "activate {}", key),
            Step::Deactivate(key) => write!(f, "deactivate {}", key),
            Step::Set {
                element,
                binding,
                value,
            } => write!(f, "set #{} {} = {}", element, binding, value),
            Step::Layout { element, direction } => write!(f, "layout #{} {}", element, direction),
            Step::Destroy(element) => write!(f, "destroy #{}", element),
        }
    }
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StyleWrite {
    pub element: ElementId,
    pub style: StyleMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: String,
    pub writes: Vec<StyleWrite>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub steps: Vec<StepReport>,
    pub final_styles: BTreeMap<ElementId, StyleMap>,
}

/// Directives and collaborators built from a scenario
pub struct Simulation {
    monitor: Rc<MediaMonitor>,
    recorder: Rc<StyleRecorder>,
    layouts: HashMap<u64, Rc<LayoutContainer>>,
    directives: BTreeMap<(u64, Polarity), VisibilityDirective>,
    seen: usize,
}

impl Simulation {
    pub fn new(scenario: &Scenario, config: Config) -> Result<Self> {
        let monitor = Rc::new(MediaMonitor::new());
        let recorder = Rc::new(StyleRecorder::new());
        let context = DirectiveContext::new(monitor.clone(), recorder.clone())
            .with_connector(Connector::new())
            .with_config(config);

        let mut layouts = HashMap::new();
        let mut directives = BTreeMap::new();

        for spec in &scenario.elements {
            let layout = spec
                .layout
                .as_ref()
                .map(|direction| Rc::new(LayoutContainer::new(direction.clone())));
            if let Some(layout) = &layout {
                layouts.insert(spec.id, Rc::clone(layout));
            }

            let element = ElementRef {
                id: ElementId(spec.id),
                inline_display: spec.display.clone(),
            };

            for (binding, value) in &spec.bindings {
                let polarity = polarity_of(binding)?;
                let directive = directives.entry((spec.id, polarity)).or_insert_with(|| {
                    VisibilityDirective::new(
                        polarity,
                        element.clone(),
                        layout
                            .clone()
                            .map(|layout| layout as Rc<dyn LayoutCollaborator>),
                        &context,
                    )
                });
                directive.set_binding(binding, value.clone())?;
            }
        }

        info!(directives = directives.len(), "Scenario loaded");

        Ok(Self {
            monitor,
            recorder,
            layouts,
            directives,
            seen: 0,
        })
    }

    /// Mount every directive, hide before show on each element
    pub fn mount(&mut self) -> StepReport {
        for directive in self.directives.values() {
            directive.mount();
        }
        self.report("mount".to_string())
    }

    pub fn apply(&mut self, step: &Step) -> Result<StepReport> {
        debug!(step = %step, "Applying step");

        match step {
            Step::Activate(key) => self.monitor.activate(*key),
            Step::Deactivate(key) => self.monitor.deactivate(*key),
            Step::Set {
                element,
                binding,
                value,
            } => {
                let polarity = polarity_of(binding)?;
                let directive = self
                    .directives
                    .get(&(*element, polarity))
                    .ok_or_else(|| anyhow!("Element #{} has no {} directive", element, polarity.binding_prefix()))?;
                directive.set_binding(binding, value.clone())?;
            }
            Step::Layout { element, direction } => {
                let layout = self
                    .layouts
                    .get(element)
                    .ok_or_else(|| anyhow!("Element #{} has no layout", element))?;
                layout.update(direction.clone());
            }
            Step::Destroy(element) => {
                self.directives.retain(|(id, _), _| id != element);
            }
        }

        Ok(self.report(step.to_string()))
    }

    #[instrument(skip_all, fields(elements = scenario.elements.len(), steps = scenario.steps.len()))]
    pub fn run(scenario: &Scenario, config: Config) -> Result<SimulationReport> {
        let mut simulation = Simulation::new(scenario, config)?;
        let mut steps = vec![simulation.mount()];

        for step in &scenario.steps {
            steps.push(simulation.apply(step)?);
        }

        Ok(SimulationReport {
            steps,
            final_styles: simulation.final_styles(),
        })
    }

    pub fn final_styles(&self) -> BTreeMap<ElementId, StyleMap> {
        let mut styles = BTreeMap::new();
        for AppliedStyle { element, style } in self.recorder.applied() {
            styles.insert(element, style);
        }
        styles
    }

    fn report(&mut self, step: String) -> StepReport {
        let applied = self.recorder.applied();
        let writes = applied[self.seen..]
            .iter()
            .map(|entry| StyleWrite {
                element: entry.element,
                style: entry.style.clone(),
            })
            .collect();
        self.seen = applied.len();

        StepReport { step, writes }
    }
}

fn polarity_of(binding: &str) -> Result<Polarity> {
    let (prefix, _) = BreakpointKey::parse_binding(binding)?;
    Polarity::from_binding_prefix(prefix)
        .ok_or_else(|| anyhow!("Unknown directive '{}' in binding '{}'", prefix, binding))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"{
        "elements": [
            { "id": 1, "display": "block", "bindings": { "fxHide": "", "fxHide.gt-sm": "false" } },
            { "id": 2, "display": "block", "bindings": { "fxHide": "", "fxShow.sm": true } },
            { "id": 3, "display": "block", "layout": "row", "bindings": { "fxShow": true } }
        ],
        "steps": [
            { "activate": "gt-sm" },
            { "activate": "sm" },
            { "layout": { "element": 3, "direction": "column" } },
            { "set": { "element": 1, "binding": "fxHide.sm", "value": 0 } },
            { "destroy": 1 },
            { "activate": "xs" }
        ]
    }"#;

    #[test]
    fn test_parse_scenario() {
        let scenario = Scenario::parse(SCENARIO).unwrap();
        assert_eq!(scenario.elements.len(), 3);
        assert_eq!(scenario.steps.len(), 6);
        assert!(matches!(scenario.steps[0], Step::Activate(BreakpointKey::GtSm)));
        assert!(matches!(scenario.steps[4], Step::Destroy(1)));
        assert_eq!(scenario.steps[3].to_string(), "set #1 fxHide.sm = 0");
    }

    #[test]
    fn test_run_scenario() {
        let scenario = Scenario::parse(SCENARIO).unwrap();
        let report = Simulation::run(&scenario, Config::default()).unwrap();

        assert_eq!(report.steps.len(), 7);
        assert_eq!(report.steps[0].step, "mount");

        // gt-sm: element 1 becomes visible
        assert!(report.steps[1]
            .writes
            .iter()
            .any(|write| write.element == ElementId(1) && write.style == StyleMap::display("block")));

        // layout change rewrites element 3 with the layout display
        assert_eq!(report.steps[3].writes.len(), 1);
        assert_eq!(report.steps[3].writes[0].style, StyleMap::display("flex"));

        // destroyed element receives nothing afterwards
        assert!(report.steps[6].writes.iter().all(|write| write.element != ElementId(1)));

        // sm: the bare fxHide on element 2 defers to fxShow.sm
        let element_two: Vec<_> = report.steps[2]
            .writes
            .iter()
            .filter(|write| write.element == ElementId(2))
            .collect();
        assert_eq!(element_two.last().map(|write| &write.style), Some(&StyleMap::display("block")));

        // xs passes through base, where the bare fxHide applies again
        assert_eq!(report.final_styles[&ElementId(2)], StyleMap::display("none"));
        assert_eq!(report.final_styles[&ElementId(3)], StyleMap::display("flex"));
    }

    #[test]
    fn test_defaulted_hide_defers_to_show() {
        let scenario = Scenario::parse(
            r#"{
                "elements": [
                    { "id": 1, "display": "block", "bindings": { "fxShow.sm": "true" } },
                    { "id": 2, "display": "block", "bindings": { "fxHide.md": true, "fxShow.sm": "true" } }
                ],
                "steps": [ { "activate": "sm" } ]
            }"#,
        )
        .unwrap();

        let report = Simulation::run(&scenario, Config::default()).unwrap();
        assert_eq!(report.final_styles[&ElementId(1)], StyleMap::display("block"));
        assert_eq!(report.final_styles[&ElementId(2)], StyleMap::display("block"));
    }

    #[test]
    fn test_unknown_directive_prefix() {
        let scenario = Scenario::parse(r#"{ "elements": [ { "id": 1, "bindings": { "fxFlex": 1 } } ] }"#).unwrap();
        assert!(Simulation::new(&scenario, Config::default()).is_err());
    }

    #[test]
    fn test_step_errors() {
        let scenario = Scenario::parse(r#"{ "elements": [ { "id": 1, "bindings": { "fxHide": "" } } ] }"#).unwrap();
        let mut simulation = Simulation::new(&scenario, Config::default()).unwrap();

        let missing_show = Step::Set {
            element: 1,
            binding: "fxShow".to_string(),
            value: InputValue::from(true),
        };
        assert!(simulation.apply(&missing_show).is_err());

        let missing_layout = Step::Layout {
            element: 1,
            direction: "row".to_string(),
        };
        assert!(simulation.apply(&missing_layout).is_err());
    }

    #[test]
    fn test_bundled_scenario() {
        let scenario = Scenario::parse(include_str!("../scenarios/hide_show.json")).unwrap();
        let report = Simulation::run(&scenario, Config::default()).unwrap();

        assert_eq!(report.final_styles[&ElementId(1)], StyleMap::display("none"));
        // destroyed while hidden, so the last gt-sm activation never reaches it
        assert_eq!(report.final_styles[&ElementId(2)], StyleMap::display("none"));
        assert_eq!(report.final_styles[&ElementId(3)], StyleMap::display("block"));
        assert_eq!(report.final_styles[&ElementId(4)], StyleMap::display("flex"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.json");
        std::fs::write(&path, SCENARIO).unwrap();

        assert_eq!(Scenario::load(&path).unwrap().elements.len(), 3);
        assert!(Scenario::load(&dir.path().join("missing.json")).is_err());
    }
}
