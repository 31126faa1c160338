//! # Visibility Directive
//!
//! One directive instance per element and polarity (`fxHide` / `fxShow`).
//! It owns the element's inputs, listens to the breakpoint monitor, the
//! optional layout container and the connector, and pushes every decision
//! through the style renderer.
//!
//! ## Lifecycle
//!
//! ```text
//! new() ──► Initialized ──mount()──► Active ──destroy()/drop──► Destroyed
//! ```
//!
//! - `new` captures the element's display and subscribes to the layout.
//! - `mount` subscribes to every breakpoint, announces itself, listens for
//!   the counterpart and applies the first decision.
//! - While active, every input change, breakpoint change, layout change and
//!   counterpart announcement re-runs the decision.
//! - `destroy` releases every subscription; later callbacks and inputs are
//!   ignored.

use crate::connector::Connector;
use crate::element::{ElementId, ElementRef};
use crate::engine::{Polarity, VisibilityDecision, VisibilityEngine};
use crate::errors::DirectiveError;
use crate::layout::LayoutCollaborator;
use crate::monitor::{BreakpointMonitor, MediaChange};
use crate::renderer::StyleRenderer;
use crate::resolver::{BreakpointActivationResolver, Resolution};
use fxlayout_core::{BreakpointKey, Config, InputCache, InputValue, Subscription};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Active,
    Destroyed,
}

/// Collaborators shared by every directive of a host
#[derive(Clone)]
pub struct DirectiveContext {
    pub monitor: Rc<dyn BreakpointMonitor>,
    pub renderer: Rc<dyn StyleRenderer>,
    pub connector: Connector,
    pub config: Rc<Config>,
}

impl DirectiveContext {
    /// Context on the thread's shared connector with default config
    pub fn new(monitor: Rc<dyn BreakpointMonitor>, renderer: Rc<dyn StyleRenderer>) -> Self {
        Self {
            monitor,
            renderer,
            connector: Connector::shared(),
            config: Rc::new(Config::default()),
        }
    }

    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.connector = connector;
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Rc::new(config);
        self
    }
}

#[derive(Default)]
struct Subscriptions {
    media: Vec<Subscription>,
    layout: Option<Subscription>,
    negotiation: Option<Subscription>,
    announcement: Option<Subscription>,
}

struct DirectiveState {
    polarity: Polarity,
    element: ElementRef,
    inputs: InputCache,
    resolver: BreakpointActivationResolver,
    counterpart_present: bool,
    layout: Option<Rc<dyn LayoutCollaborator>>,
    phase: Phase,
    subscriptions: Subscriptions,
}

struct Shared {
    context: DirectiveContext,
    state: RefCell<DirectiveState>,
}

impl Shared {
    fn decision(&self) -> VisibilityDecision {
        let state = self.state.borrow();
        let resolution = state
            .resolver
            .resolve(&state.inputs, &state.polarity.default_value());
        let layout_active = state.layout.as_ref().is_some_and(|layout| layout.is_active());
        let baseline = VisibilityEngine::baseline_display(
            state.element.inline_display.as_deref(),
            layout_active,
            &self.context.config,
        );

        VisibilityEngine::decide(state.polarity, &resolution, state.counterpart_present, &baseline)
    }

    /// Recompute and apply, if mounted
    fn refresh(&self, trigger: &'static str) {
        let (phase, element, polarity) = {
            let state = self.state.borrow();
            (state.phase, state.element.id, state.polarity)
        };
        if phase != Phase::Active {
            debug!(element = %element, ?phase, trigger, "Skipping refresh");
            return;
        }

        match self.decision() {
            VisibilityDecision::Apply { visible, style } => {
                debug!(element = %element, ?polarity, trigger, visible, style = %style, "Applying style");
                self.context.renderer.apply_style(element, &style);
            }
            VisibilityDecision::Delegate => {
                debug!(element = %element, ?polarity, trigger, "Delegating to counterpart");
            }
        }
    }

    fn on_media_change(&self, change: &MediaChange) {
        {
            let mut state = self.state.borrow_mut();
            if state.phase != Phase::Active {
                return;
            }
            state.resolver.on_change(change);
        }
        self.refresh("breakpoint");
    }

    fn on_counterpart(&self) {
        let released = {
            let mut state = self.state.borrow_mut();
            if state.phase == Phase::Destroyed || state.counterpart_present {
                return;
            }
            debug!(element = %state.element.id, polarity = ?state.polarity, "Counterpart directive present");
            state.counterpart_present = true;
            state.subscriptions.negotiation.take()
        };
        drop(released);
        self.refresh("negotiation");
    }
}

/// A hide or show directive bound to one element
pub struct VisibilityDirective {
    shared: Rc<Shared>,
}

impl VisibilityDirective {
    pub fn new(
        polarity: Polarity,
        element: ElementRef,
        layout: Option<Rc<dyn LayoutCollaborator>>,
        context: &DirectiveContext,
    ) -> Self {
        let shared = Rc::new(Shared {
            context: context.clone(),
            state: RefCell::new(DirectiveState {
                polarity,
                element,
                inputs: InputCache::new(),
                resolver: BreakpointActivationResolver::new(),
                counterpart_present: false,
                layout: layout.clone(),
                phase: Phase::Initialized,
                subscriptions: Subscriptions::default(),
            }),
        });

        if let Some(layout) = layout {
            let weak = Rc::downgrade(&shared);
            let sub = layout.subscribe(Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.refresh("layout");
                }
            }));
            shared.state.borrow_mut().subscriptions.layout = Some(sub);
        }

        Self { shared }
    }

    pub fn hide(element: ElementRef, context: &DirectiveContext) -> Self {
        Self::new(Polarity::Hide, element, None, context)
    }

    pub fn show(element: ElementRef, context: &DirectiveContext) -> Self {
        Self::new(Polarity::Show, element, None, context)
    }

    /// Every binding name this polarity accepts, one per breakpoint
    pub fn bindings(polarity: Polarity) -> Vec<String> {
        BreakpointKey::ALL
            .into_iter()
            .map(|key| key.binding_name(polarity.binding_prefix()))
            .collect()
    }

    pub fn mount(&self) {
        let (polarity, element) = {
            let state = self.shared.state.borrow();
            if state.phase != Phase::Initialized {
                warn!(element = %state.element.id, phase = ?state.phase, "Mount ignored");
                return;
            }
            (state.polarity, state.element.id)
        };
        let context = &self.shared.context;

        let active = context.monitor.active();
        let media: Vec<Subscription> = BreakpointKey::responsive()
            .map(|key| {
                let weak = Rc::downgrade(&self.shared);
                context.monitor.subscribe(
                    key,
                    Box::new(move |change: &MediaChange| {
                        if let Some(shared) = weak.upgrade() {
                            shared.on_media_change(change);
                        }
                    }),
                )
            })
            .collect();

        // May fire right away when the counterpart mounted first
        let weak: Weak<Shared> = Rc::downgrade(&self.shared);
        let negotiation = context.connector.on_counterpart(
            polarity.counterpart().announce_kind(),
            element,
            move |_| {
                if let Some(shared) = weak.upgrade() {
                    shared.on_counterpart();
                }
            },
        );
        let announcement = context.connector.announce(polarity.announce_kind(), element);

        {
            let mut state = self.shared.state.borrow_mut();
            state.resolver = BreakpointActivationResolver::with_active(active);
            state.subscriptions.media = media;
            if !state.counterpart_present {
                state.subscriptions.negotiation = Some(negotiation);
            }
            state.subscriptions.announcement = Some(announcement);
            state.phase = Phase::Active;
        }

        info!(element = %element, ?polarity, breakpoint = %active, "Directive mounted");
        self.shared.refresh("mount");
    }

    /// Release every subscription. Safe to call more than once.
    pub fn destroy(&self) {
        let released = {
            let mut state = self.shared.state.borrow_mut();
            if state.phase == Phase::Destroyed {
                return;
            }
            state.phase = Phase::Destroyed;
            info!(element = %state.element.id, polarity = ?state.polarity, "Directive destroyed");
            std::mem::take(&mut state.subscriptions)
        };
        drop(released);
    }

    /// Bind `value` to the input for `key`
    pub fn set_input(&self, key: BreakpointKey, value: impl Into<InputValue>) {
        {
            let mut state = self.shared.state.borrow_mut();
            if state.phase == Phase::Destroyed {
                debug!(element = %state.element.id, breakpoint = %key, "Input ignored after destroy");
                return;
            }
            state.inputs.set(key, value.into());
        }
        self.shared.refresh("input");
    }

    /// Bind `value` by external binding name, e.g. `fxHide.gt-sm`
    pub fn set_binding(&self, binding: &str, value: impl Into<InputValue>) -> Result<(), DirectiveError> {
        let (prefix, key) = BreakpointKey::parse_binding(binding)?;
        let expected = self.polarity().binding_prefix();
        if prefix != expected {
            return Err(DirectiveError::WrongDirective {
                binding: binding.to_string(),
                expected,
            });
        }
        self.set_input(key, value);
        Ok(())
    }

    pub fn polarity(&self) -> Polarity {
        self.shared.state.borrow().polarity
    }

    pub fn element(&self) -> ElementId {
        self.shared.state.borrow().element.id
    }

    pub fn phase(&self) -> Phase {
        self.shared.state.borrow().phase
    }

    pub fn active_breakpoint(&self) -> BreakpointKey {
        self.shared.state.borrow().resolver.active()
    }

    pub fn counterpart_present(&self) -> bool {
        self.shared.state.borrow().counterpart_present
    }

    pub fn resolution(&self) -> Resolution {
        let state = self.shared.state.borrow();
        state
            .resolver
            .resolve(&state.inputs, &state.polarity.default_value())
    }

    /// What the directive would apply right now
    pub fn decision(&self) -> VisibilityDecision {
        self.shared.decision()
    }
}

impl Drop for VisibilityDirective {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutContainer;
    use crate::monitor::MediaMonitor;
    use crate::renderer::StyleRecorder;
    use fxlayout_core::StyleMap;

    struct Host {
        monitor: Rc<MediaMonitor>,
        recorder: Rc<StyleRecorder>,
        connector: Connector,
        context: DirectiveContext,
    }

    fn host() -> Host {
        let monitor = Rc::new(MediaMonitor::new());
        let recorder = Rc::new(StyleRecorder::new());
        let connector = Connector::new();
        let context = DirectiveContext::new(monitor.clone(), recorder.clone()).with_connector(connector.clone());
        Host {
            monitor,
            recorder,
            connector,
            context,
        }
    }

    #[test]
    fn test_construction_does_not_apply() {
        let host = host();
        let directive = VisibilityDirective::hide(ElementRef::new(1), &host.context);
        directive.set_input(BreakpointKey::Base, InputValue::empty());

        assert_eq!(directive.phase(), Phase::Initialized);
        assert!(host.recorder.is_empty());
    }

    #[test]
    fn test_mount_applies_initial_decision() {
        let host = host();
        let directive = VisibilityDirective::hide(ElementRef::with_display(1, "inline"), &host.context);
        directive.set_input(BreakpointKey::Base, true);
        directive.mount();

        assert_eq!(directive.phase(), Phase::Active);
        assert_eq!(host.recorder.current(ElementId(1)), Some(StyleMap::display("none")));
    }

    #[test]
    fn test_mount_seeds_active_breakpoint() {
        let host = host();
        host.monitor.activate(BreakpointKey::Md);

        let directive = VisibilityDirective::hide(ElementRef::new(1), &host.context);
        directive.set_input(BreakpointKey::Md, true);
        directive.mount();

        assert_eq!(directive.active_breakpoint(), BreakpointKey::Md);
        assert_eq!(host.recorder.current(ElementId(1)), Some(StyleMap::display("none")));
    }

    #[test]
    fn test_input_change_reapplies() {
        let host = host();
        let directive = VisibilityDirective::hide(ElementRef::with_display(1, "inline"), &host.context);
        directive.mount();
        directive.set_input(BreakpointKey::Base, "true");

        assert_eq!(host.recorder.count_for(ElementId(1)), 2);
        assert_eq!(host.recorder.current(ElementId(1)), Some(StyleMap::display("none")));
    }

    #[test]
    fn test_mount_twice_is_ignored() {
        let host = host();
        let directive = VisibilityDirective::hide(ElementRef::new(1), &host.context);
        directive.mount();
        directive.mount();

        assert_eq!(host.recorder.len(), 1);
        assert_eq!(host.monitor.subscriber_count(BreakpointKey::Sm), 1);
    }

    #[test]
    fn test_destroy_releases_everything() {
        let host = host();
        let layout = Rc::new(LayoutContainer::new("row"));
        let directive = VisibilityDirective::new(
            Polarity::Hide,
            ElementRef::new(1),
            Some(layout.clone()),
            &host.context,
        );
        directive.mount();
        assert_eq!(layout.subscriber_count(), 1);
        assert_eq!(host.connector.listener_count(), 1);
        assert_eq!(host.connector.pending_count(), 1);

        directive.destroy();
        directive.destroy();

        assert_eq!(directive.phase(), Phase::Destroyed);
        assert_eq!(layout.subscriber_count(), 0);
        assert_eq!(host.connector.listener_count(), 0);
        assert_eq!(host.connector.pending_count(), 0);
        for key in BreakpointKey::responsive() {
            assert_eq!(host.monitor.subscriber_count(key), 0);
        }
    }

    #[test]
    fn test_drop_destroys() {
        let host = host();
        {
            let directive = VisibilityDirective::show(ElementRef::new(1), &host.context);
            directive.mount();
        }
        assert_eq!(host.monitor.subscriber_count(BreakpointKey::Xs), 0);
        assert_eq!(host.connector.pending_count(), 0);
    }

    #[test]
    fn test_inputs_ignored_after_destroy() {
        let host = host();
        let directive = VisibilityDirective::hide(ElementRef::new(1), &host.context);
        directive.mount();
        directive.destroy();
        directive.set_input(BreakpointKey::Base, true);

        assert_eq!(host.recorder.len(), 1);
        assert!(directive.resolution().is_defaulted());
    }

    #[test]
    fn test_set_binding() {
        let host = host();
        let directive = VisibilityDirective::hide(ElementRef::new(1), &host.context);

        directive.set_binding("fxHide.gt-sm", "false").unwrap();
        assert!(matches!(
            directive.set_binding("fxShow.sm", true),
            Err(DirectiveError::WrongDirective { expected: "fxHide", .. })
        ));
        assert!(matches!(
            directive.set_binding("fxHide.tiny", true),
            Err(DirectiveError::Core(_))
        ));

        host.monitor.activate(BreakpointKey::GtSm);
        directive.mount();
        assert_eq!(directive.resolution().value, InputValue::from("false"));
    }

    #[test]
    fn test_bindings_table() {
        let bindings = VisibilityDirective::bindings(Polarity::Show);
        assert_eq!(bindings.len(), BreakpointKey::ALL.len());
        assert_eq!(bindings[0], "fxShow");
        assert!(bindings.contains(&"fxShow.gt-md".to_string()));
    }

    #[test]
    fn test_layout_change_refreshes() {
        let host = host();
        let layout = Rc::new(LayoutContainer::new("row"));
        let directive = VisibilityDirective::new(
            Polarity::Hide,
            ElementRef::with_display(1, "block"),
            Some(layout.clone()),
            &host.context,
        );
        directive.mount();
        assert_eq!(host.recorder.current(ElementId(1)), Some(StyleMap::display("flex")));

        layout.set_active(false);
        assert_eq!(host.recorder.current(ElementId(1)), Some(StyleMap::display("block")));
    }

    #[test]
    fn test_layout_change_before_mount_is_ignored() {
        let host = host();
        let layout = Rc::new(LayoutContainer::new("row"));
        let _directive = VisibilityDirective::new(
            Polarity::Show,
            ElementRef::new(1),
            Some(layout.clone()),
            &host.context,
        );

        layout.update("column");

        assert!(host.recorder.is_empty());
    }

    #[test]
    fn test_config_fallback_display() {
        let host = host();
        let context = host.context.clone().with_config(Config {
            layout_display: "flex".to_string(),
            fallback_display: "contents".to_string(),
        });
        let directive = VisibilityDirective::show(ElementRef::new(1), &context);
        directive.mount();

        assert_eq!(host.recorder.current(ElementId(1)), Some(StyleMap::display("contents")));
    }
}
