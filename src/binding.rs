//! The reactive binding layer: control events in, republished charts out.
//!
//! A [`Dashboard`] is one user session. It owns every panel's criteria and a
//! registry mapping each [`ControlId`] to the panel field it drives. Each
//! accepted event runs one synchronous update cycle:
//!
//! 1. write the new value into the panel's criteria,
//! 2. re-run the panel's query,
//! 3. re-run its view builder,
//! 4. publish the new chart to that panel only.

use crate::chart::ChartSpec;
use crate::controls::{Control, ControlEvent, ControlId};
use crate::dataset::Dataset;
use crate::error::SelectionError;
use crate::panel::{Panel, PanelId};
use crate::views::build_table_view;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Where published charts go. A publish replaces the panel's chart wholesale.
pub trait DisplaySurface {
    fn publish(&mut self, panel: PanelId, spec: &ChartSpec);
}

/// Keeps the latest chart of every panel, with a per-panel revision counter.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    latest: BTreeMap<PanelId, ChartSpec>,
    revisions: BTreeMap<PanelId, u64>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self, panel: PanelId) -> Option<&ChartSpec> {
        self.latest.get(&panel)
    }

    /// Number of publishes received for `panel`.
    pub fn revision(&self, panel: PanelId) -> u64 {
        self.revisions.get(&panel).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PanelId, &ChartSpec)> {
        self.latest.iter().map(|(id, spec)| (*id, spec))
    }
}

impl DisplaySurface for MemorySurface {
    fn publish(&mut self, panel: PanelId, spec: &ChartSpec) {
        self.latest.insert(panel, spec.clone());
        *self.revisions.entry(panel).or_default() += 1;
    }
}

/// One session over a shared, read-only dataset.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
    table: ChartSpec,
    panels: BTreeMap<PanelId, Panel>,
    registry: BTreeMap<ControlId, Control>,
}

impl Dashboard {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let table = build_table_view(&dataset);
        let panels = PanelId::REACTIVE
            .into_iter()
            .filter_map(|id| {
                id.default_criteria(&dataset)
                    .map(|criteria| (id, Panel::new(id, criteria)))
            })
            .collect();
        let registry = ControlId::ALL
            .into_iter()
            .map(|id| (id, Control::for_dataset(id, &dataset)))
            .collect();
        Self {
            dataset,
            table,
            panels,
            registry,
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(&id)
    }

    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.panels.values()
    }

    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.registry.get(&id)
    }

    /// Controls belonging to `panel`, in registry order.
    pub fn controls_for(&self, panel: PanelId) -> impl Iterator<Item = &Control> {
        self.registry.values().filter(move |c| c.id.panel() == panel)
    }

    /// The static table chart, built once at construction.
    pub fn table(&self) -> &ChartSpec {
        &self.table
    }

    /// Publish the table and every panel's initial chart.
    pub fn start<S: DisplaySurface + ?Sized>(&mut self, surface: &mut S) {
        surface.publish(PanelId::Dataset, &self.table);
        for panel in self.panels.values_mut() {
            panel.begin_update();
            let spec = panel.render(&self.dataset);
            surface.publish(panel.id(), &spec);
            panel.finish_update(spec);
        }
        log::debug!("dashboard started with {} panels", self.panels.len());
    }

    /// Run one update cycle for `event`. Returns the panel that republished.
    ///
    /// A rejected event leaves every panel's criteria and chart unchanged.
    pub fn dispatch<S: DisplaySurface + ?Sized>(
        &mut self,
        event: &ControlEvent,
        surface: &mut S,
    ) -> Result<PanelId, SelectionError> {
        let result = self.try_dispatch(event, surface);
        if let Err(err) = &result {
            log::warn!("rejected control event {event:?}: {err}");
        }
        result
    }

    fn try_dispatch<S: DisplaySurface + ?Sized>(
        &mut self,
        event: &ControlEvent,
        surface: &mut S,
    ) -> Result<PanelId, SelectionError> {
        let unbound = || SelectionError::Unbound {
            panel: event.panel,
            field: event.field,
        };
        let id = ControlId::bound_to(event.panel, event.field).ok_or_else(unbound)?;
        let control = self.registry.get(&id).ok_or_else(unbound)?;
        let value = control.parse(&event.value)?;
        let panel = self.panels.get_mut(&event.panel).ok_or_else(unbound)?;

        panel.apply(value)?;
        panel.begin_update();
        let spec = panel.render(&self.dataset);
        surface.publish(event.panel, &spec);
        panel.finish_update(spec);
        log::debug!("{id} -> {:?} republished {}", value, event.panel);
        Ok(event.panel)
    }

    /// Parse `control=value` and dispatch it.
    pub fn dispatch_str<S: DisplaySurface + ?Sized>(
        &mut self,
        event: &str,
        surface: &mut S,
    ) -> Result<PanelId, SelectionError> {
        let event: ControlEvent = event.parse()?;
        self.dispatch(&event, surface)
    }
}
