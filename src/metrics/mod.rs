use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Navigation counters accumulated by a switcher.
#[derive(Debug, Default, Clone)]
pub struct SwitcherMetrics {
    pushes: u64,
    pops: u64,
    intercepted_pops: u64,
    finishes: u64,
    views_presented: u64,
}

impl SwitcherMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_push(&mut self) {
        self.pushes = self.pushes.saturating_add(1);
    }

    pub fn record_pop(&mut self, removed: usize) {
        self.pops = self.pops.saturating_add(removed as u64);
    }

    pub fn record_intercepted_pop(&mut self) {
        self.intercepted_pops = self.intercepted_pops.saturating_add(1);
    }

    pub fn record_finish(&mut self) {
        self.finishes = self.finishes.saturating_add(1);
    }

    pub fn record_view_presented(&mut self) {
        self.views_presented = self.views_presented.saturating_add(1);
    }

    pub fn snapshot(&self, depth: usize) -> MetricSnapshot {
        MetricSnapshot {
            depth: depth as u64,
            pushes: self.pushes,
            pops: self.pops,
            intercepted_pops: self.intercepted_pops,
            finishes: self.finishes,
            views_presented: self.views_presented,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub depth: u64,
    pub pushes: u64,
    pub pops: u64,
    pub intercepted_pops: u64,
    pub finishes: u64,
    pub views_presented: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("depth".to_string(), json!(self.depth));
        map.insert("pushes".to_string(), json!(self.pushes));
        map.insert("pops".to_string(), json!(self.pops));
        map.insert("intercepted_pops".to_string(), json!(self.intercepted_pops));
        map.insert("finishes".to_string(), json!(self.finishes));
        map.insert("views_presented".to_string(), json!(self.views_presented));
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "switcher_metrics", self.as_fields())
    }
}
