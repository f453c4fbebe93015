#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RegistryMetrics {
    pub behaviors_created: usize,
    pub routes_registered: usize,
    pub named_routes: usize,
}

impl RegistryMetrics {
    pub fn record_behavior(&mut self) {
        self.behaviors_created += 1;
    }

    pub fn record_route(&mut self) {
        self.routes_registered += 1;
    }

    pub fn record_name(&mut self) {
        self.named_routes += 1;
    }

    pub(crate) fn absorb(&mut self, other: RegistryMetrics) {
        self.behaviors_created += other.behaviors_created;
        self.routes_registered += other.routes_registered;
        self.named_routes += other.named_routes;
    }
}
