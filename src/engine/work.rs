// Tue Aug 18 2026 - Alex

use std::fmt;

/// Where a work item runs. Global services are listed once per account;
/// regional services are listed once per enabled region.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegionTarget {
    Global,
    Region(String),
}

impl fmt::Display for RegionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionTarget::Global => write!(f, "global"),
            RegionTarget::Region(r) => write!(f, "{}", r),
        }
    }
}

/// A single unit of scan work: one service listed against one target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkItem {
    service: String,
    target: RegionTarget,
}

impl WorkItem {
    pub fn global(service: &str) -> Self {
        Self {
            service: service.to_string(),
            target: RegionTarget::Global,
        }
    }

    pub fn regional(service: &str, region: &str) -> Self {
        Self {
            service: service.to_string(),
            target: RegionTarget::Region(region.to_string()),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn target(&self) -> &RegionTarget {
        &self.target
    }

    pub fn is_global(&self) -> bool {
        matches!(self.target, RegionTarget::Global)
    }

    /// Region the API calls actually run in. Global services still need a
    /// concrete endpoint region on the wire.
    pub fn effective_region<'a>(&'a self, default_region: &'a str) -> &'a str {
        match &self.target {
            RegionTarget::Global => default_region,
            RegionTarget::Region(r) => r,
        }
    }

    /// Region recorded against results and errors.
    pub fn display_region(&self) -> String {
        self.target.to_string()
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.service, self.target)
    }
}
