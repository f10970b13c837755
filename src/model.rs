//! The report snapshot and its instrument records.
//!
//! Readings are kept as the free-form strings the technician typed. They are
//! only interpreted as numbers when checked against control limits.

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique record identifier of the form `"{unix_millis}-{counter}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate() -> Self {
        let count = ID_COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
        RecordId(format!("{}-{}", Utc::now().timestamp_millis(), count))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

/// Behaviour shared by boilers, support systems and closed loops.
pub trait InstrumentRecord {
    fn id(&self) -> &RecordId;
    fn name(&self) -> &str;
    fn notes(&self) -> &str;
    /// `(control-limit field, value)` pairs in display order.
    fn readings(&self) -> Vec<(&'static str, &str)>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Boiler {
    pub id: RecordId,
    pub name: String,
    pub ph: String,
    pub so3: String,
    pub p_alk: String,
    pub m_alk: String,
    pub oh_alk: String,
    pub cond: String,
    pub fluor: String,
    pub notes: String,
}

impl Boiler {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            name: name.into(),
            ph: String::new(),
            so3: String::new(),
            p_alk: String::new(),
            m_alk: String::new(),
            oh_alk: String::new(),
            cond: String::new(),
            fluor: String::new(),
            notes: String::new(),
        }
    }
}

impl Default for Boiler {
    fn default() -> Self {
        Self::new("Boiler")
    }
}

impl InstrumentRecord for Boiler {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn notes(&self) -> &str {
        &self.notes
    }

    fn readings(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("boilerPh", self.ph.as_str()),
            ("boilerSo3", self.so3.as_str()),
            ("boilerPAlk", self.p_alk.as_str()),
            ("boilerMAlk", self.m_alk.as_str()),
            ("boilerOhAlk", self.oh_alk.as_str()),
            ("boilerCond", self.cond.as_str()),
            ("boilerFluor", self.fluor.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SupportSystem {
    pub id: RecordId,
    pub name: String,
    pub cond: String,
    pub ph: String,
    pub trh: String,
    pub notes: String,
}

impl SupportSystem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            name: name.into(),
            cond: String::new(),
            ph: String::new(),
            trh: String::new(),
            notes: String::new(),
        }
    }
}

impl Default for SupportSystem {
    fn default() -> Self {
        Self::new("Support System")
    }
}

impl InstrumentRecord for SupportSystem {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn notes(&self) -> &str {
        &self.notes
    }

    fn readings(&self) -> Vec<(&'static str, &str)> {
        // Conductivity has no registered limit for support systems.
        vec![
            ("systemCond", self.cond.as_str()),
            ("systemPh", self.ph.as_str()),
            ("systemTrh", self.trh.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClosedLoop {
    pub id: RecordId,
    pub name: String,
    pub ph: String,
    pub cond: String,
    pub no2_hot: String,
    pub no2_cold: String,
    pub notes: String,
}

impl ClosedLoop {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            name: name.into(),
            ph: String::new(),
            cond: String::new(),
            no2_hot: String::new(),
            no2_cold: String::new(),
            notes: String::new(),
        }
    }
}

impl Default for ClosedLoop {
    fn default() -> Self {
        Self::new("Closed Loop")
    }
}

impl InstrumentRecord for ClosedLoop {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn notes(&self) -> &str {
        &self.notes
    }

    fn readings(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("loopPh", self.ph.as_str()),
            ("loopCond", self.cond.as_str()),
            ("loopNo2Hot", self.no2_hot.as_str()),
            ("loopNo2Cold", self.no2_cold.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceFrequency {
    #[default]
    Weekly,
    BiWeekly,
    Monthly,
}

impl ServiceFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceFrequency::Weekly => "weekly",
            ServiceFrequency::BiWeekly => "bi-weekly",
            ServiceFrequency::Monthly => "monthly",
        }
    }

    /// Human-readable label printed on the report.
    pub fn label(self) -> &'static str {
        match self {
            ServiceFrequency::Weekly => "Weekly",
            ServiceFrequency::BiWeekly => "Bi-Weekly",
            ServiceFrequency::Monthly => "Monthly",
        }
    }

    fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekly" => ServiceFrequency::Weekly,
            "bi-weekly" | "biweekly" => ServiceFrequency::BiWeekly,
            "monthly" => ServiceFrequency::Monthly,
            other => {
                log::warn!("Unknown service frequency '{}', using weekly", other);
                ServiceFrequency::Weekly
            }
        }
    }
}

impl Serialize for ServiceFrequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ServiceFrequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&value))
    }
}

/// Everything needed to produce one report. Rendering only ever borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportSnapshot {
    /// `YYYY-MM-DD`.
    pub date: String,
    #[serde(alias = "plantName")]
    pub site_name: String,
    pub address: String,
    #[serde(alias = "attention")]
    pub contact_name: String,
    #[serde(alias = "phone")]
    pub contact_phone: String,
    pub technician: String,
    pub service_frequency: ServiceFrequency,
    pub include_cover_page: bool,
    pub boilers: Vec<Boiler>,
    pub support_systems: Vec<SupportSystem>,
    pub closed_loops: Vec<ClosedLoop>,
    pub general_notes: String,
}

impl Default for ReportSnapshot {
    fn default() -> Self {
        Self {
            date: Utc::now().format("%Y-%m-%d").to_string(),
            site_name: String::new(),
            address: String::new(),
            contact_name: String::new(),
            contact_phone: String::new(),
            technician: String::new(),
            service_frequency: ServiceFrequency::Weekly,
            include_cover_page: true,
            boilers: vec![Boiler::new("Boiler 1")],
            support_systems: vec![SupportSystem::new("DA")],
            closed_loops: vec![ClosedLoop::new("Loop 1")],
            general_notes: String::new(),
        }
    }
}

fn remove_record<T: InstrumentRecord>(records: &mut Vec<T>, id: &RecordId) -> bool {
    if records.len() <= 1 {
        return false;
    }
    match records.iter().position(|r| r.id() == id) {
        Some(index) => {
            records.remove(index);
            true
        }
        None => false,
    }
}

impl ReportSnapshot {
    /// Parses a snapshot, replacing empty record lists with the defaults so
    /// every collection keeps at least one member.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut snapshot: ReportSnapshot = serde_json::from_str(json)?;
        snapshot.fill_empty_collections();
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn fill_empty_collections(&mut self) {
        if self.boilers.is_empty() {
            self.boilers.push(Boiler::new("Boiler 1"));
        }
        if self.support_systems.is_empty() {
            self.support_systems.push(SupportSystem::new("DA"));
        }
        if self.closed_loops.is_empty() {
            self.closed_loops.push(ClosedLoop::new("Loop 1"));
        }
    }

    pub fn add_boiler(&mut self) -> RecordId {
        let boiler = Boiler::new(format!("Boiler {}", self.boilers.len() + 1));
        let id = boiler.id.clone();
        self.boilers.push(boiler);
        id
    }

    pub fn add_support_system(&mut self) -> RecordId {
        let system = SupportSystem::new(format!("System {}", self.support_systems.len() + 1));
        let id = system.id.clone();
        self.support_systems.push(system);
        id
    }

    pub fn add_closed_loop(&mut self) -> RecordId {
        let closed_loop = ClosedLoop::new(format!("Loop {}", self.closed_loops.len() + 1));
        let id = closed_loop.id.clone();
        self.closed_loops.push(closed_loop);
        id
    }

    /// Removes the boiler with `id`. The last boiler is never removed.
    pub fn remove_boiler(&mut self, id: &RecordId) -> bool {
        remove_record(&mut self.boilers, id)
    }

    pub fn remove_support_system(&mut self, id: &RecordId) -> bool {
        remove_record(&mut self.support_systems, id)
    }

    pub fn remove_closed_loop(&mut self, id: &RecordId) -> bool {
        remove_record(&mut self.closed_loops, id)
    }
}
