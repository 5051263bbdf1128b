//! Namespaced report cache.
//!
//! Reports live under `<namespace><patient_id>` keys. Anything stored under
//! the namespace that doesn't parse into a [`Report`] is treated as absent.

use log::{debug, info};
use pharmaguard_core::{NAMESPACE_PREFIX, Report};

use super::errors::CacheError;
use super::substrate::KeyValueStore;

///
/// Save, read, enumerate and evict serialized reports.
///
/// Read operations never fail; only writes can return an error.
///
pub trait ReportCacheStore {
    /// Write the report under its patient id, replacing any previous entry.
    fn save(&mut self, report: &Report) -> Result<(), CacheError>;

    fn get(&self, patient_id: &str) -> Option<Report>;

    /// Every parsable report, newest first. Reports without a usable
    /// timestamp sort last; ties keep enumeration order.
    fn get_all(&self) -> Vec<Report>;

    fn get_latest(&self) -> Option<Report> {
        self.get_all().into_iter().next()
    }

    fn remove(&mut self, patient_id: &str) -> Result<(), CacheError>;

    fn clear_all(&mut self) -> Result<(), CacheError>;
}

/// [`ReportCacheStore`] over any [`KeyValueStore`].
#[derive(Clone, Debug)]
pub struct ReportCache<S: KeyValueStore> {
    substrate: S,
    namespace: String,
}

impl<S: KeyValueStore> ReportCache<S> {
    pub fn new(substrate: S) -> Self {
        Self::with_namespace(substrate, NAMESPACE_PREFIX)
    }

    pub fn with_namespace(substrate: S, namespace: &str) -> Self {
        ReportCache {
            substrate,
            namespace: namespace.to_string(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn substrate(&self) -> &S {
        &self.substrate
    }

    pub fn substrate_mut(&mut self) -> &mut S {
        &mut self.substrate
    }

    fn key(&self, identifier: &str) -> String {
        format!("{}{}", self.namespace, identifier)
    }

    fn namespaced_keys(&self) -> Vec<String> {
        self.substrate
            .keys()
            .into_iter()
            .filter(|key| key.starts_with(&self.namespace))
            .collect()
    }

    fn read_entry(&self, key: &str) -> Option<Report> {
        let raw = self.substrate.get_item(key)?;
        match serde_json::from_str::<Report>(&raw) {
            Ok(report) => Some(report),
            Err(e) => {
                debug!("Skipping unreadable cache entry {}: {}", key, e);
                None
            }
        }
    }
}

impl<S: KeyValueStore> ReportCacheStore for ReportCache<S> {
    fn save(&mut self, report: &Report) -> Result<(), CacheError> {
        let patient_id = report
            .patient_id
            .as_deref()
            .ok_or(CacheError::MissingPatientId)?;
        let key = self.key(patient_id);
        let body = serde_json::to_string(report)?;
        self.substrate.set_item(&key, &body)?;
        info!("Report for {} cached under {}", report.drug, key);
        Ok(())
    }

    fn get(&self, patient_id: &str) -> Option<Report> {
        self.read_entry(&self.key(patient_id))
    }

    fn get_all(&self) -> Vec<Report> {
        let mut reports: Vec<Report> = self
            .namespaced_keys()
            .iter()
            .filter_map(|key| self.read_entry(key))
            .collect();

        // Option<DateTime> orders None first, so reversing puts it last
        reports.sort_by_key(|report| std::cmp::Reverse(report.parsed_timestamp()));
        reports
    }

    fn remove(&mut self, patient_id: &str) -> Result<(), CacheError> {
        let key = self.key(patient_id);
        self.substrate.remove_item(&key)?;
        info!("{} is removed.", key);
        Ok(())
    }

    fn clear_all(&mut self) -> Result<(), CacheError> {
        let keys = self.namespaced_keys();
        for key in &keys {
            self.substrate.remove_item(key)?;
        }
        info!("Cleared {} cached entries", keys.len());
        Ok(())
    }
}
