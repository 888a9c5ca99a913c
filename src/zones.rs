//! Zone matching and record label derivation
//!
//! Given a fully-qualified domain name and the zones fetched for the current
//! request, find the zone that owns the name (longest suffix at a label
//! boundary) and compute the record label relative to that zone.

use std::fmt;

use tracing::{debug, warn};

use crate::constants::APEX_LABEL;
use crate::dns_provider::Zone;
use crate::validation::normalize_domain;

//==============================================================================
// Types
//==============================================================================

/// Record name relative to its zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordLabel {
    /// The zone's root name itself, written as `@`
    Apex,
    /// Everything left of the zone suffix; may contain dots when the zone is
    /// not the immediate parent (e.g. `a.b` in zone `example.com`)
    Subdomain(String),
}

impl RecordLabel {
    /// The label as the provider expects it
    pub fn as_str(&self) -> &str {
        match self {
            Self::Apex => APEX_LABEL,
            Self::Subdomain(label) => label,
        }
    }
}

impl fmt::Display for RecordLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//==============================================================================
// Matching
//==============================================================================

/// Returns true if `zone` equals `fqdn` or is a suffix of it at a label
/// boundary. Both arguments must already be normalized.
fn is_label_suffix(fqdn: &str, zone: &str) -> bool {
    if zone.is_empty() {
        return false;
    }
    if fqdn == zone {
        return true;
    }
    fqdn.len() > zone.len()
        && fqdn.ends_with(zone)
        && fqdn.as_bytes()[fqdn.len() - zone.len() - 1] == b'.'
}

fn label_count(name: &str) -> usize {
    name.split('.').count()
}

/// Finds the zone that owns `fqdn`
///
/// Among all zones whose name is a label-boundary suffix of `fqdn`, the one
/// with the most labels wins. Two candidates can only tie when the provider
/// reports the same zone name twice; the smallest `(name, id)` pair is then
/// chosen so the result does not depend on listing order.
///
/// Returns `None` when no managed zone covers the name.
pub fn match_zone<'a>(fqdn: &str, zones: &'a [Zone]) -> Option<&'a Zone> {
    let fqdn = normalize_domain(fqdn);
    let mut best: Option<(&'a Zone, String, usize)> = None;

    for zone in zones {
        let name = normalize_domain(&zone.name);
        if !is_label_suffix(&fqdn, &name) {
            continue;
        }
        let labels = label_count(&name);

        let replace = match &best {
            None => true,
            Some((current, current_name, current_labels)) => {
                if labels != *current_labels {
                    labels > *current_labels
                } else {
                    warn!(
                        "Zones {} and {} are equally specific for {}; picking deterministically",
                        current, zone, fqdn
                    );
                    (name.as_str(), zone.id.as_str())
                        < (current_name.as_str(), current.id.as_str())
                }
            }
        };

        if replace {
            best = Some((zone, name, labels));
        }
    }

    best.map(|(zone, _, _)| zone)
}

/// Computes the record label of `fqdn` inside `zone`
///
/// Returns `None` if `zone` does not own `fqdn`.
pub fn derive_label(fqdn: &str, zone: &Zone) -> Option<RecordLabel> {
    let fqdn = normalize_domain(fqdn);
    let zone_name = normalize_domain(&zone.name);

    if fqdn == zone_name {
        return Some(RecordLabel::Apex);
    }
    fqdn.strip_suffix(&format!(".{zone_name}"))
        .filter(|prefix| !prefix.is_empty())
        .map(|prefix| RecordLabel::Subdomain(prefix.to_string()))
}

/// Runs the matcher and the deriver in one step
pub fn resolve<'a>(fqdn: &str, zones: &'a [Zone]) -> Option<(&'a Zone, RecordLabel)> {
    let zone = match_zone(fqdn, zones)?;
    let label = derive_label(fqdn, zone)?;
    debug!("Resolved {} to zone {}, record {}", fqdn, zone, label);
    Some((zone, label))
}

//==============================================================================
// Tests
//==============================================================================
