//! Operations over collections of beans.

use super::rousseau::RousseauBean;
use crate::fault::{CompoundFault, FaultAggregate};
use std::sync::Arc;
use tracing::debug;

/// Normalize every bean in place.
///
/// Takes the same shared beans as [`wild_faults_of`]. A bean that is also
/// held elsewhere is cloned first, so other holders keep their version.
pub fn normalize_all<T: RousseauBean + Clone>(beans: &mut [Arc<T>]) {
    for bean in beans {
        Arc::make_mut(bean).normalize();
    }
}

/// The wild faults of all beans, gathered in one unscoped aggregate.
///
/// Faults are bucketed by property name only, so faults about the same
/// property of different beans share a bucket.
pub fn wild_faults_of<T: RousseauBean>(beans: &[Arc<T>]) -> FaultAggregate {
    let mut gathered = FaultAggregate::new();
    for bean in beans {
        let wild = bean.wild_faults();
        for fault in wild.all_element_faults() {
            gathered.insert(fault.clone());
        }
    }
    gathered
}

/// Fail with every wild fault of every bean unless all are civilized.
pub fn check_civility_of<T: RousseauBean>(beans: &[Arc<T>]) -> Result<(), CompoundFault> {
    let wild = wild_faults_of(beans);
    if wild.is_empty() {
        return Ok(());
    }
    debug!(
        beans = beans.len(),
        size = wild.size(),
        "not all beans are civilized"
    );
    Err(wild.close())
}
