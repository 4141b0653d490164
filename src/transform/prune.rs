//! Removal of empty and boilerplate tables.

use super::classify::{classify_table, TableRole};
use crate::config::DocumentKind;
use crate::model::Document;

/// Detach every boilerplate table from the body. Returns how many were
/// removed.
pub fn prune_tables(doc: &mut Document, kind: DocumentKind) -> usize {
    let removed = doc.remove_tables(|table| classify_table(table, kind) == TableRole::Boilerplate);
    if removed > 0 {
        log::debug!("Pruned {} tables", removed);
    }
    removed
}
