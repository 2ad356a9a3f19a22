//! Table registry
//!
//! Owns the dining tables and their occupancy status. The registry is held
//! inside the order ledger's state, so occupancy transitions can only be
//! driven by ledger operations; presentation code gets the read-only
//! queries re-exposed on the ledger.

use std::collections::HashMap;

use shared::models::{RestaurantTable, TableStatus};
use uuid::Uuid;

use crate::orders::error::{LedgerError, LedgerResult};

/// Registry of dining tables keyed by id
#[derive(Debug, Default)]
pub struct TableRegistry {
    tables: HashMap<Uuid, RestaurantTable>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table (setup/seed time; tables are never deleted in
    /// normal operation)
    pub fn insert(&mut self, table: RestaurantTable) {
        self.tables.insert(table.id, table);
    }

    /// All tables, ordered by table number ascending
    pub fn list(&self) -> Vec<RestaurantTable> {
        let mut tables: Vec<_> = self.tables.values().cloned().collect();
        tables.sort_by_key(|t| t.table_number);
        tables
    }

    pub fn get(&self, id: Uuid) -> Option<&RestaurantTable> {
        self.tables.get(&id)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Transition a table to Occupied when an order opens against it.
    ///
    /// An already-Occupied table means occupancy has drifted from order
    /// state (the ledger resolves the one-open-order-per-table case before
    /// calling this).
    pub(crate) fn mark_occupied(&mut self, id: Uuid) -> LedgerResult<()> {
        let table = self
            .tables
            .get_mut(&id)
            .ok_or(LedgerError::TableNotFound(id))?;
        if table.status == TableStatus::Occupied {
            return Err(LedgerError::InvalidState(format!(
                "table {} is already occupied",
                table.table_number
            )));
        }
        table.status = TableStatus::Occupied;
        Ok(())
    }

    /// Transition a table back to Free when its order closes or cancels.
    pub(crate) fn mark_free(&mut self, id: Uuid) -> LedgerResult<()> {
        let table = self
            .tables
            .get_mut(&id)
            .ok_or(LedgerError::TableNotFound(id))?;
        table.status = TableStatus::Free;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_tables(numbers: &[u32]) -> (TableRegistry, Vec<Uuid>) {
        let mut registry = TableRegistry::new();
        let mut ids = Vec::new();
        for n in numbers {
            let table = RestaurantTable::new(*n);
            ids.push(table.id);
            registry.insert(table);
        }
        (registry, ids)
    }

    #[test]
    fn list_orders_by_table_number() {
        let (registry, _) = registry_with_tables(&[7, 2, 11]);
        let numbers: Vec<u32> = registry.list().iter().map(|t| t.table_number).collect();
        assert_eq!(numbers, vec![2, 7, 11]);
    }

    #[test]
    fn mark_occupied_twice_fails() {
        let (mut registry, ids) = registry_with_tables(&[1]);
        registry.mark_occupied(ids[0]).unwrap();
        assert!(matches!(
            registry.mark_occupied(ids[0]),
            Err(LedgerError::InvalidState(_))
        ));
    }

    #[test]
    fn mark_free_resets_status() {
        let (mut registry, ids) = registry_with_tables(&[1]);
        registry.mark_occupied(ids[0]).unwrap();
        registry.mark_free(ids[0]).unwrap();
        assert!(registry.get(ids[0]).unwrap().is_free());
    }

    #[test]
    fn mark_occupied_unknown_table_fails() {
        let (mut registry, _) = registry_with_tables(&[1]);
        assert!(matches!(
            registry.mark_occupied(Uuid::new_v4()),
            Err(LedgerError::TableNotFound(_))
        ));
    }

    #[test]
    fn reserved_table_can_be_seated() {
        let (mut registry, ids) = registry_with_tables(&[1]);
        if let Some(t) = registry.tables.get_mut(&ids[0]) {
            t.status = TableStatus::Reserved;
        }
        registry.mark_occupied(ids[0]).unwrap();
        assert!(registry.get(ids[0]).unwrap().is_occupied());
    }
}
