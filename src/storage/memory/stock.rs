//! In-memory stock levels

use crate::core::types::{ObjectRef, WarehouseId};
use crate::storage::StockLocator;
use crate::utils::error::Result;
use dashmap::DashMap;
use std::collections::HashMap;

/// Quantity of each object per warehouse
#[derive(Debug, Default)]
pub struct InMemoryStock {
    levels: DashMap<ObjectRef, HashMap<WarehouseId, i64>>,
}

impl InMemoryStock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_quantity(&self, target: ObjectRef, warehouse: WarehouseId, quantity: i64) {
        self.levels
            .entry(target)
            .or_default()
            .insert(warehouse, quantity);
    }

    pub fn quantity(&self, target: &ObjectRef, warehouse: WarehouseId) -> i64 {
        self.levels
            .get(target)
            .and_then(|levels| levels.get(&warehouse).copied())
            .unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl StockLocator for InMemoryStock {
    async fn warehouses_with_stock(&self, target: &ObjectRef) -> Result<Vec<WarehouseId>> {
        let mut warehouses: Vec<WarehouseId> = self
            .levels
            .get(target)
            .map(|levels| {
                levels
                    .iter()
                    .filter(|(_, quantity)| **quantity > 0)
                    .map(|(warehouse, _)| *warehouse)
                    .collect()
            })
            .unwrap_or_default();
        warehouses.sort();
        Ok(warehouses)
    }
}
