//! Inventory Item Model

use serde::{Deserialize, Deserializer, Serialize};

/// Inventory item entity
///
/// `usage_per_serving` is the amount of this stock consumed by one unit of
/// the linked menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub quantity: f64,
    /// kg, g, l, ml, pcs, ...
    pub unit: String,
    pub min_quantity: f64,
    pub usage_per_serving: f64,
    pub menu_item_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl InventoryItem {
    /// Low stock: quantity at or below the minimum threshold
    pub fn is_low(&self) -> bool {
        self.quantity <= self.min_quantity
    }
}

/// Inventory row as returned by the API, with derived low-stock flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItemView {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub is_low: bool,
}

impl From<InventoryItem> for InventoryItemView {
    fn from(item: InventoryItem) -> Self {
        Self {
            is_low: item.is_low(),
            item,
        }
    }
}

/// Create inventory item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemCreate {
    pub name: String,
    pub description: Option<String>,
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub min_quantity: f64,
    #[serde(default)]
    pub usage_per_serving: f64,
    pub menu_item_id: Option<i64>,
}

/// Update inventory item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub min_quantity: Option<f64>,
    pub usage_per_serving: Option<f64>,
    /// 字段缺失: 保持不变; `null`: 解除关联; 数值: 关联到该菜品
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub menu_item_id: Option<Option<i64>>,
}

/// Distinguish an explicit `null` from an absent field
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flour(quantity: f64, min_quantity: f64) -> InventoryItem {
        InventoryItem {
            id: 1,
            name: "Flour".to_string(),
            description: None,
            quantity,
            unit: "kg".to_string(),
            min_quantity,
            usage_per_serving: 0.5,
            menu_item_id: Some(1),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn low_stock_is_inclusive() {
        assert!(flour(2.0, 2.0).is_low());
        assert!(flour(1.5, 2.0).is_low());
        assert!(!flour(2.5, 2.0).is_low());
    }

    #[test]
    fn update_tells_null_from_absent() {
        let absent: InventoryItemUpdate = serde_json::from_str(r#"{"quantity": 4.0}"#).unwrap();
        assert_eq!(absent.menu_item_id, None);

        let unlink: InventoryItemUpdate = serde_json::from_str(r#"{"menu_item_id": null}"#).unwrap();
        assert_eq!(unlink.menu_item_id, Some(None));

        let link: InventoryItemUpdate = serde_json::from_str(r#"{"menu_item_id": 7}"#).unwrap();
        assert_eq!(link.menu_item_id, Some(Some(7)));
    }

    #[test]
    fn view_flattens_item() {
        let json = serde_json::to_value(InventoryItemView::from(flour(1.0, 2.0))).unwrap();
        assert_eq!(json["name"], "Flour");
        assert_eq!(json["is_low"], true);
        assert_eq!(json["usage_per_serving"], 0.5);
    }
}
