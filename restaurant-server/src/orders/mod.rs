//! 订单业务
//!
//! - [`placement`] - 下单: 校验、价格快照、库存扣减 (单事务)
//! - [`status`] - 状态流转
//! - [`inventory`] - 库存扣减
//! - [`money`] - 金额/库存的定点运算

pub mod inventory;
pub mod money;
pub mod placement;
pub mod status;

use shared::models::Order;

use crate::auth::CurrentUser;

pub use placement::place_order;
pub use status::{change_status, parse_status};

/// 订单可见性: 员工/厨房/管理员可见全部, 顾客仅可见自己的订单
pub fn can_view(user: &CurrentUser, order: &Order) -> bool {
    user.role.sees_all_orders() || order.customer_id == Some(user.id)
}
