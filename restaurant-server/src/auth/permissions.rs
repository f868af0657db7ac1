//! 角色集合
//!
//! 路由通过 [`require_role`](crate::auth::require_role) 声明所需的角色集合。

use shared::models::Role;

/// 仅管理员
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// 前厅员工: 库存查看、预订列表、评论审核
pub const STAFF_ROLES: &[Role] = &[Role::Staff, Role::Admin];

/// 厨房: 订单状态流转、待制作订单
pub const KITCHEN_ROLES: &[Role] = &[Role::Kitchen, Role::Admin];

/// 管理员可创建的员工角色
pub const ASSIGNABLE_STAFF_ROLES: &[Role] = &[Role::Staff, Role::Kitchen, Role::Admin];
