//! LiveOrderHub — 订单实时推送注册表
//!
//! 每个 WebSocket 连接以一组主题注册, 发布时按主题查找连接并推送。
//!
//! ```text
//! Order placement / status transition
//!       │ LiveEvent
//!       ▼
//! LiveOrderHub
//!   └── subscribers: conn_id → (topics, mpsc::Sender)
//!           │ try_send (满或已关闭则丢弃)
//!           ▼
//!      WS session → client
//! ```
//!
//! 投递语义为尽力而为的至多一次: 离线连接不补发。

use dashmap::DashMap;
use shared::LiveEvent;
use shared::models::{Order, OrderStatus, Role};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::mpsc;

use crate::auth::CurrentUser;

/// 每个连接的发送队列容量
pub const SUBSCRIBER_QUEUE_CAPACITY: usize = 64;

/// 推送主题
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// 按角色分组
    Role(Role),
    /// 单个顾客 (订单所有者)
    Customer(i64),
    /// 厨房 (kitchen + admin)
    Kitchen,
}

impl Topic {
    pub fn label(&self) -> String {
        match self {
            Topic::Role(role) => format!("role:{role}"),
            Topic::Customer(id) => format!("customer:{id}"),
            Topic::Kitchen => "kitchen".to_string(),
        }
    }

    /// 认证用户应加入的主题
    pub fn for_user(user: &CurrentUser) -> HashSet<Topic> {
        let mut topics = HashSet::from([Topic::Role(user.role), Topic::Customer(user.id)]);
        if user.role.is_kitchen_crew() {
            topics.insert(Topic::Kitchen);
        }
        topics
    }
}

struct Subscriber {
    topics: HashSet<Topic>,
    tx: mpsc::Sender<Arc<LiveEvent>>,
}

/// 已注册的连接
pub struct Subscription {
    pub id: u64,
    pub topics: HashSet<Topic>,
    pub rx: mpsc::Receiver<Arc<LiveEvent>>,
}

#[derive(Default)]
struct HubInner {
    subscribers: DashMap<u64, Subscriber>,
    next_id: AtomicU64,
    closed: AtomicBool,
}

/// 订单实时推送注册表, 克隆共享同一份状态
#[derive(Clone, Default)]
pub struct LiveOrderHub {
    inner: Arc<HubInner>,
}

impl LiveOrderHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册连接
    ///
    /// 关闭后注册的连接立即收到队列结束
    pub fn subscribe(&self, topics: HashSet<Topic>) -> Subscription {
        let (tx, rx) = mpsc::channel(SUBSCRIBER_QUEUE_CAPACITY);
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;

        self.inner.subscribers.insert(
            id,
            Subscriber {
                topics: topics.clone(),
                tx,
            },
        );
        // 与 shutdown 并发时: 要么此处看到关闭标记, 要么 shutdown 的 clear 看到本条目
        if self.inner.closed.load(Ordering::SeqCst) {
            self.inner.subscribers.remove(&id);
        }

        Subscription { id, topics, rx }
    }

    pub fn unsubscribe(&self, id: u64) {
        self.inner.subscribers.remove(&id);
    }

    pub fn connection_count(&self) -> usize {
        self.inner.subscribers.len()
    }

    /// 推送到订阅了任一目标主题的连接, 每个连接最多一次
    ///
    /// 从不阻塞; 返回成功入队的连接数
    pub fn publish(&self, targets: &[Topic], event: LiveEvent) -> usize {
        let event = Arc::new(event);
        let mut delivered = 0;
        let mut closed = Vec::new();

        for entry in self.inner.subscribers.iter() {
            let sub = entry.value();
            if !targets.iter().any(|t| sub.topics.contains(t)) {
                continue;
            }
            match sub.tx.try_send(event.clone()) {
                Ok(()) => delivered += 1,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!(
                        conn_id = *entry.key(),
                        event = event.name(),
                        "Subscriber queue full, dropping event"
                    );
                }
                Err(mpsc::error::TrySendError::Closed(_)) => closed.push(*entry.key()),
            }
        }

        // DashMap 迭代期间不能删除
        for id in closed {
            tracing::debug!(conn_id = id, "Removing closed subscriber");
            self.inner.subscribers.remove(&id);
        }

        delivered
    }

    /// `order:created` → 厨房
    pub fn publish_order_created(&self, order: &Order) -> usize {
        self.publish(
            &[Topic::Kitchen],
            LiveEvent::OrderCreated(Box::new(order.clone())),
        )
    }

    /// `order:updated` → 厨房 + 订单所有者 (访客订单仅厨房)
    pub fn publish_order_updated(&self, order: &Order, previous_status: OrderStatus) -> usize {
        let mut targets = vec![Topic::Kitchen];
        if let Some(customer_id) = order.customer_id {
            targets.push(Topic::Customer(customer_id));
        }
        self.publish(
            &targets,
            LiveEvent::OrderUpdated {
                order: Box::new(order.clone()),
                previous_status,
            },
        )
    }

    /// 关闭所有连接队列, 之后的注册不再生效
    pub fn shutdown(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
        let count = self.inner.subscribers.len();
        self.inner.subscribers.clear();
        tracing::info!(connections = count, "Live order hub closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, role: Role) -> CurrentUser {
        CurrentUser {
            id,
            email: format!("u{id}@example.com"),
            name: format!("User {id}"),
            role,
        }
    }

    fn order(id: i64, customer_id: Option<i64>) -> Order {
        Order {
            id,
            customer_id,
            customer_name: "Ada".to_string(),
            customer_phone: "555-0100".to_string(),
            customer_email: None,
            customer_address: None,
            status: OrderStatus::Confirmed,
            table_number: None,
            is_guest_order: customer_id.is_none(),
            total_amount: 12.5,
            notes: None,
            created_at: 0,
            updated_at: 0,
            items: vec![],
        }
    }

    #[test]
    fn kitchen_crew_topics() {
        let topics = Topic::for_user(&user(1, Role::Admin));
        assert!(topics.contains(&Topic::Kitchen));
        assert!(topics.contains(&Topic::Role(Role::Admin)));
        assert!(topics.contains(&Topic::Customer(1)));

        let topics = Topic::for_user(&user(2, Role::Customer));
        assert!(!topics.contains(&Topic::Kitchen));
        assert_eq!(topics.len(), 2);
    }

    #[tokio::test]
    async fn created_goes_to_kitchen_once() {
        let hub = LiveOrderHub::new();
        let mut cook = hub.subscribe(Topic::for_user(&user(1, Role::Kitchen)));
        let mut customer = hub.subscribe(Topic::for_user(&user(2, Role::Customer)));

        assert_eq!(hub.publish_order_created(&order(7, Some(2))), 1);

        let event = cook.rx.recv().await.unwrap();
        assert_eq!(event.name(), "order:created");
        assert!(cook.rx.try_recv().is_err());
        assert!(customer.rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn updates_reach_owner_only() {
        let hub = LiveOrderHub::new();
        let mut owner = hub.subscribe(Topic::for_user(&user(2, Role::Customer)));
        let mut other = hub.subscribe(Topic::for_user(&user(3, Role::Customer)));
        let mut admin = hub.subscribe(Topic::for_user(&user(1, Role::Admin)));

        hub.publish_order_updated(&order(7, Some(2)), OrderStatus::Pending);

        match owner.rx.recv().await.unwrap().as_ref() {
            LiveEvent::OrderUpdated {
                order,
                previous_status,
            } => {
                assert_eq!(order.id, 7);
                assert_eq!(*previous_status, OrderStatus::Pending);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(other.rx.try_recv().is_err());
        assert!(admin.rx.try_recv().is_ok());
    }

    #[test]
    fn connection_matching_several_topics_gets_one_copy() {
        let hub = LiveOrderHub::new();
        // admin who also owns the order: Kitchen + Customer(1)
        let mut admin = hub.subscribe(Topic::for_user(&user(1, Role::Admin)));

        assert_eq!(
            hub.publish_order_updated(&order(7, Some(1)), OrderStatus::Ready),
            1
        );
        assert!(admin.rx.try_recv().is_ok());
        assert!(admin.rx.try_recv().is_err());
    }

    #[test]
    fn full_queue_drops_without_blocking() {
        let hub = LiveOrderHub::new();
        let mut cook = hub.subscribe(HashSet::from([Topic::Kitchen]));

        for i in 0..SUBSCRIBER_QUEUE_CAPACITY as i64 {
            assert_eq!(hub.publish_order_created(&order(i, None)), 1);
        }
        assert_eq!(hub.publish_order_created(&order(999, None)), 0);

        let mut received = 0;
        while cook.rx.try_recv().is_ok() {
            received += 1;
        }
        assert_eq!(received, SUBSCRIBER_QUEUE_CAPACITY);
        assert_eq!(hub.connection_count(), 1);
    }

    #[test]
    fn closed_receivers_are_pruned() {
        let hub = LiveOrderHub::new();
        let cook = hub.subscribe(HashSet::from([Topic::Kitchen]));
        drop(cook);

        assert_eq!(hub.publish_order_created(&order(1, None)), 0);
        assert_eq!(hub.connection_count(), 0);
    }

    #[tokio::test]
    async fn shutdown_ends_every_queue() {
        let hub = LiveOrderHub::new();
        let mut cook = hub.subscribe(HashSet::from([Topic::Kitchen]));

        hub.shutdown();
        assert!(cook.rx.recv().await.is_none());

        let mut late = hub.subscribe(HashSet::from([Topic::Kitchen]));
        assert!(late.rx.recv().await.is_none());
        assert_eq!(hub.publish_order_created(&order(1, None)), 0);
    }

    #[test]
    fn subscribing_during_shutdown_never_leaks() {
        for _ in 0..50 {
            let hub = LiveOrderHub::new();
            let barrier = Arc::new(std::sync::Barrier::new(5));

            let subscribers: Vec<_> = (0..4)
                .map(|_| {
                    let hub = hub.clone();
                    let barrier = barrier.clone();
                    std::thread::spawn(move || {
                        barrier.wait();
                        (0..20)
                            .map(|_| hub.subscribe(HashSet::from([Topic::Kitchen])))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            barrier.wait();
            hub.shutdown();

            for handle in subscribers {
                for mut sub in handle.join().unwrap() {
                    assert!(matches!(
                        sub.rx.try_recv(),
                        Err(mpsc::error::TryRecvError::Disconnected)
                    ));
                }
            }
            assert_eq!(hub.connection_count(), 0);
        }
    }

    #[test]
    fn no_subscribers_is_not_an_error() {
        let hub = LiveOrderHub::new();
        assert_eq!(hub.publish_order_created(&order(1, None)), 0);
    }
}
