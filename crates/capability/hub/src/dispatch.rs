//! 无缓冲连接分发通道。
//!
//! 接收方（handler worker）每次空闲时登记一个交接槽，发送方（accept worker）
//! 必须拿到一个槽才能交出连接，因此发送会一直阻塞到有 handler 空闲为止。

use std::sync::Arc;
use tokio::sync::{Mutex, mpsc, oneshot};

type Slot<T> = oneshot::Sender<T>;

/// 创建一对分发端。两端都可克隆：多发送者 / 多接收者。
pub(crate) fn channel<T>() -> (DispatchSender<T>, DispatchReceiver<T>) {
    let (idle_tx, idle_rx) = mpsc::unbounded_channel();
    (
        DispatchSender {
            idle: Arc::new(Mutex::new(idle_rx)),
        },
        DispatchReceiver { idle: idle_tx },
    )
}

pub(crate) struct DispatchSender<T> {
    idle: Arc<Mutex<mpsc::UnboundedReceiver<Slot<T>>>>,
}

impl<T> Clone for DispatchSender<T> {
    fn clone(&self) -> Self {
        Self {
            idle: Arc::clone(&self.idle),
        }
    }
}

impl<T> DispatchSender<T> {
    /// 等待一个空闲接收者并交出 `value`。所有接收者都已退出时原样返回。
    pub(crate) async fn send(&self, mut value: T) -> Result<(), T> {
        let mut idle = self.idle.lock().await;
        loop {
            let Some(slot) = idle.recv().await else {
                return Err(value);
            };
            // 槽的等待方可能已被取消，换下一个
            match slot.send(value) {
                Ok(()) => return Ok(()),
                Err(returned) => value = returned,
            }
        }
    }
}

pub(crate) struct DispatchReceiver<T> {
    idle: mpsc::UnboundedSender<Slot<T>>,
}

impl<T> Clone for DispatchReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            idle: self.idle.clone(),
        }
    }
}

impl<T> DispatchReceiver<T> {
    /// 登记为空闲并等待交接。所有发送者都已退出时返回 `None`。
    pub(crate) async fn recv(&self) -> Option<T> {
        let (slot, handoff) = oneshot::channel();
        self.idle.send(slot).ok()?;
        handoff.await.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn send_blocks_until_receiver_is_idle() {
        let (tx, rx) = channel::<u32>();
        assert!(timeout(Duration::from_millis(50), tx.send(1)).await.is_err());

        let receiver = tokio::spawn(async move { rx.recv().await });
        tx.send(2).await.unwrap();
        assert_eq!(receiver.await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn each_value_goes_to_one_receiver() {
        let (tx, rx) = channel::<u32>();
        let mut receivers = Vec::new();
        for _ in 0..3 {
            let rx = rx.clone();
            receivers.push(tokio::spawn(async move { rx.recv().await }));
        }
        for value in 0..3 {
            tx.send(value).await.unwrap();
        }

        let mut received = Vec::new();
        for receiver in receivers {
            received.push(receiver.await.unwrap().unwrap());
        }
        received.sort_unstable();
        assert_eq!(received, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn cancelled_receiver_is_skipped() {
        let (tx, rx) = channel::<u32>();
        assert!(timeout(Duration::from_millis(20), rx.recv()).await.is_err());

        let receiver = tokio::spawn(async move { rx.recv().await });
        tx.send(7).await.unwrap();
        assert_eq!(receiver.await.unwrap(), Some(7));
    }

    #[tokio::test]
    async fn recv_ends_when_senders_are_gone() {
        let (tx, rx) = channel::<u32>();
        let receiver = tokio::spawn(async move { rx.recv().await });
        tokio::task::yield_now().await;
        drop(tx);
        assert_eq!(receiver.await.unwrap(), None);
    }

    #[tokio::test]
    async fn send_fails_when_receivers_are_gone() {
        let (tx, rx) = channel::<u32>();
        drop(rx);
        assert_eq!(tx.send(3).await, Err(3));
    }
}
