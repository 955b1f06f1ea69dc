// ==========================================
// 生产分析与预测引擎 - 取消信号
// ==========================================
// 基于 tokio::sync::watch：Handle 发出取消，Signal 可克隆、可等待
// ==========================================

use tokio::sync::watch;

/// 取消发起方（调用方持有）
#[derive(Debug)]
pub struct CancellationHandle {
    sender: watch::Sender<bool>,
}

/// 取消信号（传入编排器）
#[derive(Debug, Clone)]
pub struct CancellationSignal {
    receiver: watch::Receiver<bool>,
}

impl CancellationHandle {
    /// 创建一对 (handle, signal)
    pub fn pair() -> (Self, CancellationSignal) {
        let (sender, receiver) = watch::channel(false);
        (Self { sender }, CancellationSignal { receiver })
    }

    /// 发出取消（幂等）
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// 再派生一个信号
    pub fn signal(&self) -> CancellationSignal {
        CancellationSignal {
            receiver: self.sender.subscribe(),
        }
    }
}

impl CancellationSignal {
    /// 永不取消的信号
    pub fn never() -> Self {
        let (_sender, receiver) = watch::channel(false);
        Self { receiver }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// 等待取消；发起方已释放且未取消时永久挂起
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        loop {
            if *receiver.borrow_and_update() {
                return;
            }
            if receiver.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancel_wakes_waiter() {
        let (handle, signal) = CancellationHandle::pair();
        assert!(!signal.is_cancelled());

        let waiter = tokio::spawn({
            let signal = signal.clone();
            async move { signal.cancelled().await }
        });
        handle.cancel();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("取消后应被唤醒")
            .unwrap();
        assert!(signal.is_cancelled());
        assert!(handle.signal().is_cancelled());
    }

    #[tokio::test]
    async fn test_never_does_not_resolve() {
        let signal = CancellationSignal::never();
        let result = tokio::time::timeout(Duration::from_millis(20), signal.cancelled()).await;
        assert!(result.is_err());
        assert!(!signal.is_cancelled());
    }
}
