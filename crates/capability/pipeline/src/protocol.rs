use crate::PipelineError;
use async_trait::async_trait;
use std::sync::Arc;

/// 报文处理能力。
///
/// 返回 `Ok(Some(bytes))` 时 hub 把 `bytes` 写回同一连接；`Ok(None)` 表示无需响应。
#[async_trait]
pub trait Protocol: Send + Sync {
    async fn handle_message(&self, msg: &[u8]) -> Result<Option<Vec<u8>>, PipelineError>;
}

/// 以同步闭包实现 [`Protocol`]。
pub struct ProtocolFn<F>(pub F);

impl<F> ProtocolFn<F>
where
    F: Fn(&[u8]) -> Result<Option<Vec<u8>>, PipelineError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F> Protocol for ProtocolFn<F>
where
    F: Fn(&[u8]) -> Result<Option<Vec<u8>>, PipelineError> + Send + Sync,
{
    async fn handle_message(&self, msg: &[u8]) -> Result<Option<Vec<u8>>, PipelineError> {
        (self.0)(msg)
    }
}

/// 装饰器：在不改变契约的前提下包裹一个 [`Protocol`]。
pub type Decorator = Box<dyn Fn(Arc<dyn Protocol>) -> Arc<dyn Protocol> + Send + Sync>;

/// 按列表顺序逐层包裹：第一个装饰器最靠近 `root`，最后一个位于最外层。
pub fn decorate<I>(root: Arc<dyn Protocol>, decorators: I) -> Arc<dyn Protocol>
where
    I: IntoIterator<Item = Decorator>,
{
    decorators
        .into_iter()
        .fold(root, |decorated, decorator| decorator(decorated))
}
