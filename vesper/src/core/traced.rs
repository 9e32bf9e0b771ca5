use std::future::Future;

use tokio::{runtime::Handle, task::JoinHandle};
use tracing::Instrument;

pub fn tokio_spawn(fut: impl Future<Output = ()> + Send + 'static) -> JoinHandle<()> {
    tokio::spawn(fut.instrument(tracing::trace_span!("task")))
}

pub fn tokio_spawn_on(
    runtime: &Handle,
    fut: impl Future<Output = ()> + Send + 'static,
) -> JoinHandle<()> {
    runtime.spawn(fut.instrument(tracing::trace_span!("task")))
}
