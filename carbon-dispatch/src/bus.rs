use async_trait::async_trait;
use tokio::sync::mpsc::Receiver;

use crate::types::Tick;

/// Abstraction over the fan-out tick bus (spec §1, §6). The real bus is an
/// external collaborator (an AMQP topic exchange in the reference system);
/// this trait hides its transport entirely.
#[async_trait]
pub trait TickBus: Send {
    async fn recv_tick(&mut self) -> Option<Tick>;
}

/// In-process `tokio::sync::mpsc`-backed bus, useful for tests and for
/// demo/single-process wiring where no external broker is present.
pub struct MpscTickBus {
    rx: Receiver<Tick>,
}

impl MpscTickBus {
    pub fn new(rx: Receiver<Tick>) -> Self {
        Self { rx }
    }
}

#[async_trait]
impl TickBus for MpscTickBus {
    async fn recv_tick(&mut self) -> Option<Tick> {
        self.rx.recv().await
    }
}
