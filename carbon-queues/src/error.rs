use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("slot {slot} is outside the horizon 0..{horizon}")]
    SlotOutOfRange { slot: u32, horizon: u32 },
}
