use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("request {id} deadline {deadline} is outside the planning horizon [0, {horizon})")]
    InvalidDeadline {
        id: u64,
        deadline: u32,
        horizon: u32,
    },
}
