#![forbid(unsafe_code)]

mod batch;
mod create;
mod delete;
mod get;
mod move_task;
mod reorder;
mod update;
