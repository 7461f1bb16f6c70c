// Adapters layer: concrete implementations of the domain ports (storage backends, views).

pub mod storage;
pub mod view;
