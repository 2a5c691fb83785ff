//! Sliding-window median tracking over a stream of ordered values, plus
//! buy/sell/hold classification of each new observation against the window
//! median.

pub mod decision;
pub mod error;
pub mod lazyheap;
pub mod tracker;
pub mod window;

pub use decision::Decision;
pub use error::MedianError;
pub use lazyheap::LazyHeap;
pub use tracker::MedianTracker;
pub use window::MedianWindow;
