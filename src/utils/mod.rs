pub mod helper;

mod deque;
pub use deque::Deque;

mod monotonic_queue;
pub use monotonic_queue::{Max, Min, MonotonicQueue, OrderPolicy};

mod ring_buffer;
pub use ring_buffer::RingBuffer;
