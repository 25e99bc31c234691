mod collector;

pub use collector::SystemCollector;
