pub mod contract;
pub mod directory;
pub mod merge;
pub mod team;
pub mod trend;
