mod memory;

pub use memory::MemTripleStorage;
