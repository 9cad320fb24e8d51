mod tables;

pub use tables::FixtureStore;
