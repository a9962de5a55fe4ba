mod simulated_engine;

pub use simulated_engine::SimulatedAnalysisEngine;
