mod simulated_intake;

pub use simulated_intake::SimulatedFileIntake;
