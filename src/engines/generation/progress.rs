/// Callback surface for drivers observing an evolution run.
pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: u32);
    fn on_generation_complete(&mut self, generation: u32, best_fitness: f64);
}

/// Logs progress through the standard log facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: u32) {
        log::info!("generation {} starting", generation);
    }

    fn on_generation_complete(&mut self, generation: u32, best_fitness: f64) {
        log::info!(
            "generation {} complete, best fitness: {:.4}",
            generation,
            best_fitness
        );
    }
}

/// Ignores all progress events; for tests and headless callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgressCallback;

impl ProgressCallback for SilentProgressCallback {
    fn on_generation_start(&mut self, _generation: u32) {}
    fn on_generation_complete(&mut self, _generation: u32, _best_fitness: f64) {}
}
