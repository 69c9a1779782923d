/// Molecule files the `descriptors` command expects, in positional order.
pub const DATASETS: [&str; 3] = ["active", "inactive", "test"];

#[derive(Default)]
pub struct DefaultsConfig {
    pub use_fragments: bool,
    /// Empty selects the whole descriptor catalog.
    pub features: Vec<String>,
}
