/// Configuration for a [`Pool`](super::Pool)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Label used in log lines and error messages
    pub name: String,
    /// Number of instances created when the pool starts
    pub initial_size: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            name: "Pool".to_string(),
            initial_size: 10,
        }
    }
}

impl PoolConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_initial_size(mut self, initial_size: usize) -> Self {
        self.initial_size = initial_size;
        self
    }
}
