/// Resource limits to prevent abuse and enable predictable memory usage
///
/// These limits protect against malicious inputs while being generous enough
/// for all legitimate training logs.
#[derive(Debug, Clone)]
pub struct ResourceLimits {
    /// Maximum input size in bytes
    /// Real usage: ~3KB per session, Limit: 1MB
    pub max_input_bytes: usize,

    /// Maximum number of exercises in one session
    /// Real usage: ~6-10, Limit: 100
    pub max_exercises: usize,

    /// Maximum number of warmup plus working sets for one exercise
    /// Real usage: ~3-8, Limit: 100
    pub max_sets_per_exercise: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_input_bytes: 1024 * 1024, // 1 MB
            max_exercises: 100,
            max_sets_per_exercise: 100,
        }
    }
}

impl ResourceLimits {
    /// Create a new ResourceLimits with default values
    pub fn new() -> Self {
        Self::default()
    }
}
