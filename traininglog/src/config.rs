//! Session-level defaults
//!
//! The log format only carries what changes from session to session. The
//! program a user follows and who the user is come from configuration and
//! are filled in by the deep parser when the log does not name them.

/// Version label written into every canonical session
pub const DATA_MODEL_VERSION: &str = "0.0.1";

/// Type label written into every canonical session
pub const DATA_MODEL_TYPE: &str = "TrainingSession";

/// Values used for session fields the log text leaves out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDefaults {
    pub user_id: String,
    pub user_name: String,
    pub program: String,
    pub program_author: String,
    pub program_length_weeks: u32,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            user_id: "1".to_string(),
            user_name: "athlete".to_string(),
            program: "BODYBUILDING TRANSFORMATION SYSTEM".to_string(),
            program_author: "Jeff Nippard".to_string(),
            program_length_weeks: 12,
        }
    }
}

impl SessionDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self.user_name = user_name.into();
        self
    }

    pub fn with_program(
        mut self,
        program: impl Into<String>,
        author: impl Into<String>,
        length_weeks: u32,
    ) -> Self {
        self.program = program.into();
        self.program_author = author.into();
        self.program_length_weeks = length_weeks;
        self
    }
}
