use std::path::PathBuf;

/// Arguments shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    /// Location of the persisted session record.
    pub session_file: PathBuf,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(session_file: PathBuf) -> Self {
        Self { session_file }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(PathBuf::from("session.json"));
        assert_eq!(args.session_file, PathBuf::from("session.json"));
    }
}
